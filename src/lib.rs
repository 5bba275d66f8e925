//! storefront-deck: a terminal slideshow walking through the BigCommerce GraphQL storefront API.
//!
//! This is not meant to be used as a crate!

pub(crate) mod builder;
pub(crate) mod code;
pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod deck;
pub(crate) mod export;
pub(crate) mod logging;
pub(crate) mod navigation;
pub(crate) mod presentation;
pub(crate) mod presenter;
pub(crate) mod render;
pub(crate) mod style;
pub(crate) mod terminal;
pub(crate) mod theme;
pub(crate) mod ui;

pub use crate::{
    builder::{PresentationBuilder, PresentationBuilderOptions},
    commands::{keyboard::KeyBindingsValidationError, listener::CommandListener},
    config::{Config, ConfigLoadError},
    deck::Deck,
    export::{ExportError, HtmlExporter},
    logging::{init_file_logger, LoggingError},
    navigation::BoundaryPolicy,
    presentation::Presentation,
    presenter::{PresentationError, Presenter, PresenterOptions},
    theme::{LoadThemeError, PresentationTheme, PresentationThemeRegistry},
};
