use clap::{error::ErrorKind, CommandFactory, Parser};
use directories::ProjectDirs;
use std::{
    env,
    path::{Path, PathBuf},
};
use storefront_deck::{
    init_file_logger, BoundaryPolicy, CommandListener, Config, ConfigLoadError, Deck, HtmlExporter,
    PresentationBuilder, PresentationBuilderOptions, PresentationTheme, PresentationThemeRegistry, Presenter,
    PresenterOptions,
};

const DEFAULT_THEME: &str = "dark";

/// Walk through the BigCommerce GraphQL storefront API from your terminal.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The theme to use.
    #[clap(short, long)]
    theme: Option<String>,

    /// List all supported themes.
    #[clap(long)]
    list_themes: bool,

    /// The path to the configuration file.
    #[clap(short, long)]
    config_file: Option<PathBuf>,

    /// The slide to start at, counting from 1.
    #[clap(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    start_slide: Option<u32>,

    /// Go back to the first slide after the last one and vice versa.
    #[clap(short, long)]
    wrap: bool,

    /// Export the deck as an HTML document rather than displaying it.
    #[clap(long)]
    export_html: Option<PathBuf>,

    /// Print the deck's contents as JSON.
    #[clap(long)]
    dump_deck: bool,

    /// The file to write logs to.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Generate a JSON schema for the configuration file.
    #[cfg(feature = "json-schema")]
    #[clap(long)]
    generate_config_file_schema: bool,
}

struct Customizations {
    config: Config,
    themes: PresentationThemeRegistry,
}

fn load_customizations(config_file_path: Option<PathBuf>) -> Result<Customizations, Box<dyn std::error::Error>> {
    let configs_path: Option<PathBuf> = match env::var("XDG_CONFIG_HOME") {
        Ok(path) => Some(Path::new(&path).join("storefront-deck")),
        Err(_) => ProjectDirs::from("", "", "storefront-deck").map(|dirs| dirs.config_dir().into()),
    };
    let mut themes = PresentationThemeRegistry::default();
    if let Some(configs_path) = &configs_path {
        themes.register_from_directory(configs_path.join("themes"))?;
    }
    let config = match (config_file_path, configs_path) {
        // An explicit config file must exist.
        (Some(path), _) => Config::load(&path)?,
        (None, Some(configs_path)) => match Config::load(&configs_path.join("config.yaml")) {
            Ok(config) => config,
            Err(ConfigLoadError::NotFound) => Config::default(),
            Err(e) => return Err(e.into()),
        },
        (None, None) => Config::default(),
    };
    Ok(Customizations { config, themes })
}

fn load_default_theme(config: &Config, themes: &PresentationThemeRegistry, cli: &Cli) -> PresentationTheme {
    let default_theme_name =
        cli.theme.as_ref().or(config.defaults.theme.as_ref()).map(|s| s.as_str()).unwrap_or(DEFAULT_THEME);
    let Some(default_theme) = themes.load_by_name(default_theme_name) else {
        let valid_themes = themes.theme_names().join(", ");
        let error_message = format!("invalid theme name, valid themes are: {valid_themes}");
        Cli::command().error(ErrorKind::InvalidValue, error_message).exit();
    };
    default_theme
}

fn boundary_policy(config: &Config, cli: &Cli) -> BoundaryPolicy {
    match cli.wrap {
        true => BoundaryPolicy::Wrap,
        false => config.options.boundary_policy(),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "json-schema")]
    if cli.generate_config_file_schema {
        let schema = schemars::schema_for!(Config);
        serde_json::to_writer_pretty(std::io::stdout(), &schema)
            .map_err(|e| format!("failed to write schema: {e}"))?;
        return Ok(());
    }

    let Customizations { mut config, themes } = load_customizations(cli.config_file.clone())?;
    if let Some(path) = &cli.log_file {
        config.logging.path = Some(path.clone());
    }
    init_file_logger(&config.logging)?;

    if cli.list_themes {
        for name in themes.theme_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let deck = Deck::storefront();
    if cli.dump_deck {
        println!("{}", deck.to_json()?);
        return Ok(());
    }

    let theme = load_default_theme(&config, &themes, &cli);
    if let Some(path) = &cli.export_html {
        HtmlExporter::new(&theme).export(&deck, path)?;
        return Ok(());
    }

    let options = PresentationBuilderOptions { policy: boundary_policy(&config, &cli) };
    let start = cli.start_slide.map(|slide| slide as usize - 1).unwrap_or_default();
    let presentation = PresentationBuilder::new(&theme, options).build(&deck).starting_at(start);
    let commands = CommandListener::new(config.bindings.clone())?;
    let options = PresenterOptions { bindings: config.bindings, max_columns: config.defaults.max_columns };
    let presenter = Presenter::new(&theme, commands, presentation, options);
    presenter.present()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
