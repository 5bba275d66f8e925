pub(crate) mod keyboard;
pub(crate) mod listener;
