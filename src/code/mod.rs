pub(crate) mod highlighting;
