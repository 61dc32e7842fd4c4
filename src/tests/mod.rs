pub(crate) mod refresh_logging;
