use super::FileConfig;
use crate::error::WallfetchError;
use config::Config as ConfigBuilder;

pub const ENV_PREFIX: &str = "WALLFETCH";

/// Loads the optional settings file, layered under `WALLFETCH_*` environment variables.
pub fn load_config(config_path: Option<&str>) -> Result<FileConfig, WallfetchError> {
    let mut builder = ConfigBuilder::builder();
    if let Some(config_path) = config_path {
        builder = builder.add_source(config::File::with_name(config_path));
    }

    let config_builder = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    config_builder.try_deserialize().map_err(Into::into)
}
