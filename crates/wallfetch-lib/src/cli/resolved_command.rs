use crate::cli::args::Args;
use crate::cli::params::FetchParams;
use crate::config::{FetchConfig, FileConfig, default_output_dir, load_config};
use crate::error::WallfetchError;
use std::path::PathBuf;

/// Loads the optional config file and settles the output directory.
///
/// Precedence: `--output-dir`, then the config file or `WALLFETCH_OUTPUT_DIR`, then
/// the platform pictures directory.
pub fn resolve_params(args: Args) -> Result<FetchParams, WallfetchError> {
    let file_config = load_config(args.config_path.as_deref())?;
    resolve_with_file_config(args, file_config)
}

fn resolve_with_file_config(
    args: Args,
    file_config: FileConfig,
) -> Result<FetchParams, WallfetchError> {
    if args.output_dir.as_deref().is_some_and(str::is_empty) {
        return Err(WallfetchError::CliArgumentValidation {
            details: "--output-dir must not be empty.".to_string(),
        });
    }

    let output_dir = args
        .output_dir
        .map(PathBuf::from)
        .or(file_config.output_dir)
        .unwrap_or_else(default_output_dir);

    let mut fetch_config = FetchConfig::with_output_dir(output_dir);
    fetch_config.save_metadata = args.save_metadata || file_config.save_metadata.unwrap_or(false);

    Ok(FetchParams { fetch_config })
}
