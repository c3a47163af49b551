use wallfetch_lib::cli::{parse_args, resolve_params, run_fetch};
use wallfetch_lib::error::WallfetchError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), WallfetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let params = resolve_params(args)?;
    run_fetch(params).await?;

    Ok(())
}
