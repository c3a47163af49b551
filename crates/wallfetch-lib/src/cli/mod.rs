mod args;
mod fetch;
mod params;
mod resolved_command;

pub use args::{Args, parse_args};
pub use fetch::{USER_AGENT, build_client, run_fetch};
pub use params::FetchParams;
pub use resolved_command::resolve_params;
