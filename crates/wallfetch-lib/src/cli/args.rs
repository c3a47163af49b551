use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config_path: Option<String>,
    pub output_dir: Option<String>,
    pub save_metadata: bool,
    pub log_level: Level,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config_path: None,
            output_dir: None,
            save_metadata: false,
            log_level: Level::INFO,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wallfetch",
    version,
    about = "Download every resolution of the recent daily wallpapers, skipping existing files"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file (yaml, toml or json) providing output_dir and save_metadata"
    )]
    config: Option<String>,

    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Output directory (default: <pictures>/BingImages)"
    )]
    output_dir: Option<String>,

    #[arg(
        long = "save-metadata",
        help = "Also merge image titles and attributions into <output-dir>/metadata/<year>.json"
    )]
    save_metadata: bool,
}

const QUIET_TARGETS: [&str; 3] = ["hyper_util=warn", "hyper=warn", "reqwest=info"];

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    for directive in QUIET_TARGETS {
        if let Ok(directive) = directive.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(filter)
        .init();

    Args {
        config_path: cli.config,
        output_dir: cli.output_dir,
        save_metadata: cli.save_metadata,
        log_level,
    }
}
