mod loader;
mod model;

pub use loader::{ENV_PREFIX, load_config};
pub use model::{
    DEFAULT_ID_PREFIX, DEFAULT_ORIGIN, DEFAULT_OUTPUT_SUBDIR, DEFAULT_SOURCES, FetchConfig,
    FileConfig, ResolutionTag, default_output_dir, default_tags,
};
