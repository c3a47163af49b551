use crate::config::FetchConfig;

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub fetch_config: FetchConfig,
}
