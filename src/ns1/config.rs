#[derive(Clone, serde::Deserialize)]
pub struct Config {
    /// API key, or `@/path/to/file` to read it from disk.
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per request deadline in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_endpoint() -> String {
    super::DEFAULT_ENDPOINT.into()
}

fn default_timeout() -> u64 {
    30
}

fn default_search_limit() -> usize {
    100
}
