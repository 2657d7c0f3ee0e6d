mod config;
mod models;
mod provider;

pub use self::config::*;
pub use provider::*;

pub const DEFAULT_ENDPOINT: &str = "https://api.nsone.net/v1";
