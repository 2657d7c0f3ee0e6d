mod config;
mod error;
mod models;
#[cfg(test)]
pub(crate) mod testing;

pub(crate) use self::config::*;
pub use error::*;
pub use models::*;
