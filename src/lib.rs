pub mod common;
pub mod config;
pub mod definitions;
pub mod ns1;
pub mod service;

pub use self::config::*;
