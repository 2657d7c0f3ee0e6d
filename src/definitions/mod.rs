mod models;
mod parser;

pub use models::*;
