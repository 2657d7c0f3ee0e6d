mod executor;
mod locator;
mod models;
mod orchestrator;

pub use executor::flip;
pub use locator::{locate, select_zone};
pub use models::*;
pub use orchestrator::*;
