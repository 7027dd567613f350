mod config;
mod property;
mod schedule;
mod tour;

pub use config::*;
pub use property::*;
pub use schedule::*;
pub use tour::*;
