pub mod catalog;
pub mod config;

pub use catalog::*;
pub use config::*;
