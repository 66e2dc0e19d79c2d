pub mod config;

pub use config::{DatabaseConfig, MEMORY_TARGET, Target};
