pub mod env;
pub mod tracing_init;

pub use env::{AppConfig, LogFormat};
pub use tracing_init::init_tracing;
