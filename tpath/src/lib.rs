pub mod commands;
pub mod constants;
pub mod error;
pub mod logging;
pub mod settings;

pub use error::Error;
