pub mod config;
pub mod logging;

pub mod container;
pub mod error;
pub mod extract;
pub mod key_path;
pub mod storage;
pub mod walker;

pub use error::ExtractError;
