pub mod completion;
pub mod config;
pub mod logging;
pub mod serde_helpers;
