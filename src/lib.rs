// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod import;
pub mod logging;
pub mod model;
pub mod storage;
