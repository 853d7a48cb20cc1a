pub mod cli;
pub mod commands;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod output;
pub mod utils;

pub use cli::{Cli, Command};
