//! CSV loading of versioned tax tables.

mod loader;

pub use loader::{BracketRecord, SimplesRecord, TableLoader, TableLoaderError};
