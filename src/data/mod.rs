//! Data module - CSV loading and preparation

mod loader;
mod processor;

pub use loader::{content_key, DataCache, DataLoader, LoadError};
pub use processor::{
    sanitize_name, DataProcessor, HotnessRecord, ParseError, PreparedTable,
    REQUIRED_COLUMNS,
};
