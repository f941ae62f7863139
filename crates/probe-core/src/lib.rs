pub mod config;
pub use config::{ConfigSources, load_sources, merge_sources, parse_canonical};

pub mod error;
pub use error::{ConfigError, FilterError};

pub mod filter;
pub use filter::{Selector, filter};

pub mod store;
pub use store::{ScriptStore, Snapshot};
