pub mod buildfile;
pub mod commands;
pub mod error;
pub mod paths;
pub mod prompt;
pub mod scaffold;
pub mod sites;
pub mod validate;

// Re-export commonly used types
pub use error::Error;
pub use scaffold::{materialize, Outcome, PlaceholderMap};
