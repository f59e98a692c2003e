//! Command Line Interface for Pike.

pub mod args;
pub mod commands;
pub mod output;
pub mod request_file;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use output::*;
pub use request_file::RequestFile;
