//! The code server configuration object and its post-parse validation.

mod options;
mod types;
mod validate;

pub use options::{
    Options, OptionsBuilder, DEFAULT_BIND_ADDRESS, DEFAULT_PORT, DEFAULT_PREFERRED_HOST,
};
pub use types::{LogLevel, SourceLevel};
pub use validate::validate;
