//! Command-line configuration engine for the code server.
//!
//! [`Options::parse_args`] turns process arguments into a validated,
//! read-only [`Options`] that the build pipeline, logger and HTTP listener
//! consume. Parsing and validation stop at the first [`ArgError`].

pub mod args;
pub mod config;
pub mod listener;
pub mod logging;

pub use args::{ArgError, ErrorKind};
pub use config::Options;
pub use listener::{NoopRecompileListener, RecompileListener};
