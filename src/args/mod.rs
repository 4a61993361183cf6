//! Argument processing for the code server.
//!
//! ```text
//! Raw tokens → ArgProcessor (HandlerRegistry lookup) → OptionsBuilder → validate → Options
//! ```
//!
//! Every option is an [`OptionDef`] in the [`HandlerRegistry`]; the processor
//! dispatches tokens to them in order and stops at the first [`ArgError`].

mod bind;
mod error;
mod handlers;
mod help;
mod processor;
mod registry;

pub use bind::{resolve_bind_address, AddressResolver, BindTarget, SystemResolver};
pub use error::{ArgError, ErrorKind, RegistryError};
pub use handlers::builtin_registry;
pub use help::usage;
pub use processor::ArgProcessor;
pub use registry::{
    CustomHandle, DirStore, FlagArity, FlagGetter, FlagSetter, HandlerKind, HandlerRegistry,
    OptionDef, ParseContext, TagMatch, ValueStore,
};
