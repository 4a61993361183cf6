//! Checks that relate two or more fields, run once after a successful parse.

use crate::args::ArgError;
use crate::config::options::{Options, OptionsBuilder};

/// Validate the parsed fields and freeze them into [`Options`].
///
/// Checks, stopping at the first violation:
/// - `-noprecompile` and `-compileTest` are not both in effect
/// - at least one module was supplied
pub fn validate(builder: OptionsBuilder) -> Result<Options, ArgError> {
    if builder.is_compile_test && builder.no_precompile {
        return Err(ArgError::IncompatibleFlags {
            first: "-noprecompile",
            second: "-compileTest",
        });
    }

    if builder.module_names.is_empty() {
        return Err(ArgError::MissingModule);
    }

    Ok(builder.build())
}
