//! Argument processor. Walks the tokens left to right and dispatches each
//! one to its handler.

use tracing::{debug, info, trace};

use crate::args::bind::AddressResolver;
use crate::args::error::ArgError;
use crate::args::handlers::builtin_registry;
use crate::args::help;
use crate::args::registry::{HandlerRegistry, OptionDef, ParseContext, TagMatch};
use crate::config::{validate, Options};

/// Where a token at the cursor was routed.
enum Route<'r> {
    Tag(TagMatch<'r>),
    Extra(&'r OptionDef),
}

/// Single-pass processor over a flat argument list.
pub struct ArgProcessor<'a> {
    registry: HandlerRegistry,
    resolver: &'a dyn AddressResolver,
}

impl<'a> ArgProcessor<'a> {
    /// Processor over the built-in option set.
    pub fn new(resolver: &'a dyn AddressResolver) -> Result<Self, ArgError> {
        Ok(Self::with_registry(builtin_registry()?, resolver))
    }

    pub fn with_registry(registry: HandlerRegistry, resolver: &'a dyn AddressResolver) -> Self {
        Self { registry, resolver }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Usage text for `program`.
    pub fn usage(&self, program: &str) -> String {
        help::usage(program, &self.registry)
    }

    /// Process `args`, then validate. Nothing is returned unless both succeed.
    pub fn parse(&self, args: &[String]) -> Result<Options, ArgError> {
        let mut ctx = ParseContext::new(self.resolver);
        self.process(args, &mut ctx)?;

        let options = validate(ctx.into_options()).inspect_err(|err| {
            debug!(error = %err, "configuration rejected");
        })?;
        info!(
            modules = ?options.module_names(),
            bind_address = options.bind_address(),
            port = options.port(),
            "configuration accepted"
        );
        Ok(options)
    }

    /// Dispatch every token, stopping at the first failure.
    pub(crate) fn process(
        &self,
        args: &[String],
        ctx: &mut ParseContext<'_>,
    ) -> Result<(), ArgError> {
        self.apply_early(args, ctx)?;

        let mut cursor = 0;
        while cursor < args.len() {
            let consumed = self.dispatch(args, cursor, ctx).inspect_err(|err| {
                debug!(token = %args[cursor], kind = ?err.kind(), "argument rejected");
            })?;
            cursor += consumed;
        }
        Ok(())
    }

    /// First pass: run the early options so later checks see their final value.
    ///
    /// Other options are skipped by arity without running. Malformed input is
    /// left for the main pass to report.
    fn apply_early(&self, args: &[String], ctx: &mut ParseContext<'_>) -> Result<(), ArgError> {
        let mut cursor = 0;
        while cursor < args.len() {
            match self.registry.lookup(&args[cursor]) {
                Some(hit) if hit.def.early => {
                    trace!(tag = %args[cursor], "applying early option");
                    cursor += hit.def.handle(ctx, args, cursor, hit.flag_value)?;
                }
                Some(hit) => {
                    cursor += hit.def.arity().token_count();
                }
                None => cursor += 1,
            }
        }
        Ok(())
    }

    fn route(&self, token: &str) -> Result<Route<'_>, ArgError> {
        if let Some(hit) = self.registry.lookup(token) {
            return Ok(Route::Tag(hit));
        }
        self.registry
            .extra()
            .map(Route::Extra)
            .ok_or_else(|| self.unknown(token))
    }

    fn dispatch(
        &self,
        args: &[String],
        cursor: usize,
        ctx: &mut ParseContext<'_>,
    ) -> Result<usize, ArgError> {
        let token = args[cursor].as_str();
        match self.route(token)? {
            Route::Tag(hit) if hit.def.early => {
                // Already applied; only advance past it.
                Ok(hit.def.arity().token_count())
            }
            Route::Tag(hit) => {
                debug!(tag = token, "dispatching option");
                hit.def.handle(ctx, args, cursor, hit.flag_value)
            }
            Route::Extra(def) => {
                trace!(token = token, "positional argument");
                def.handle(ctx, args, cursor, None).map_err(|err| match err {
                    ArgError::UnknownArgument { arg, .. } => self.unknown(&arg),
                    other => other,
                })
            }
        }
    }

    fn unknown(&self, token: &str) -> ArgError {
        ArgError::UnknownArgument {
            arg: token.to_string(),
            suggestion: self.registry.suggest(token),
        }
    }
}
