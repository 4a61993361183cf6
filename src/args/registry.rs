//! Handler registry: every option the code server accepts, keyed by tag.

use std::collections::HashMap;
use std::path::PathBuf;

use strsim::levenshtein;

use crate::args::bind::AddressResolver;
use crate::args::error::{ArgError, RegistryError};
use crate::config::OptionsBuilder;

/// Whether an option takes a value after its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagArity {
    /// Boolean flag or bare positional token.
    NoValue,
    /// Exactly one following token (e.g., `-port 9876`).
    RequiresValue,
}

impl FlagArity {
    /// Tokens consumed by an option with this arity, its tag included.
    pub fn token_count(self) -> usize {
        match self {
            FlagArity::NoValue => 1,
            FlagArity::RequiresValue => 2,
        }
    }
}

/// State handed to handlers during a parse pass.
pub struct ParseContext<'a> {
    pub(crate) options: OptionsBuilder,
    pub(crate) resolver: &'a dyn AddressResolver,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(resolver: &'a dyn AddressResolver) -> Self {
        Self {
            options: OptionsBuilder::default(),
            resolver,
        }
    }

    pub(crate) fn into_options(self) -> OptionsBuilder {
        self.options
    }
}

pub type FlagSetter = fn(&mut OptionsBuilder, bool);
pub type FlagGetter = fn(&OptionsBuilder) -> bool;
pub type ValueStore = fn(&mut ParseContext<'_>, &str, &str) -> Result<(), ArgError>;
pub type DirStore = fn(&mut OptionsBuilder, PathBuf);
pub type CustomHandle = fn(&mut ParseContext<'_>, &[String], usize) -> Result<usize, ArgError>;

/// How an option consumes tokens and where the result goes.
#[derive(Clone, Copy)]
pub enum HandlerKind {
    /// `-label` / `-nolabel`. With `inverted`, the stored field is the
    /// negation of the surface flag.
    Flag {
        set: FlagSetter,
        get: FlagGetter,
        inverted: bool,
    },
    /// One value, parsed and stored by `store(ctx, tag, value)`.
    Value {
        expected: &'static str,
        store: ValueStore,
    },
    /// One value that must name an existing directory.
    Dir { store: DirStore },
    /// Handler that inspects the token list itself and reports its consumption.
    Custom {
        arity: FlagArity,
        handle: CustomHandle,
    },
    /// Fallback for tokens matching no tag. `accept` decides which tokens it takes.
    Extra {
        accept: fn(&str) -> bool,
        add: fn(&mut OptionsBuilder, &str),
    },
    /// Stops parsing so the caller can print usage.
    Help,
}

/// A single option definition.
#[derive(Clone, Copy)]
pub struct OptionDef {
    /// Flag label (`"precompile"`), tag (`"-port"`), or positional placeholder (`"module"`).
    pub name: &'static str,
    /// Names of the values following the tag, for usage text.
    pub tag_args: &'static [&'static str],
    /// Human-readable purpose for usage text.
    pub purpose: &'static str,
    /// Legacy spellings. For flags an alias sets the flag to true.
    pub aliases: &'static [&'static str],
    /// Advisory marker shown in usage text. Does not change parsing.
    pub experimental: bool,
    /// Applied in a first pass over all tokens, before anything else runs.
    pub early: bool,
    pub kind: HandlerKind,
}

impl OptionDef {
    pub fn arity(&self) -> FlagArity {
        match self.kind {
            HandlerKind::Flag { .. } | HandlerKind::Extra { .. } | HandlerKind::Help => {
                FlagArity::NoValue
            }
            HandlerKind::Value { .. } | HandlerKind::Dir { .. } => FlagArity::RequiresValue,
            HandlerKind::Custom { arity, .. } => arity,
        }
    }

    pub fn is_extra(&self) -> bool {
        matches!(self.kind, HandlerKind::Extra { .. })
    }

    /// Every spelling that reaches this option, with the value a flag spelling sets.
    pub fn surface_tags(&self) -> Vec<(String, Option<bool>)> {
        match self.kind {
            HandlerKind::Extra { .. } => Vec::new(),
            HandlerKind::Flag { .. } => {
                let mut tags = vec![
                    (format!("-{}", self.name), Some(true)),
                    (format!("-no{}", self.name), Some(false)),
                ];
                tags.extend(self.aliases.iter().map(|a| (a.to_string(), Some(true))));
                tags
            }
            _ => std::iter::once(self.name)
                .chain(self.aliases.iter().copied())
                .map(|tag| (tag.to_string(), None))
                .collect(),
        }
    }

    /// Default as the user sees it. Only flags have one.
    pub fn displayed_default(&self) -> Option<bool> {
        match self.kind {
            HandlerKind::Flag { get, inverted, .. } => {
                Some(get(&OptionsBuilder::default()) ^ inverted)
            }
            _ => None,
        }
    }

    /// Process the token at `index` (this option's tag, or a positional token).
    ///
    /// Returns how many tokens were consumed, the tag included.
    pub fn handle(
        &self,
        ctx: &mut ParseContext<'_>,
        args: &[String],
        index: usize,
        flag_value: Option<bool>,
    ) -> Result<usize, ArgError> {
        let tag = args[index].as_str();
        match self.kind {
            HandlerKind::Flag { set, inverted, .. } => {
                set(&mut ctx.options, flag_value.unwrap_or(true) ^ inverted);
                Ok(1)
            }
            HandlerKind::Value { expected, store } => {
                let value = following_value(args, index, expected)?;
                store(ctx, tag, value)?;
                Ok(2)
            }
            HandlerKind::Dir { store } => {
                let value = following_value(args, index, "a directory")?;
                let path = PathBuf::from(value);
                if !path.is_dir() {
                    return Err(ArgError::NotADirectory {
                        tag: tag.to_string(),
                        path,
                    });
                }
                store(&mut ctx.options, path);
                Ok(2)
            }
            HandlerKind::Custom { handle, .. } => handle(ctx, args, index),
            HandlerKind::Extra { accept, add } => {
                if !accept(tag) {
                    return Err(ArgError::UnknownArgument {
                        arg: tag.to_string(),
                        suggestion: None,
                    });
                }
                add(&mut ctx.options, tag);
                Ok(1)
            }
            HandlerKind::Help => Err(ArgError::HelpRequested),
        }
    }
}

/// The token after the tag at `index`, or a missing-value error naming the tag.
pub(crate) fn following_value<'t>(
    args: &'t [String],
    index: usize,
    expected: &'static str,
) -> Result<&'t str, ArgError> {
    args.get(index + 1)
        .map(String::as_str)
        .ok_or_else(|| ArgError::MissingValue {
            tag: args[index].clone(),
            expected,
        })
}

/// A registry hit: the option plus the value implied by a flag spelling.
#[derive(Clone, Copy)]
pub struct TagMatch<'r> {
    pub def: &'r OptionDef,
    pub flag_value: Option<bool>,
}

/// Ordered collection of options, uniquely keyed by every surface tag.
#[derive(Default)]
pub struct HandlerRegistry {
    defs: Vec<OptionDef>,
    tags: HashMap<String, (usize, Option<bool>)>,
    extra: Option<usize>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option. Fails if any of its spellings is already taken.
    pub fn register(&mut self, def: OptionDef) -> Result<(), RegistryError> {
        let tags = def.surface_tags();
        for (tag, _) in &tags {
            if self.tags.contains_key(tag) {
                return Err(RegistryError::DuplicateTag { tag: tag.clone() });
            }
        }
        if def.is_extra() && self.extra.is_some() {
            return Err(RegistryError::DuplicateExtra);
        }

        let index = self.defs.len();
        if def.is_extra() {
            self.extra = Some(index);
        }
        for (tag, value) in tags {
            self.tags.insert(tag, (index, value));
        }
        self.defs.push(def);
        Ok(())
    }

    /// Exact, case-sensitive tag lookup, aliases included.
    pub fn lookup(&self, tag: &str) -> Option<TagMatch<'_>> {
        self.tags.get(tag).map(|&(index, flag_value)| TagMatch {
            def: &self.defs[index],
            flag_value,
        })
    }

    /// The positional fallback, if one is registered.
    pub fn extra(&self) -> Option<&OptionDef> {
        self.extra.map(|index| &self.defs[index])
    }

    /// Options in registration order.
    pub fn defs(&self) -> &[OptionDef] {
        &self.defs
    }

    /// Suggest a registered tag close to `input`.
    /// Returns Some(tag) if one is within Levenshtein distance 2.
    pub fn suggest(&self, input: &str) -> Option<String> {
        let mut best_match: Option<(String, usize)> = None;

        for def in &self.defs {
            for (tag, _) in def.surface_tags() {
                let distance = levenshtein(input, &tag);
                if distance > 2 {
                    continue;
                }
                match &best_match {
                    Some((_, best_dist)) if distance >= *best_dist => {}
                    _ => best_match = Some((tag, distance)),
                }
            }
        }

        best_match.map(|(tag, _)| tag)
    }
}
