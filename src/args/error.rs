//! Failures raised while processing arguments.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the handler registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tag '{tag}' is already registered")]
    DuplicateTag { tag: String },

    #[error("a positional handler is already registered")]
    DuplicateExtra,
}

/// Why parsing or validation stopped.
///
/// The first error encountered ends the whole operation; no configuration is
/// produced alongside it.
#[derive(Debug, Error)]
pub enum ArgError {
    /// A tag that needs a value was the last token.
    #[error("{tag} should be followed by {expected}")]
    MissingValue { tag: String, expected: &'static str },

    /// The value following a tag does not parse as its expected type.
    #[error("{tag}: invalid {expected} '{value}'")]
    InvalidValue {
        tag: String,
        value: String,
        expected: &'static str,
    },

    #[error("{tag}: not a directory: {}", .path.display())]
    NotADirectory { tag: String, path: PathBuf },

    #[error("Can't resolve bind address: {value}")]
    UnresolvableAddress {
        value: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown argument: {arg}{}", did_you_mean(.suggestion))]
    UnknownArgument {
        arg: String,
        suggestion: Option<String>,
    },

    #[error("{first} and {second} are incompatible")]
    IncompatibleFlags {
        first: &'static str,
        second: &'static str,
    },

    #[error("at least one module must be supplied")]
    MissingModule,

    /// `-help` was given; the caller should print usage and stop.
    #[error("help requested")]
    HelpRequested,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Coarse classification of an [`ArgError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedOption,
    InvalidPath,
    UnresolvableAddress,
    UnknownToken,
    Validation,
    Help,
    Registry,
}

impl ArgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArgError::MissingValue { .. } | ArgError::InvalidValue { .. } => {
                ErrorKind::MalformedOption
            }
            ArgError::NotADirectory { .. } => ErrorKind::InvalidPath,
            ArgError::UnresolvableAddress { .. } => ErrorKind::UnresolvableAddress,
            ArgError::UnknownArgument { .. } => ErrorKind::UnknownToken,
            ArgError::IncompatibleFlags { .. } | ArgError::MissingModule => ErrorKind::Validation,
            ArgError::HelpRequested => ErrorKind::Help,
            ArgError::Registry(_) => ErrorKind::Registry,
        }
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(tag) => format!(" (did you mean {}?)", tag),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_argument_mentions_suggestion() {
        let err = ArgError::UnknownArgument {
            arg: "-prot".to_string(),
            suggestion: Some("-port".to_string()),
        };
        assert_eq!(err.to_string(), "Unknown argument: -prot (did you mean -port?)");

        let err = ArgError::UnknownArgument {
            arg: "-doesNotExist".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Unknown argument: -doesNotExist");
    }

    #[test]
    fn kinds_follow_taxonomy() {
        let missing = ArgError::MissingValue {
            tag: "-port".to_string(),
            expected: "a port number",
        };
        assert_eq!(missing.kind(), ErrorKind::MalformedOption);
        assert_eq!(missing.to_string(), "-port should be followed by a port number");

        let dir = ArgError::NotADirectory {
            tag: "-src".to_string(),
            path: PathBuf::from("/no/such/dir"),
        };
        assert_eq!(dir.kind(), ErrorKind::InvalidPath);
        assert_eq!(dir.to_string(), "-src: not a directory: /no/such/dir");

        assert_eq!(ArgError::MissingModule.kind(), ErrorKind::Validation);
        assert_eq!(ArgError::HelpRequested.kind(), ErrorKind::Help);
    }
}
