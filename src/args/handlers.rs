//! The code server's option set. All tags are defined here.
//!
//! Adding an option: write its store function here and add an [`OptionDef`]
//! to [`builtin_registry`]. Registration order is the order shown in usage.

use std::path::PathBuf;
use std::str::FromStr;

use crate::args::bind::resolve_bind_address;
use crate::args::error::{ArgError, RegistryError};
use crate::args::registry::{
    following_value, FlagArity, HandlerKind, HandlerRegistry, OptionDef, ParseContext,
};

/// Build the registry of every option the code server accepts.
pub fn builtin_registry() -> Result<HandlerRegistry, RegistryError> {
    let mut registry = HandlerRegistry::new();
    for def in builtin_options() {
        registry.register(def)?;
    }
    Ok(registry)
}

fn builtin_options() -> Vec<OptionDef> {
    vec![
        OptionDef {
            name: "precompile",
            tag_args: &[],
            purpose: "Precompile modules.",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Flag {
                set: |o, v| o.no_precompile = v,
                get: |o| o.no_precompile,
                inverted: true,
            },
        },
        OptionDef {
            name: "compileTest",
            tag_args: &[],
            purpose: "Exits after compiling the modules. \
                      The exit code will be 0 if the compile succeeded.",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Flag {
                set: |o, v| o.is_compile_test = v,
                get: |o| o.is_compile_test,
                inverted: false,
            },
        },
        OptionDef {
            name: "-compileTestRecompiles",
            tag_args: &["count"],
            purpose: "The number of times to recompile (after the first one) during a compile test.",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Value {
                expected: "an integer",
                store: |ctx, tag, value| {
                    ctx.options.compile_test_recompiles = parse_value(tag, value, "count")?;
                    Ok(())
                },
            },
        },
        OptionDef {
            name: "-bindAddress",
            tag_args: &["address"],
            purpose: "The ip address of the code server. Defaults to 127.0.0.1.",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Value {
                expected: "an address",
                store: store_bind_address,
            },
        },
        OptionDef {
            name: "-port",
            tag_args: &["port"],
            purpose: "The port where the code server will run.",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Value {
                expected: "a port number",
                store: |ctx, tag, value| {
                    ctx.options.port = parse_value(tag, value, "port number")?;
                    Ok(())
                },
            },
        },
        OptionDef {
            name: "-workDir",
            tag_args: &["dir"],
            purpose: "The root of the directory tree where the code server will \
                      write compiler output. If not supplied, a temporary directory \
                      will be used.",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Dir {
                store: |o, dir| o.work_dir = Some(dir),
            },
        },
        OptionDef {
            name: "allowMissingSrc",
            tag_args: &[],
            purpose: "Allows -src flags to reference missing directories.",
            aliases: &[],
            experimental: false,
            early: true,
            kind: HandlerKind::Flag {
                set: |o, v| o.allow_missing_source_dir = v,
                get: |o| o.allow_missing_source_dir,
                inverted: false,
            },
        },
        OptionDef {
            name: "-src",
            tag_args: &["dir"],
            purpose: "A directory containing source to be prepended to the classpath for compiling.",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Custom {
                arity: FlagArity::RequiresValue,
                handle: handle_source_dir,
            },
        },
        OptionDef {
            name: "module",
            tag_args: &["module"],
            purpose: "The modules that the code server should compile. (Example: com.example.MyApp)",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Extra {
                accept: |token| !token.starts_with('-'),
                add: |o, module| o.module_names.push(module.to_string()),
            },
        },
        OptionDef {
            name: "failOnError",
            tag_args: &[],
            purpose: "Stop compiling if a module has a source file with a compile error, \
                      even if unused.",
            aliases: &["-strict"],
            experimental: false,
            early: false,
            kind: HandlerKind::Flag {
                set: |o, v| o.fail_on_error = v,
                get: |o| o.fail_on_error,
                inverted: false,
            },
        },
        OptionDef {
            name: "enforceStrictResources",
            tag_args: &[],
            purpose: "Don't implicitly depend on \"client\" and \"public\" when \
                      a module doesn't define any dependencies.",
            aliases: &["-XstrictResources"],
            experimental: true,
            early: false,
            kind: HandlerKind::Flag {
                set: |o, v| o.strict_resources = v,
                get: |o| o.strict_resources,
                inverted: false,
            },
        },
        OptionDef {
            name: "incremental",
            tag_args: &[],
            purpose: "Compile and link the application as a set of separate libraries.",
            aliases: &[],
            experimental: true,
            early: false,
            kind: HandlerKind::Flag {
                set: |o, v| o.compile_incremental = v,
                get: |o| o.compile_incremental,
                inverted: false,
            },
        },
        OptionDef {
            name: "-sourceLevel",
            tag_args: &["[auto, 1.8, 9, 10, 11, 17]"],
            purpose: "Specifies Java source level (defaults to 11).",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Value {
                expected: "a source level",
                store: |ctx, tag, value| {
                    ctx.options.source_level = parse_value(tag, value, "source level")?;
                    Ok(())
                },
            },
        },
        OptionDef {
            name: "-logLevel",
            tag_args: &["level"],
            purpose: "The level of logging detail: ERROR, WARN, INFO, TRACE, DEBUG, \
                      SPAM or ALL (defaults to INFO).",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Value {
                expected: "a log level",
                store: |ctx, tag, value| {
                    ctx.options.log_level = parse_value(tag, value, "log level")?;
                    Ok(())
                },
            },
        },
        OptionDef {
            name: "-help",
            tag_args: &[],
            purpose: "Prints this usage message.",
            aliases: &[],
            experimental: false,
            early: false,
            kind: HandlerKind::Help,
        },
    ]
}

/// `-bindAddress`: sets the bind address and the advertised host together.
fn store_bind_address(ctx: &mut ParseContext<'_>, _tag: &str, value: &str) -> Result<(), ArgError> {
    let target = resolve_bind_address(value, ctx.resolver)?;
    ctx.options.bind_address = target.bind_address;
    ctx.options.preferred_host = target.preferred_host;
    Ok(())
}

/// `-src <dir>`: appends to the source path. Existence is checked here, at
/// the moment the tag is processed, unless missing directories are allowed.
fn handle_source_dir(
    ctx: &mut ParseContext<'_>,
    args: &[String],
    index: usize,
) -> Result<usize, ArgError> {
    let value = following_value(args, index, "the name of a directory")?;
    let candidate = PathBuf::from(value);
    if !ctx.options.allow_missing_source_dir && !candidate.is_dir() {
        return Err(ArgError::NotADirectory {
            tag: args[index].clone(),
            path: candidate,
        });
    }

    ctx.options.source_path.push(candidate);
    Ok(2)
}

fn parse_value<T: FromStr>(tag: &str, value: &str, expected: &'static str) -> Result<T, ArgError> {
    value.parse().map_err(|_| ArgError::InvalidValue {
        tag: tag.to_string(),
        value: value.to_string(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_builds_without_conflicts() {
        let registry = builtin_registry().expect("unique tags");
        assert!(registry.extra().is_some());
        for tag in [
            "-precompile",
            "-noprecompile",
            "-incremental",
            "-compileTest",
            "-compileTestRecompiles",
            "-bindAddress",
            "-port",
            "-workDir",
            "-allowMissingSrc",
            "-src",
            "-failOnError",
            "-strict",
            "-enforceStrictResources",
            "-XstrictResources",
            "-sourceLevel",
            "-logLevel",
            "-help",
        ] {
            assert!(registry.lookup(tag).is_some(), "{} should be registered", tag);
        }
    }

    #[test]
    fn only_precompile_is_inverted() {
        let registry = builtin_registry().unwrap();
        let inverted: Vec<&str> = registry
            .defs()
            .iter()
            .filter(|def| matches!(def.kind, HandlerKind::Flag { inverted: true, .. }))
            .map(|def| def.name)
            .collect();
        assert_eq!(inverted, ["precompile"]);
        assert_eq!(
            registry.lookup("-precompile").unwrap().def.displayed_default(),
            Some(true)
        );
    }

    #[test]
    fn parse_value_rejects_garbage_and_overflow() {
        assert_eq!(parse_value::<u16>("-port", "8080", "port number").unwrap(), 8080);
        assert!(matches!(
            parse_value::<u16>("-port", "70000", "port number"),
            Err(ArgError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_value::<u32>("-compileTestRecompiles", "two", "count"),
            Err(ArgError::InvalidValue { .. })
        ));
    }
}
