//! Usage text rendered from the registry.

use crate::args::registry::{HandlerKind, HandlerRegistry, OptionDef};

/// Usage label for an option: `-[no]label` for flags, `-tag arg` for the rest.
fn usage_tag(def: &OptionDef) -> String {
    let tag = match def.kind {
        HandlerKind::Flag { .. } => format!("-[no]{}", def.name),
        _ => def.name.to_string(),
    };
    if def.tag_args.is_empty() || def.is_extra() {
        tag
    } else {
        format!("{} {}", tag, def.tag_args.join(" "))
    }
}

/// Purpose line, with the experimental marker and a flag's displayed default.
fn purpose_line(def: &OptionDef) -> String {
    let mut line = String::new();
    if def.experimental {
        line.push_str("EXPERIMENTAL: ");
    }
    line.push_str(def.purpose);
    if let Some(default) = def.displayed_default() {
        line.push_str(if default {
            " (defaults to ON)"
        } else {
            " (defaults to OFF)"
        });
    }
    line
}

/// Render the full usage message for `program`.
pub fn usage(program: &str, registry: &HandlerRegistry) -> String {
    let (extras, options): (Vec<&OptionDef>, Vec<&OptionDef>) =
        registry.defs().iter().partition(|def| def.is_extra());

    let mut synopsis = format!("Usage: {}", program);
    for def in &options {
        synopsis.push_str(&format!(" [{}]", usage_tag(def)));
    }
    for def in &extras {
        synopsis.push_str(&format!(" {}[s]", def.name));
    }

    let width = registry
        .defs()
        .iter()
        .map(|def| usage_tag(def).len())
        .max()
        .unwrap_or(0);

    let mut out = synopsis;
    out.push_str("\n\nwhere\n");
    for def in &options {
        out.push_str(&format!("  {:<width$}  {}\n", usage_tag(def), purpose_line(def)));
    }
    if !extras.is_empty() {
        out.push_str("and\n");
        for def in &extras {
            out.push_str(&format!("  {:<width$}  {}\n", usage_tag(def), purpose_line(def)));
        }
    }
    out
}
