//! Discovery and materialization of template instantiations.
//!
//! A generic class is only useful once something names a concrete
//! specialization of it. [`used_instantiations`] finds every such textual use
//! across the whole document universe; [`materialize`] turns one use into a
//! concrete class declaration by substituting the arguments into the generic's
//! member and parent declarations.

use dox2mpi_core::{
    Cardinality, DocSource, MemberDecl, TemplateName, canonical_name, substitute_params,
};

/// Every concrete argument list `generic` is used with, one entry per textual
/// occurrence across all member types and base-class references.
///
/// Occurrences nested inside other argument lists are found too. Scan order,
/// no deduplication; callers needing uniqueness dedup explicitly.
pub fn used_instantiations(source: &impl DocSource, generic: &str) -> Vec<Vec<String>> {
    let mut uses = Vec::new();
    for class in source.class_names() {
        let Ok(members) = source.members(&class) else {
            continue;
        };
        for m in &members {
            scan_uses(&m.ty, generic, &mut uses);
        }
        for p in source.parents(&class) {
            scan_uses(&p, generic, &mut uses);
        }
    }
    uses
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Collect the argument lists of identifier-boundary `generic<…>` occurrences
/// within `text`.
fn scan_uses(text: &str, generic: &str, out: &mut Vec<Vec<String>>) {
    if generic.is_empty() {
        return;
    }
    let mut offset = 0usize;
    while let Some(found) = text[offset..].find(generic) {
        let at = offset + found;
        offset = at + generic.len();

        let boundary_before = at == 0 || !text[..at].chars().next_back().is_some_and(is_ident_char);
        let after = &text[at + generic.len()..];
        if !boundary_before || !after.trim_start().starts_with('<') {
            continue;
        }
        let Some(close) = matching_close(&text[at..]) else {
            continue;
        };
        if let Some(t) = TemplateName::parse(&text[at..at + close + 1]) {
            out.push(t.args.iter().map(|a| canonical_name(a)).collect());
        }
    }
}

/// Byte index of the `>` matching the first `<` in `s`, if balanced.
fn matching_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// A concrete class built on the fly from a generic declaration.
#[derive(Debug, Clone)]
pub(crate) struct MaterializedClass {
    pub name: String,
    pub members: Vec<MemberDecl>,
    pub parents: Vec<String>,
}

/// Substitute `instantiation`'s arguments into its generic base's declaration.
///
/// Returns `None` unless the base is a declared generic. Formal parameters are
/// replaced in member types, symbolic cardinalities, and parent names.
pub(crate) fn materialize(
    source: &impl DocSource,
    instantiation: &TemplateName,
) -> Option<MaterializedClass> {
    let formals = source.template_parameters(&instantiation.base);
    if formals.is_empty() || !source.contains(&instantiation.base) {
        return None;
    }
    let args = &instantiation.args;

    let members = source
        .members(&instantiation.base)
        .ok()?
        .into_iter()
        .map(|m| {
            let ty = substitute_params(&m.ty, &formals, args);
            let cardinality = match m.cardinality {
                Cardinality::Expr(e) => {
                    Cardinality::from_token(&substitute_params(&e, &formals, args))
                }
                literal => literal,
            };
            MemberDecl::new(m.name, ty, cardinality)
        })
        .collect();

    let parents = source
        .parents(&instantiation.base)
        .into_iter()
        .map(|p| substitute_params(&p, &formals, args))
        .collect();

    Some(MaterializedClass {
        name: instantiation.canonical(),
        members,
        parents,
    })
}
