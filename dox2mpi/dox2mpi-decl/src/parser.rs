//! Line-based parser for C++-style declaration bodies.
//!
//! Supported declarations:
//!
//! - `class Name : Parent1, Parent2 { … };` (also `struct`)
//! - declared instantiations: `class Coord<2 > { … };`
//! - `template<A, B>` prefixes, on their own line or inline before `class`
//! - `enum Name;` and `enum Name { … };` (variants are not recorded)
//! - members: `Type field;` and `Type field[N];` where `N` is an integer
//!   literal or an opaque expression
//!
//! Member lines split the declared type from the field name at the trailing
//! identifier, which keeps multi-word scalar types (`unsigned long long x;`)
//! and instantiation types (`Coord<2 > pos;`) intact.

use std::path::Path;

use dox2mpi_core::{Cardinality, ClassDescriptor, MemberDecl, MemoryDocSource};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1, char, space0},
    combinator::{map, recognize, value},
    multi::many0,
    sequence::{pair, tuple},
};

use crate::{
    error::DeclError,
    lex::{is_ident_char, split_top_level, strip_line_comments},
};

/// Parse one section body, registering every declaration with `out` under the
/// section's header path.
pub fn parse_decl_section(
    body: &str,
    header: &Path,
    out: &mut MemoryDocSource,
) -> Result<(), DeclError> {
    let mut pending_template: Option<Vec<String>> = None;
    let mut current: Option<ClassDescriptor> = None;
    let mut in_enum = false;

    for (idx, raw) in body.lines().enumerate() {
        let line_no = idx + 1;
        let mut line = strip_line_comments(raw).trim();
        if line.is_empty() {
            continue;
        }

        if in_enum {
            if line == "};" || line == "}" {
                in_enum = false;
            }
            continue;
        }

        if line == "};" || line == "}" {
            match current.take() {
                Some(class) => out.insert(class),
                None => {
                    return Err(format!("unmatched closing brace at line {line_no}").into());
                }
            }
            continue;
        }

        if let Some(class) = current.as_mut() {
            let member = parse_member(line)
                .map_err(|e| DeclError(format!("parse error at line {line_no}: {e}")))?;
            class.members.push(member);
            continue;
        }

        if let Ok((rest, formals)) = template_decl(line) {
            if pending_template.is_some() {
                return Err(format!("duplicate template prefix at line {line_no}: {line}").into());
            }
            pending_template = Some(formals);
            line = rest.trim();
            if line.is_empty() {
                continue;
            }
        }

        if let Some((name, parents)) = parse_class_open(line)
            .map_err(|e| DeclError(format!("parse error at line {line_no}: {e}")))?
        {
            let mut descriptor = ClassDescriptor::new(name, header);
            descriptor.parents = parents;
            descriptor.template_params = pending_template.take().unwrap_or_default();
            current = Some(descriptor);
            continue;
        }

        if pending_template.is_some() {
            return Err(format!(
                "template prefix must be followed by a class declaration at line {line_no}: {line}"
            )
            .into());
        }

        if let Ok((_, (name, opened))) = enum_decl(line) {
            out.insert_enum(name);
            in_enum = opened;
            continue;
        }

        return Err(format!("unexpected declaration at line {line_no}: {line}").into());
    }

    if current.is_some() {
        return Err("unclosed class declaration".into());
    }
    if in_enum {
        return Err("unclosed enum declaration".into());
    }
    if pending_template.is_some() {
        return Err("dangling template parameter list".into());
    }
    Ok(())
}

/// Parse an identifier (alphanumeric + underscore, must start with alpha or _)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn ws(input: &str) -> IResult<&str, ()> {
    value((), space0)(input)
}

fn ws1(input: &str) -> IResult<&str, ()> {
    value((), take_while1(|c: char| c.is_whitespace()))(input)
}

/// Parse a `template<A, B>` prefix; returns the formal parameter names and
/// leaves whatever follows (possibly an inline `class …`) unconsumed.
fn template_decl(input: &str) -> IResult<&str, Vec<String>> {
    map(
        tuple((
            tag("template"),
            ws,
            char('<'),
            take_while(|c: char| c != '>'),
            char('>'),
        )),
        |(_, _, _, params, _): (_, _, _, &str, _)| {
            params
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        },
    )(input)
}

/// Parse `class`/`struct` keyword plus mandatory whitespace.
fn class_intro(input: &str) -> IResult<&str, ()> {
    value((), pair(alt((tag("class"), tag("struct"))), ws1))(input)
}

/// Parse enum declaration: `enum Name;` or `enum Name {`.
fn enum_decl(input: &str) -> IResult<&str, (&str, bool)> {
    map(
        tuple((tag("enum"), ws1, identifier, ws, alt((char(';'), char('{'))))),
        |(_, _, name, _, term)| (name, term == '{'),
    )(input)
}

/// Recognize a class-open line and split it into name and parent list.
///
/// The class name may be an instantiation spelling; parents are separated at
/// top-level commas so instantiation bases keep their argument lists.
fn parse_class_open(line: &str) -> Result<Option<(String, Vec<String>)>, DeclError> {
    let Ok((rest, ())) = class_intro(line) else {
        return Ok(None);
    };
    let Some(brace) = rest.find('{') else {
        return Err(format!("class declaration must open a brace: {line}").into());
    };
    let head = rest[..brace].trim();
    let (name, parents) = match find_top_level_colon(head) {
        Some(i) => (head[..i].trim(), split_top_level(&head[i + 1..])),
        None => (head, Vec::new()),
    };
    if name.is_empty() {
        return Err(format!("class declaration lacks a name: {line}").into());
    }
    Ok(Some((name.to_string(), parents)))
}

/// First `:` outside angle brackets that is not part of a `::` scope
/// separator.
fn find_top_level_colon(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => {
                if i + 1 < b.len() && b[i + 1] == b':' {
                    i += 2;
                    continue;
                }
                return Some(i);
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Parse a member declaration: `Type name;` or `Type name[card];`.
fn parse_member(line: &str) -> Result<MemberDecl, DeclError> {
    let body = line
        .strip_suffix(';')
        .ok_or_else(|| DeclError(format!("member declaration must end with ';': {line}")))?
        .trim();

    let (body, cardinality) = match body.strip_suffix(']') {
        Some(prefix) => {
            let open = prefix
                .rfind('[')
                .ok_or_else(|| DeclError(format!("unmatched ']' in member: {line}")))?;
            let token = prefix[open + 1..].trim();
            if token.is_empty() {
                return Err(format!("empty cardinality in member: {line}").into());
            }
            (prefix[..open].trim_end(), Cardinality::from_token(token))
        }
        None => (body, Cardinality::scalar()),
    };

    let name_start = body
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_ident_char(*c))
        .last()
        .map(|(i, _)| i)
        .ok_or_else(|| DeclError(format!("member declaration lacks a field name: {line}")))?;
    let name = &body[name_start..];
    let ty = body[..name_start].trim();
    if ty.is_empty() {
        return Err(format!("member declaration lacks a type: {line}").into());
    }
    match identifier(name) {
        Ok(("", _)) => {}
        _ => return Err(format!("invalid field name '{name}' in member: {line}").into()),
    }

    Ok(MemberDecl::new(name, ty, cardinality))
}
