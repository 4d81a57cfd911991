//! Multi-section declaration bundle parsing.
//!
//! A bundle concatenates the declarations of several headers with `====`
//! separator lines. Each section starts with an `HDR: <path>` line naming the
//! source header; everything after it until the next separator is the
//! declaration body. For example:
//!
//! ```text
//! ================================================================================
//! HDR: src/car.h
//! class Car {
//!   Engine engine;
//! };
//! ================================================================================
//! HDR: src/engine.h
//! class Engine { double capacity; };
//! ```

use std::path::PathBuf;

use crate::{
    error::DeclError,
    lex::is_separator_line,
};

/// One header's worth of declarations extracted from a bundle.
#[derive(Debug, Clone)]
pub struct DeclSection {
    /// Path from the `HDR: <path>` header line.
    pub header: PathBuf,
    /// Raw declaration body (everything after the header line).
    pub body: String,
}

/// A parsed collection of [`DeclSection`]s from one bundle text.
#[derive(Debug, Clone)]
pub struct DeclBundle {
    pub sections: Vec<DeclSection>,
}

impl DeclBundle {
    /// Split bundle text into sections at separator lines.
    ///
    /// Returns an error if no sections are found or a section lacks its
    /// `HDR:` header.
    pub fn parse(text: &str) -> Result<Self, DeclError> {
        let mut sections = Vec::new();
        let mut buf: Vec<String> = Vec::new();

        for line in text.lines() {
            if is_separator_line(line) {
                if has_meaningful_lines(&buf) {
                    sections.push(parse_section(&buf)?);
                }
                buf.clear();
                continue;
            }
            buf.push(line.to_string());
        }
        if has_meaningful_lines(&buf) {
            sections.push(parse_section(&buf)?);
        }

        if sections.is_empty() {
            return Err("no declaration sections found".into());
        }

        Ok(Self { sections })
    }
}

fn has_meaningful_lines(lines: &[String]) -> bool {
    lines.iter().any(|l| !l.trim().is_empty())
}

/// Parse one accumulated block of lines into a [`DeclSection`].
///
/// The first non-empty line must be an `HDR: <path>` header.
fn parse_section(lines: &[String]) -> Result<DeclSection, DeclError> {
    let mut it = lines.iter().map(|s| s.as_str()).skip_while(|s| s.trim().is_empty());
    let header = it
        .next()
        .ok_or_else(|| DeclError("empty declaration section".to_string()))?
        .trim();
    let path = header
        .strip_prefix("HDR:")
        .ok_or_else(|| DeclError(format!("missing `HDR:` header: {header}")))?
        .trim();
    if path.is_empty() {
        return Err("empty header path in section header".into());
    }

    let body = it.collect::<Vec<_>>().join("\n");
    Ok(DeclSection {
        header: PathBuf::from(path),
        body,
    })
}
