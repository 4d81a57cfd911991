//! Declaration-bundle front end for `dox2mpi`.
//!
//! # Pipeline
//!
//! ```text
//! bundle text (UTF-8)
//!   └─ DeclBundle::parse       – split sections at `====` separators
//!       └─ parse_decl_section  – class/enum/template declarations per header
//!           └─ MemoryDocSource – ready for forest resolution
//! ```

mod bundle;
mod error;
mod lex;
mod parser;

use dox2mpi_core::MemoryDocSource;

pub use bundle::{DeclBundle, DeclSection};
pub use error::DeclError;
pub use parser::parse_decl_section;

/// Parse a whole declaration bundle into a documentation source.
pub fn parse_bundle(text: &str) -> Result<MemoryDocSource, DeclError> {
    let bundle = DeclBundle::parse(text)?;
    let mut source = MemoryDocSource::new();
    for section in &bundle.sections {
        parse_decl_section(&section.body, &section.header, &mut source).map_err(|e| {
            DeclError(format!(
                "while parsing declarations for '{}': {e}",
                section.header.display()
            ))
        })?;
    }
    Ok(source)
}
