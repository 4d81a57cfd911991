//! Core types for the dox2mpi typemap pipeline.
//!
//! Key components:
//! - [`descriptor`] — class/member declaration model ([`ClassDescriptor`])
//! - [`source`] — the [`DocSource`] query contract and [`MemoryDocSource`]
//! - [`template`] — instantiation-name parsing and canonical spelling
//! - [`datatype`] — MPI naming rules and the per-run [`DatatypeMap`]

mod datatype;
mod descriptor;
mod error;
mod source;
mod template;

pub use datatype::{
    BUILTIN_TYPES, DatatypeEntry, DatatypeMap, ENUM_UNDERLYING, builtin_datatype, is_builtin,
    mpi_datatype,
};
pub use descriptor::{Cardinality, ClassDescriptor, MemberDecl};
pub use error::ResolveError;
pub use source::{DocSource, MemoryDocSource};
pub use template::{TemplateName, canonical_name, substitute_params};
