//! Turns documented C++ class graphs into dependency-ordered MPI typemap
//! registrations.
//!
//! The pipeline: a [`DocSource`] answers declaration queries (here backed by
//! declaration bundles via [`parse_bundle`]), the [`ForestResolver`] computes
//! the transitive closure of the requested roots and resolves every class
//! dependency-first, and the resulting [`ResolvedForest`] snapshot (resolved
//! members, parents, datatype registry, topological order, aligned headers)
//! drives the downstream typemap generator.

mod error;

pub use dox2mpi_core::{
    BUILTIN_TYPES, Cardinality, ClassDescriptor, DatatypeEntry, DatatypeMap, DocSource,
    ENUM_UNDERLYING, MemberDecl, MemoryDocSource, ResolveError, TemplateName, builtin_datatype,
    canonical_name, is_builtin, mpi_datatype, substitute_params,
};
pub use dox2mpi_decl::{DeclBundle, DeclError, DeclSection, parse_bundle, parse_decl_section};
pub use dox2mpi_resolve::{
    ForestResolver, Mode, ResolutionState, ResolvedClass, ResolvedForest, ResolvedMember,
    all_reachable_classes, resolve_class, resolve_direct, used_instantiations,
};
pub use error::PipelineError;

/// Parse a declaration bundle and resolve the forest rooted at `roots` in one
/// step.
///
/// When `roots` is empty, every class declared in the bundle becomes a root.
pub fn resolve_decl_str(
    text: &str,
    roots: &[String],
    mode: Mode,
) -> Result<ResolvedForest, PipelineError> {
    let source = parse_bundle(text)?;
    let roots = if roots.is_empty() {
        source.class_names()
    } else {
        roots.to_vec()
    };
    let forest = ForestResolver::new(&source, mode).resolve_forest(roots)?;
    Ok(forest)
}
