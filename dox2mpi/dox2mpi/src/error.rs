//! Combined error for the parse-then-resolve convenience path.

use dox2mpi_core::ResolveError;
use dox2mpi_decl::DeclError;

/// Error from [`resolve_decl_str`](crate::resolve_decl_str).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The declaration bundle could not be parsed.
    #[error("failed to parse declaration bundle: {0}")]
    Decl(#[from] DeclError),

    /// The class forest could not be resolved.
    #[error("failed to resolve class forest: {0}")]
    Resolve(#[from] ResolveError),
}
