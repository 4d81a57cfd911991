//! Member-type classification.
//!
//! Every declared member type is classified exactly once per mapping attempt,
//! against a fixed, disjoint, priority-ordered set of categories. The order
//! matters: a builtin name shadows any class of the same name, an enum shadows
//! a resolved class, and only names that fall through everything else are
//! unknown.

use dox2mpi_core::{ENUM_UNDERLYING, TemplateName, builtin_datatype};

use crate::resolver::{ResolutionState, Txn};

/// Category of a member's declared type, in classification priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeClass {
    /// Recognized builtin scalar; carries its MPI identifier.
    Builtin(&'static str),
    /// Declared enum; maps to the underlying-type identifier.
    Enum(&'static str),
    /// Class already resolved (committed or staged); carries its identifier,
    /// partial marker included.
    Resolved(String),
    /// Class awaiting resolution; resolve it now, dependency-first.
    Pending,
    /// Template instantiation that cannot be resolved in this universe.
    Specialization,
    /// Name absent from every other category.
    Unknown,
}

/// Classify `name` against the shared state plus the staged writes of the
/// in-flight transaction.
pub(crate) fn classify(name: &str, state: &ResolutionState, txn: &Txn) -> TypeClass {
    if let Some(id) = builtin_datatype(name) {
        return TypeClass::Builtin(id);
    }
    if state.enums.contains(name) {
        return TypeClass::Enum(ENUM_UNDERLYING);
    }
    if let Some(id) = txn.staged_id(name) {
        return TypeClass::Resolved(id.to_string());
    }
    if let Some(id) = state.datatypes.id(name) {
        return TypeClass::Resolved(id.to_string());
    }
    if state.pending.contains(name) && !txn.is_retired(name) {
        return TypeClass::Pending;
    }
    if TemplateName::parse(name).is_some() {
        return TypeClass::Specialization;
    }
    TypeClass::Unknown
}
