//! Error taxonomy for class-graph resolution.

/// Error raised while resolving a class forest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The documentation source has no declaration for the requested class.
    #[error("class '{0}' is not documented in the source")]
    ClassNotFound(String),

    /// A member's declared type is neither a builtin, a declared enum, nor a
    /// declared class. Fatal for the enclosing class in both modes.
    #[error("member '{member}' of '{class}' has unknown type '{ty}'")]
    UnknownType {
        class: String,
        member: String,
        ty: String,
    },

    /// A member refers to a specialization that cannot be resolved. Fatal for
    /// the enclosing class in strict mode; the member is dropped and the class
    /// marked partial in lenient mode.
    #[error("member '{member}' of '{class}' depends on unresolvable type '{ty}'")]
    UnresolvedDependency {
        class: String,
        member: String,
        ty: String,
    },

    /// A member or parent chain leads back to a class currently being
    /// resolved.
    #[error("dependency cycle: {}", chain.join(" -> "))]
    DependencyCycle { chain: Vec<String> },

    /// A full pass over the pending set resolved nothing; the remaining
    /// classes form a cycle or depend on something permanently missing.
    #[error("cannot resolve remaining classes [{}]: {}", stuck.join(", "), reasons.join("; "))]
    NonTerminatingClosure {
        stuck: Vec<String>,
        reasons: Vec<String>,
    },
}
