//! Dependency-ordered resolution of a documented class graph into MPI
//! datatype registrations.
//!
//! # Pipeline
//!
//! ```text
//! DocSource (declarations)
//!   └─ ForestResolver::resolve_forest  – closure of the requested roots
//!       └─ resolve_class               – depth-first, transactional, per class
//!           ├─ classify                – builtin / enum / resolved / pending / …
//!           └─ used_instantiations     – concrete uses of a generic class
//!               └─ ResolvedForest      – classes, parents, datatypes, order, headers
//! ```
//!
//! Resolution is single-threaded and wholly in-memory; all mutable state lives
//! for exactly one [`ForestResolver::resolve_forest`] call.

mod classify;
mod forest;
mod instantiations;
mod resolver;
mod snapshot;

pub use forest::{ForestResolver, all_reachable_classes};
pub use instantiations::used_instantiations;
pub use resolver::{Mode, ResolutionState, resolve_class, resolve_direct};
pub use snapshot::{ResolvedClass, ResolvedForest, ResolvedMember};
