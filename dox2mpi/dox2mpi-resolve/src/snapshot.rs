//! The immutable result of one forest resolution.

use std::{collections::HashMap, path::PathBuf};

use dox2mpi_core::{Cardinality, DatatypeMap};

/// A member with its declared type replaced by the MPI datatype identifier.
///
/// The cardinality is forwarded verbatim from the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    pub name: String,
    pub datatype: String,
    pub cardinality: Cardinality,
}

/// Ordered resolved members of one class: only directly declared members,
/// inherited fields are never copied in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedClass(pub Vec<ResolvedMember>);

impl ResolvedClass {
    pub fn new(members: Vec<ResolvedMember>) -> Self {
        Self(members)
    }

    pub fn get(&self, member: &str) -> Option<&ResolvedMember> {
        self.0.iter().find(|m| m.name == member)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedMember> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Snapshot produced by a successful forest resolution.
///
/// `order` is a valid topological order: every class appears after everything
/// its members or parents depend on. `headers` is aligned index-for-index
/// with `order`.
#[derive(Debug, Clone)]
pub struct ResolvedForest {
    pub classes: HashMap<String, ResolvedClass>,
    pub parents: HashMap<String, Vec<String>>,
    pub datatypes: DatatypeMap,
    pub order: Vec<String>,
    pub headers: Vec<PathBuf>,
}

impl ResolvedForest {
    /// Position of `class` within the topological order.
    pub fn position(&self, class: &str) -> Option<usize> {
        self.order.iter().position(|c| c == class)
    }
}
