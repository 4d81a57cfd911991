//! The documentation-source query contract and its in-memory implementation.
//!
//! The resolver only ever *reads* declarations; where they come from (doxygen
//! XML, a declaration bundle, a test fixture) is behind [`DocSource`].

use std::{collections::HashMap, path::PathBuf};

use crate::{
    descriptor::{ClassDescriptor, MemberDecl},
    error::ResolveError,
    template::canonical_name,
};

/// Read-only lookups over one documented class universe.
///
/// All names handed in and out are canonical spellings (see
/// [`canonical_name`]).
pub trait DocSource {
    /// Every class name declared in the universe.
    fn class_names(&self) -> Vec<String>;

    /// Ordered member declarations of `class`.
    fn members(&self, class: &str) -> Result<Vec<MemberDecl>, ResolveError>;

    /// Ordered base-class names of `class`; empty if none or unknown.
    fn parents(&self, class: &str) -> Vec<String>;

    /// Ordered formal template parameter names; empty if not generic.
    fn template_parameters(&self, class: &str) -> Vec<String>;

    /// Every enum type name declared in the universe.
    fn enum_names(&self) -> Vec<String>;

    /// Source file the class was declared in.
    fn header(&self, class: &str) -> Option<PathBuf>;

    fn contains(&self, class: &str) -> bool {
        self.class_names().iter().any(|c| c == class)
    }
}

/// [`DocSource`] backed by descriptors held in memory.
///
/// Used by the declaration-bundle parser and by tests; class names are
/// canonicalized on insertion.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocSource {
    order: Vec<String>,
    classes: HashMap<String, ClassDescriptor>,
    enums: Vec<String>,
}

impl MemoryDocSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class declaration. A redeclared name replaces the earlier
    /// descriptor but keeps its position.
    pub fn insert(&mut self, mut descriptor: ClassDescriptor) {
        let name = canonical_name(&descriptor.name);
        descriptor.name = name.clone();
        if self.classes.insert(name.clone(), descriptor).is_none() {
            self.order.push(name);
        }
    }

    pub fn insert_enum(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.enums.contains(&name) {
            self.enums.push(name);
        }
    }

    pub fn descriptor(&self, class: &str) -> Option<&ClassDescriptor> {
        self.classes.get(class)
    }
}

impl DocSource for MemoryDocSource {
    fn class_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn members(&self, class: &str) -> Result<Vec<MemberDecl>, ResolveError> {
        self.classes
            .get(class)
            .map(|d| d.members.clone())
            .ok_or_else(|| ResolveError::ClassNotFound(class.to_string()))
    }

    fn parents(&self, class: &str) -> Vec<String> {
        self.classes
            .get(class)
            .map(|d| d.parents.clone())
            .unwrap_or_default()
    }

    fn template_parameters(&self, class: &str) -> Vec<String> {
        self.classes
            .get(class)
            .map(|d| d.template_params.clone())
            .unwrap_or_default()
    }

    fn enum_names(&self) -> Vec<String> {
        self.enums.clone()
    }

    fn header(&self, class: &str) -> Option<PathBuf> {
        self.classes.get(class).map(|d| d.header.clone())
    }

    fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }
}
