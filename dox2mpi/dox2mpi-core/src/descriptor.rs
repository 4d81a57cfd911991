//! Class declaration model shared between the documentation source and the
//! resolver.
//!
//! A [`ClassDescriptor`] is fetched lazily from a [`DocSource`](crate::DocSource)
//! for exactly one resolution run and never persisted.

use std::{
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

/// Declared element count of a member.
///
/// Either an integer literal or an opaque symbolic expression taken verbatim
/// from the declaration (e.g. `Car::NumWheels`). Never evaluated; the resolver
/// forwards it unchanged into the resolved snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cardinality {
    Literal(u64),
    Expr(String),
}

impl Cardinality {
    /// Cardinality of a plain (non-array) member.
    pub fn scalar() -> Self {
        Self::Literal(1)
    }

    /// Parse an array-size token: digits become a literal, anything else stays
    /// an opaque expression.
    pub fn from_token(token: &str) -> Self {
        let t = token.trim();
        match t.parse::<u64>() {
            Ok(n) => Self::Literal(n),
            Err(_) => Self::Expr(t.to_string()),
        }
    }
}

impl Display for Cardinality {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Literal(n) => write!(f, "{n}"),
            Self::Expr(e) => f.write_str(e),
        }
    }
}

/// A single declared member: field name, declared type text, cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: String,
    pub ty: String,
    pub cardinality: Cardinality,
}

impl MemberDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            cardinality,
        }
    }

    /// Scalar member shorthand.
    pub fn scalar(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, ty, Cardinality::scalar())
    }
}

/// One documented class declaration.
///
/// `name` may be an instantiation spelling such as `Coord<2 >`. Members and
/// parents keep declaration order. `template_params` is empty for concrete
/// classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub name: String,
    pub parents: Vec<String>,
    pub members: Vec<MemberDecl>,
    pub template_params: Vec<String>,
    pub header: PathBuf,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, header: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            members: Vec::new(),
            template_params: Vec::new(),
            header: header.into(),
        }
    }

    pub fn member(mut self, name: impl Into<String>, ty: impl Into<String>, c: Cardinality) -> Self {
        self.members.push(MemberDecl::new(name, ty, c));
        self
    }

    pub fn parent(mut self, name: impl Into<String>) -> Self {
        self.parents.push(name.into());
        self
    }

    pub fn template_param(mut self, name: impl Into<String>) -> Self {
        self.template_params.push(name.into());
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.template_params.is_empty()
    }
}
