//! MPI datatype naming and the per-run datatype registry.
//!
//! The mapping rules are:
//!
//! | C++ type                  | MPI identifier                  |
//! |---------------------------|---------------------------------|
//! | builtin scalar            | fixed table entry               |
//! | enum                      | underlying `int` mapping        |
//! | user class `Car`          | `MPI::CAR`                      |
//! | instantiation `Coord<3 >` | `MPI::COORD_3_`                 |
//! | partially resolved class  | same, with a `_PARTIAL` suffix  |

use std::collections::HashMap;

/// Fixed builtin table: C++ scalar type name → MPI datatype identifier.
pub const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("bool", "MPI::BOOL"),
    ("char", "MPI::CHAR"),
    ("signed char", "MPI::SIGNED_CHAR"),
    ("unsigned char", "MPI::UNSIGNED_CHAR"),
    ("short", "MPI::SHORT"),
    ("unsigned short", "MPI::UNSIGNED_SHORT"),
    ("int", "MPI::INT"),
    ("unsigned", "MPI::UNSIGNED"),
    ("unsigned int", "MPI::UNSIGNED"),
    ("long", "MPI::LONG"),
    ("unsigned long", "MPI::UNSIGNED_LONG"),
    ("long long", "MPI::LONG_LONG"),
    ("unsigned long long", "MPI::UNSIGNED_LONG_LONG"),
    ("float", "MPI::FLOAT"),
    ("double", "MPI::DOUBLE"),
    ("long double", "MPI::LONG_DOUBLE"),
    ("size_t", "MPI::UNSIGNED_LONG"),
    ("std::size_t", "MPI::UNSIGNED_LONG"),
];

/// MPI identifier every enum maps to (C++ enums marshal as their underlying
/// `int`).
pub const ENUM_UNDERLYING: &str = "MPI::INT";

pub fn is_builtin(name: &str) -> bool {
    builtin_datatype(name).is_some()
}

pub fn builtin_datatype(name: &str) -> Option<&'static str> {
    BUILTIN_TYPES
        .iter()
        .find(|(cpp, _)| *cpp == name)
        .map(|(_, mpi)| *mpi)
}

/// Derive the MPI identifier for a user class name.
///
/// Every run of separator characters (whitespace, `:`, `<`, `>`, `,`) collapses
/// to a single underscore, the result is uppercased and prefixed with `MPI::`;
/// `partial` appends the `_PARTIAL` marker.
pub fn mpi_datatype(class: &str, partial: bool) -> String {
    let mut id = String::with_capacity(class.len() + 16);
    id.push_str("MPI::");
    let mut in_sep = false;
    for ch in class.trim().chars() {
        if ch.is_whitespace() || matches!(ch, ':' | '<' | '>' | ',') {
            if !in_sep {
                id.push('_');
                in_sep = true;
            }
        } else {
            in_sep = false;
            id.extend(ch.to_uppercase());
        }
    }
    if partial {
        id.push_str("_PARTIAL");
    }
    id
}

/// One registry entry: the final identifier (partial marker already applied)
/// and whether members were dropped while resolving the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatatypeEntry {
    pub id: String,
    pub partial: bool,
}

impl DatatypeEntry {
    pub fn full(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            partial: false,
        }
    }
}

/// Per-run registry mapping type names to MPI identifiers.
///
/// Seeded with [`BUILTIN_TYPES`] plus one entry per declared enum; grows by
/// exactly one entry per resolved class. Entries are never rewritten once
/// inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatatypeMap {
    entries: HashMap<String, DatatypeEntry>,
}

impl DatatypeMap {
    /// Registry holding only the builtin table.
    pub fn new() -> Self {
        let entries = BUILTIN_TYPES
            .iter()
            .map(|(cpp, mpi)| (cpp.to_string(), DatatypeEntry::full(*mpi)))
            .collect();
        Self { entries }
    }

    /// Registry seeded with builtins plus the underlying-type mapping of every
    /// name in `enums`.
    pub fn with_enums<'a>(enums: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map = Self::new();
        for name in enums {
            map.insert(name, DatatypeEntry::full(ENUM_UNDERLYING));
        }
        map
    }

    pub fn get(&self, name: &str) -> Option<&DatatypeEntry> {
        self.entries.get(name)
    }

    pub fn id(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.id.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert a new entry. Existing entries are left untouched; the resolver
    /// treats an already-registered class as resolved before it gets here.
    pub fn insert(&mut self, name: &str, entry: DatatypeEntry) {
        self.entries.entry(name.to_string()).or_insert(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatatypeEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for DatatypeMap {
    fn default() -> Self {
        Self::new()
    }
}
