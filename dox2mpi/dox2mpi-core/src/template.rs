//! Template-instantiation name handling.
//!
//! Doxygen and hand-written declarations spell the same instantiation in
//! several ways (`Coord<2>`, `Coord< 2 >`, `Coord<2 >`). Every name entering
//! the resolver's shared state goes through [`canonical_name`] so that all
//! producers and consumers agree on one spelling: `Base<a1,a2 >`.

/// A parsed instantiation name: generic base plus ordered concrete arguments.
///
/// Arguments are opaque strings; nested instantiations stay embedded
/// (`CoordPair<Coord<3 >,Coord<2 > >` has the two `Coord` spellings as
/// arguments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateName {
    pub base: String,
    pub args: Vec<String>,
}

impl TemplateName {
    /// Parse `Base<arg1,arg2>` into base and top-level arguments.
    ///
    /// Returns `None` for plain names, empty bases, and unbalanced brackets.
    /// Arguments are split at top-level commas only and trimmed.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let open = name.find('<')?;
        let base = name[..open].trim();
        if base.is_empty() || !name.ends_with('>') {
            return None;
        }

        let inner = &name[open + 1..name.len() - 1];
        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        for (i, ch) in inner.char_indices() {
            match ch {
                '<' => depth += 1,
                '>' => depth = depth.checked_sub(1)?,
                ',' if depth == 0 => {
                    args.push(inner[start..i].trim().to_string());
                    start = i + 1;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return None;
        }
        args.push(inner[start..].trim().to_string());
        if args.iter().any(String::is_empty) {
            return None;
        }

        Some(Self {
            base: base.to_string(),
            args,
        })
    }

    /// The canonical spelling, with nested instantiation arguments
    /// canonicalized as well.
    pub fn canonical(&self) -> String {
        let args: Vec<String> = self.args.iter().map(|a| canonical_name(a)).collect();
        format!("{}<{} >", self.base, args.join(","))
    }
}

impl std::fmt::Display for TemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Canonicalize a type name: instantiations are reformatted to the canonical
/// spelling, plain names are merely trimmed.
pub fn canonical_name(name: &str) -> String {
    match TemplateName::parse(name) {
        Some(t) => t.canonical(),
        None => name.trim().to_string(),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace whole-identifier occurrences of formal template parameters with the
/// matching concrete argument, then canonicalize the result.
///
/// Used when materializing an instantiation from its generic declaration:
/// `Coord<DIM >` with `DIM -> 2` becomes `Coord<2 >`.
pub fn substitute_params(text: &str, formals: &[String], args: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        if is_ident_char(first) {
            let end = rest.find(|c| !is_ident_char(c)).unwrap_or(rest.len());
            let ident = &rest[..end];
            match formals.iter().position(|f| f == ident) {
                Some(slot) if slot < args.len() => out.push_str(&args[slot]),
                _ => out.push_str(ident),
            }
            rest = &rest[end..];
        } else {
            out.push(first);
            rest = &rest[first.len_utf8()..];
        }
    }
    canonical_name(&out)
}
