use std::fmt::Write;

use dox2mpi::{Cardinality, ResolvedForest};

/// Render a resolved forest in topological order, one class block per entry.
pub fn format_forest(forest: &ResolvedForest) -> String {
    let mut out = String::new();
    for (idx, class) in forest.order.iter().enumerate() {
        let id = forest.datatypes.id(class).unwrap_or("<unregistered>");
        let header = forest.headers[idx].display();
        let _ = writeln!(out, "{class} -> {id} ({header})");

        if let Some(resolved) = forest.classes.get(class) {
            for member in resolved.iter() {
                match &member.cardinality {
                    Cardinality::Literal(1) => {
                        let _ = writeln!(out, "  {}: {}", member.name, member.datatype);
                    }
                    c => {
                        let _ = writeln!(out, "  {}: {} x {c}", member.name, member.datatype);
                    }
                }
            }
        }
        if let Some(parents) = forest.parents.get(class) {
            if !parents.is_empty() {
                let _ = writeln!(out, "  : {}", parents.join(", "));
            }
        }
    }
    out
}
