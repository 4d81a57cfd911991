//! Forest orchestration: transitive closure, fixpoint passes, snapshot
//! assembly.

use std::collections::{BTreeSet, HashSet};

use dox2mpi_core::{DocSource, ResolveError, TemplateName, canonical_name, is_builtin};

use crate::{
    instantiations::{materialize, used_instantiations},
    resolver::{Mode, ResolutionState, resolve_class},
    snapshot::ResolvedForest,
};

/// Resolves a set of root classes together with their full transitive
/// dependency closure.
///
/// The completeness policy is fixed at construction and applies to every
/// forest the resolver produces.
pub struct ForestResolver<'a, S: DocSource> {
    source: &'a S,
    mode: Mode,
}

impl<'a, S: DocSource> ForestResolver<'a, S> {
    pub fn new(source: &'a S, mode: Mode) -> Self {
        Self { source, mode }
    }

    /// Resolve every class reachable from `roots` and assemble the snapshot.
    ///
    /// Fatal conditions abort the whole call; no partial snapshot is ever
    /// returned. The pass loop is bounded by the initial pending-set size: a
    /// full pass that resolves nothing raises
    /// [`ResolveError::NonTerminatingClosure`] with the recorded per-class
    /// failure reasons.
    pub fn resolve_forest<I, T>(&self, roots: I) -> Result<ResolvedForest, ResolveError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut state = ResolutionState::new(self.source);

        let roots: Vec<String> = roots
            .into_iter()
            .map(|r| canonical_name(r.as_ref()))
            .collect();
        for root in &roots {
            if is_builtin(root) || state.enums.contains(root) {
                continue;
            }
            let materializable = TemplateName::parse(root)
                .and_then(|t| materialize(self.source, &t))
                .is_some();
            if !self.source.contains(root) && !materializable {
                return Err(ResolveError::ClassNotFound(root.clone()));
            }
        }
        state.pending = expand_closure(self.source, roots, &state.enums);

        let budget = state.pending.len();
        for _pass in 0..=budget {
            if state.pending.is_empty() {
                break;
            }
            let before = state.pending.len();
            let mut failures: Vec<(String, ResolveError)> = Vec::new();
            for name in state.pending.clone() {
                // One resolution may retire several names at once.
                if !state.pending.contains(&name) {
                    continue;
                }
                if let Err(err) = resolve_class(self.source, self.mode, &mut state, &name) {
                    if self.mode == Mode::Strict {
                        return Err(non_terminating(&state.pending, &[(name, err)]));
                    }
                    failures.push((name, err));
                }
            }
            if state.pending.len() == before {
                return Err(non_terminating(&state.pending, &failures));
            }
        }
        if !state.pending.is_empty() {
            return Err(non_terminating(&state.pending, &[]));
        }

        self.assemble(state)
    }

    fn assemble(&self, state: ResolutionState) -> Result<ResolvedForest, ResolveError> {
        let mut headers = Vec::with_capacity(state.order.len());
        for name in &state.order {
            // A materialized specialization reports its generic's header.
            let header = self
                .source
                .header(name)
                .or_else(|| TemplateName::parse(name).and_then(|t| self.source.header(&t.base)))
                .ok_or_else(|| ResolveError::ClassNotFound(name.clone()))?;
            headers.push(header);
        }
        Ok(ResolvedForest {
            classes: state.classes,
            parents: state.parents,
            datatypes: state.datatypes,
            order: state.order,
            headers,
        })
    }
}

/// Every class reachable from any declared class in the whole universe.
///
/// Validation/tooling utility; the orchestrator does not use it.
pub fn all_reachable_classes(source: &impl DocSource) -> BTreeSet<String> {
    let enums: HashSet<String> = source.enum_names().into_iter().collect();
    let seeds = source
        .class_names()
        .iter()
        .map(|c| canonical_name(c))
        .collect();
    expand_closure(source, seeds, &enums)
}

/// Expand `seeds` under member-type and parent edges.
///
/// Declared classes expand through their descriptors; a bare generic
/// contributes its used specializations instead of its formal-parameter
/// member text; an undeclared specialization of a declared generic is
/// materialized and expanded. Any other undeclared name is left out and
/// surfaces as `UnknownType` during resolution.
fn expand_closure(
    source: &impl DocSource,
    seeds: Vec<String>,
    enums: &HashSet<String>,
) -> BTreeSet<String> {
    let mut pending = BTreeSet::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: Vec<String> = seeds;

    while let Some(name) = queue.pop() {
        if !seen.insert(name.clone()) {
            continue;
        }
        if is_builtin(&name) || enums.contains(&name) {
            continue;
        }

        if source.contains(&name) {
            pending.insert(name.clone());
            let bare_generic = !source.template_parameters(&name).is_empty()
                && TemplateName::parse(&name).is_none();
            if bare_generic {
                for args in used_instantiations(source, &name) {
                    let t = TemplateName {
                        base: name.clone(),
                        args,
                    };
                    queue.push(t.canonical());
                }
                continue;
            }
            if let Ok(members) = source.members(&name) {
                for m in members {
                    queue.push(canonical_name(&m.ty));
                }
            }
            for p in source.parents(&name) {
                queue.push(canonical_name(&p));
            }
            continue;
        }

        if let Some(t) = TemplateName::parse(&name) {
            if let Some(inst) = materialize(source, &t) {
                pending.insert(name);
                for m in inst.members {
                    queue.push(canonical_name(&m.ty));
                }
                for p in inst.parents {
                    queue.push(p);
                }
            }
        }
    }

    pending
}

fn non_terminating(
    pending: &BTreeSet<String>,
    failures: &[(String, ResolveError)],
) -> ResolveError {
    ResolveError::NonTerminatingClosure {
        stuck: pending.iter().cloned().collect(),
        reasons: failures
            .iter()
            .map(|(name, err)| format!("{name}: {err}"))
            .collect(),
    }
}
