//! Single-class resolution against the shared per-run state.
//!
//! The resolver walks one class's dependency graph depth-first with an
//! explicit frame stack (no host recursion) and three-color marking: names in
//! `pending` are unvisited, names on the `grey` stack are in progress, names
//! with a committed datatype entry are done. A grey dependency is a cycle and
//! fails the call with the precise chain.
//!
//! All writes are staged in a [`Txn`] and committed only when the whole call
//! succeeds; a failed call leaves every piece of shared state untouched.

use std::collections::{BTreeSet, HashMap, HashSet};

use dox2mpi_core::{
    DatatypeEntry, DatatypeMap, DocSource, MemberDecl, ResolveError, TemplateName, canonical_name,
    mpi_datatype,
};

use crate::{
    classify::{TypeClass, classify},
    instantiations::{MaterializedClass, materialize, used_instantiations},
    snapshot::{ResolvedClass, ResolvedMember},
};

/// Completeness policy, fixed for a resolver's lifetime.
///
/// Strict fails a class on the first unresolvable member; lenient drops the
/// member and marks the class's datatype entry partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Strict,
    Lenient,
}

/// Mutable state shared by every resolution within one forest run.
///
/// `pending` shrinks only on successful resolution; `datatypes` entries are
/// never rewritten; `order` grows post-order, which makes it a valid
/// topological order by construction.
#[derive(Debug, Clone)]
pub struct ResolutionState {
    pub pending: BTreeSet<String>,
    pub enums: HashSet<String>,
    pub datatypes: DatatypeMap,
    pub classes: HashMap<String, ResolvedClass>,
    pub parents: HashMap<String, Vec<String>>,
    pub order: Vec<String>,
}

impl ResolutionState {
    /// Empty state with the datatype registry seeded from `source`'s builtin
    /// and enum universe.
    pub fn new(source: &impl DocSource) -> Self {
        let enums: HashSet<String> = source.enum_names().into_iter().collect();
        let datatypes = DatatypeMap::with_enums(enums.iter().map(String::as_str));
        Self {
            pending: BTreeSet::new(),
            enums,
            datatypes,
            classes: HashMap::new(),
            parents: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn is_resolved(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }
}

/// Staged writes of one in-flight resolution call.
#[derive(Debug, Default)]
pub(crate) struct Txn {
    types: Vec<(String, DatatypeEntry)>,
    classes: Vec<(String, ResolvedClass)>,
    parents: Vec<(String, Vec<String>)>,
    order: Vec<String>,
    retired: BTreeSet<String>,
}

impl Txn {
    pub(crate) fn staged_id(&self, name: &str) -> Option<&str> {
        self.types
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e.id.as_str())
    }

    pub(crate) fn is_retired(&self, name: &str) -> bool {
        self.retired.contains(name)
    }

    fn is_resolved(&self, state: &ResolutionState, name: &str) -> bool {
        state.is_resolved(name) || self.classes.iter().any(|(n, _)| n == name)
    }

    fn commit(self, state: &mut ResolutionState) {
        for (name, entry) in self.types {
            state.datatypes.insert(&name, entry);
        }
        for (name, class) in self.classes {
            state.classes.insert(name, class);
        }
        for (name, parents) in self.parents {
            state.parents.insert(name, parents);
        }
        state.order.extend(self.order);
        for name in self.retired {
            state.pending.remove(&name);
        }
    }
}

struct ClassFrame {
    name: String,
    members: Vec<MemberDecl>,
    parents: Vec<String>,
    parent_idx: usize,
    member_idx: usize,
    resolved: Vec<ResolvedMember>,
    partial: bool,
}

impl ClassFrame {
    fn new(name: String, members: Vec<MemberDecl>, parents: Vec<String>) -> Self {
        Self {
            name,
            members,
            parents,
            parent_idx: 0,
            member_idx: 0,
            resolved: Vec::new(),
            partial: false,
        }
    }
}

struct GenericFrame {
    name: String,
    insts: Vec<MaterializedClass>,
    idx: usize,
}

enum Frame {
    Class(ClassFrame),
    Generic(GenericFrame),
}

impl Frame {
    fn name(&self) -> &str {
        match self {
            Frame::Class(f) => &f.name,
            Frame::Generic(g) => &g.name,
        }
    }

    fn commit(self, txn: &mut Txn) {
        match self {
            Frame::Class(f) => {
                let entry = DatatypeEntry {
                    id: mpi_datatype(&f.name, f.partial),
                    partial: f.partial,
                };
                txn.types.push((f.name.clone(), entry));
                txn.classes.push((f.name.clone(), ResolvedClass::new(f.resolved)));
                txn.parents.push((f.name.clone(), f.parents));
                txn.order.push(f.name.clone());
                txn.retired.insert(f.name);
            }
            // An uninstantiated template has nothing to register; it merely
            // leaves the pending set once its specializations are handled.
            Frame::Generic(g) => {
                txn.retired.insert(g.name);
            }
        }
    }
}

enum Step {
    /// Resolve this dependency next, then revisit the current frame.
    Descend(String),
    /// Resolve a materialized specialization with supplied members.
    DescendDirect(MaterializedClass),
    /// Current frame is complete; commit it to the transaction.
    Finished,
}

/// Resolve `name` against `state`: fetch or materialize its declaration,
/// resolve dependencies depth-first, map members, and commit atomically.
///
/// Resolving an already-resolved name is a no-op.
pub fn resolve_class<S: DocSource>(
    source: &S,
    mode: Mode,
    state: &mut ResolutionState,
    name: &str,
) -> Result<(), ResolveError> {
    let name = canonical_name(name);
    if state.is_resolved(&name) {
        return Ok(());
    }
    let frame = build_frame(source, &name)?;
    run(source, mode, state, frame)
}

/// Resolve a class whose concrete members are supplied directly instead of
/// looked up, the path taken for specializations materialized on the fly.
pub fn resolve_direct<S: DocSource>(
    source: &S,
    mode: Mode,
    state: &mut ResolutionState,
    name: &str,
    members: Vec<MemberDecl>,
    parents: Vec<String>,
) -> Result<(), ResolveError> {
    let name = canonical_name(name);
    if state.is_resolved(&name) {
        return Ok(());
    }
    let parents = parents.iter().map(|p| canonical_name(p)).collect();
    run(
        source,
        mode,
        state,
        Frame::Class(ClassFrame::new(name, members, parents)),
    )
}

fn run<S: DocSource>(
    source: &S,
    mode: Mode,
    state: &mut ResolutionState,
    initial: Frame,
) -> Result<(), ResolveError> {
    let mut txn = Txn::default();
    let mut grey: Vec<String> = vec![initial.name().to_string()];
    let mut stack: Vec<Frame> = vec![initial];

    while let Some(top) = stack.last_mut() {
        match advance(top, mode, state, &txn, &grey)? {
            Step::Finished => {
                let frame = stack.pop().expect("frame stack cannot be empty here");
                grey.pop();
                frame.commit(&mut txn);
            }
            Step::Descend(dep) => {
                let child = build_frame(source, &dep)?;
                grey.push(dep);
                stack.push(child);
            }
            Step::DescendDirect(inst) => {
                grey.push(inst.name.clone());
                stack.push(Frame::Class(ClassFrame::new(
                    inst.name,
                    inst.members,
                    inst.parents,
                )));
            }
        }
    }

    txn.commit(state);
    Ok(())
}

/// Drive `frame` until it needs a dependency resolved or is complete.
fn advance(
    frame: &mut Frame,
    mode: Mode,
    state: &ResolutionState,
    txn: &Txn,
    grey: &[String],
) -> Result<Step, ResolveError> {
    match frame {
        Frame::Class(f) => {
            // Parents first. Only parents awaiting resolution are driven;
            // undeclared bases are outside the resolvable universe and do not
            // gate the class itself.
            while f.parent_idx < f.parents.len() {
                let parent = f.parents[f.parent_idx].clone();
                f.parent_idx += 1;
                if let TypeClass::Pending = classify(&parent, state, txn) {
                    if grey.contains(&parent) {
                        return Err(cycle_error(grey, &parent));
                    }
                    return Ok(Step::Descend(parent));
                }
            }

            while f.member_idx < f.members.len() {
                let member = f.members[f.member_idx].clone();
                let ty = canonical_name(&member.ty);
                match classify(&ty, state, txn) {
                    TypeClass::Builtin(id) | TypeClass::Enum(id) => {
                        f.resolved.push(ResolvedMember {
                            name: member.name,
                            datatype: id.to_string(),
                            cardinality: member.cardinality,
                        });
                        f.member_idx += 1;
                    }
                    TypeClass::Resolved(id) => {
                        f.resolved.push(ResolvedMember {
                            name: member.name,
                            datatype: id,
                            cardinality: member.cardinality,
                        });
                        f.member_idx += 1;
                    }
                    TypeClass::Pending => {
                        if grey.contains(&ty) {
                            return Err(cycle_error(grey, &ty));
                        }
                        return Ok(Step::Descend(ty));
                    }
                    TypeClass::Specialization => match mode {
                        Mode::Lenient => {
                            f.partial = true;
                            f.member_idx += 1;
                        }
                        Mode::Strict => {
                            return Err(ResolveError::UnresolvedDependency {
                                class: f.name.clone(),
                                member: member.name,
                                ty,
                            });
                        }
                    },
                    TypeClass::Unknown => {
                        return Err(ResolveError::UnknownType {
                            class: f.name.clone(),
                            member: member.name,
                            ty,
                        });
                    }
                }
            }
            Ok(Step::Finished)
        }
        Frame::Generic(g) => {
            while g.idx < g.insts.len() {
                let inst = g.insts[g.idx].clone();
                g.idx += 1;
                if txn.is_resolved(state, &inst.name) {
                    continue;
                }
                if grey.contains(&inst.name) {
                    return Err(cycle_error(grey, &inst.name));
                }
                return Ok(Step::DescendDirect(inst));
            }
            Ok(Step::Finished)
        }
    }
}

/// Build the resolution frame for `name`: descriptor path for declared
/// classes, instantiation-expansion for bare generics, materialization for
/// undeclared specializations of a declared generic.
fn build_frame(source: &impl DocSource, name: &str) -> Result<Frame, ResolveError> {
    if source.contains(name) {
        let formals = source.template_parameters(name);
        if !formals.is_empty() && TemplateName::parse(name).is_none() {
            let mut seen = HashSet::new();
            let mut insts = Vec::new();
            for args in used_instantiations(source, name) {
                let t = TemplateName {
                    base: name.to_string(),
                    args,
                };
                if !seen.insert(t.canonical()) {
                    continue;
                }
                if let Some(inst) = materialize(source, &t) {
                    insts.push(inst);
                }
            }
            return Ok(Frame::Generic(GenericFrame {
                name: name.to_string(),
                insts,
                idx: 0,
            }));
        }
        let members = source.members(name)?;
        let parents = source.parents(name).iter().map(|p| canonical_name(p)).collect();
        return Ok(Frame::Class(ClassFrame::new(
            name.to_string(),
            members,
            parents,
        )));
    }

    if let Some(t) = TemplateName::parse(name) {
        if let Some(inst) = materialize(source, &t) {
            return Ok(Frame::Class(ClassFrame::new(
                inst.name,
                inst.members,
                inst.parents,
            )));
        }
    }

    Err(ResolveError::ClassNotFound(name.to_string()))
}

fn cycle_error(grey: &[String], dep: &str) -> ResolveError {
    let start = grey.iter().position(|g| g == dep).unwrap_or(0);
    let mut chain: Vec<String> = grey[start..].to_vec();
    chain.push(dep.to_string());
    ResolveError::DependencyCycle { chain }
}
