//! Core entities for flush ordering.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identifier of an entity touched by a pending write.
///
/// Unique within one batch; equality of operations is keyed on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Kind of write a pending operation performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Insert,
    Update,
    Delete,
}

impl OperationKind {
    /// Inserts wait for the entities they reference; updates and deletes
    /// run ahead of them instead.
    pub fn is_insert(self) -> bool {
        matches!(self, OperationKind::Insert)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            OperationKind::Insert => "insert",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        };
        f.write_str(kind)
    }
}

/// A pending write against the storage backend.
///
/// Carries the target entity id, the kind of write, and the set of
/// flush-relevant references to other entities in the same batch. The payload
/// is opaque to the scheduler and travels through unchanged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingOperation<P> {
    id: EntityId,
    kind: OperationKind,
    references: HashSet<EntityId>,
    payload: P,
}

impl<P> PendingOperation<P> {
    pub fn new(kind: OperationKind, id: impl Into<EntityId>, payload: P) -> Self {
        Self {
            id: id.into(),
            kind,
            references: HashSet::new(),
            payload,
        }
    }

    pub fn insert(id: impl Into<EntityId>, payload: P) -> Self {
        Self::new(OperationKind::Insert, id, payload)
    }

    pub fn update(id: impl Into<EntityId>, payload: P) -> Self {
        Self::new(OperationKind::Update, id, payload)
    }

    pub fn delete(id: impl Into<EntityId>, payload: P) -> Self {
        Self::new(OperationKind::Delete, id, payload)
    }

    pub fn with_references<I, T>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EntityId>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn references(&self) -> &HashSet<EntityId> {
        &self.references
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}

// Identity is the entity id; payloads do not participate.
impl<P> PartialEq for PendingOperation<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for PendingOperation<P> {}

impl<P> std::hash::Hash for PendingOperation<P> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Dense index of an interned entity id within one batch-scoped graph.
pub type NodeIndex = u32;

/// Prerequisite graph over one batch of pending operations.
///
/// Every distinct entity id seen in the batch, whether as an operation target
/// or only as a reference, is interned once into a dense [`NodeIndex`]. All
/// per-node state lives in index-addressed vectors rather than maps keyed by
/// the original id strings. Intern order is first-appearance order in the
/// batch and doubles as the deterministic tie-break key during scheduling.
///
/// The graph borrows ids from the batch it was built over, is mutated in
/// place while scheduling, and is discarded once the order is produced.
#[derive(Debug, Default)]
pub struct DependencyGraph<'a> {
    index_of: HashMap<&'a EntityId, NodeIndex>,
    /// Position in the source batch, or `None` for ids that participate only
    /// as dependency anchors (referenced but never operated on). Taken when
    /// the node is emitted.
    batch_positions: Vec<Option<usize>>,
    /// Nodes that must run strictly after the indexed node.
    dependents: Vec<Vec<NodeIndex>>,
    /// Not-yet-satisfied predecessors per node.
    prerequisite_counts: Vec<usize>,
    edges: HashSet<(NodeIndex, NodeIndex)>,
    operation_count: usize,
}

impl<'a> DependencyGraph<'a> {
    pub fn with_capacity(operations: usize) -> Self {
        Self {
            index_of: HashMap::with_capacity(operations),
            batch_positions: Vec::with_capacity(operations),
            dependents: Vec::with_capacity(operations),
            prerequisite_counts: Vec::with_capacity(operations),
            edges: HashSet::new(),
            operation_count: 0,
        }
    }

    /// Intern an id, allocating a node on first sight.
    pub fn intern(&mut self, id: &'a EntityId) -> NodeIndex {
        if let Some(&index) = self.index_of.get(id) {
            return index;
        }
        let index = self.batch_positions.len() as NodeIndex;
        self.index_of.insert(id, index);
        self.batch_positions.push(None);
        self.dependents.push(Vec::new());
        self.prerequisite_counts.push(0);
        index
    }

    /// Attach a batch position to an interned node. Returns `false` if the
    /// node already carries an operation.
    pub fn record_operation(&mut self, index: NodeIndex, batch_position: usize) -> bool {
        let slot = &mut self.batch_positions[index as usize];
        if slot.is_some() {
            return false;
        }
        *slot = Some(batch_position);
        self.operation_count += 1;
        true
    }

    /// Record `from -> to` (`to` runs strictly after `from`), at most once
    /// per logical edge. A newly recorded edge raises the prerequisite count
    /// of `to` by exactly one.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        if !self.edges.insert((from, to)) {
            return false;
        }
        self.dependents[from as usize].push(to);
        self.prerequisite_counts[to as usize] += 1;
        true
    }

    /// All nodes with no unsatisfied prerequisites, in intern order.
    pub fn ready_nodes(&self) -> Vec<NodeIndex> {
        self.prerequisite_counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count == 0)
            .map(|(index, _)| index as NodeIndex)
            .collect()
    }

    /// Take the batch position of an emitted node, removing its operation
    /// from the graph.
    pub fn take_batch_position(&mut self, index: NodeIndex) -> Option<usize> {
        self.batch_positions[index as usize].take()
    }

    /// Drain the dependents of an emitted node.
    pub fn take_dependents(&mut self, index: NodeIndex) -> Vec<NodeIndex> {
        std::mem::take(&mut self.dependents[index as usize])
    }

    /// Satisfy one prerequisite of `index`; `true` when the node becomes
    /// eligible.
    pub fn release_prerequisite(&mut self, index: NodeIndex) -> bool {
        let count = &mut self.prerequisite_counts[index as usize];
        *count = count.saturating_sub(1);
        *count == 0
    }

    pub fn node_count(&self) -> usize {
        self.batch_positions.len()
    }

    /// Number of nodes that carry an actual operation.
    pub fn operation_count(&self) -> usize {
        self.operation_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge(&self, from: &EntityId, to: &EntityId) -> bool {
        match (self.index_of.get(from), self.index_of.get(to)) {
            (Some(&from), Some(&to)) => self.edges.contains(&(from, to)),
            _ => false,
        }
    }

    pub fn prerequisite_count(&self, id: &EntityId) -> Option<usize> {
        self.index_of
            .get(id)
            .map(|&index| self.prerequisite_counts[index as usize])
    }
}
