// src/tree/arena.rs
//! Arena-backed account tree.
//!
//! Nodes live in a slot vector and are addressed by [`NodeIdx`]; an id index
//! maps string ids to slots. Removing a node empties its slot, so indices
//! handed out earlier never point at a different node.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::Amount;

/// Stable handle to a node slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIdx(usize);

/// Where a node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The synthetic root created by the builder.
    Root,
    /// A ledger account (or an inferred ancestor of one).
    Account,
    /// Synthetic child carrying a subtotal node's own amount.
    Leaf,
    /// Synthetic aggregate of the smallest children of a crowded node.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountNode {
    pub id: String,
    pub tag: String,
    pub kind: NodeKind,
    /// Amount posted to exactly this account.
    pub leaf_amount: Option<Amount>,
    /// Amount including all descendants. Set by aggregation.
    pub total_amount: Option<Amount>,
    parent: Option<NodeIdx>,
    children: Vec<NodeIdx>,
}

impl AccountNode {
    fn new(id: String, tag: String, kind: NodeKind, parent: Option<NodeIdx>) -> Self {
        Self {
            id,
            tag,
            kind,
            leaf_amount: None,
            total_amount: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeIdx> {
        self.parent
    }

    pub fn children(&self) -> &[NodeIdx] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Node id {id:?} already exists in the account tree")]
    DuplicateNode { id: String },
    #[error("Node {idx:?} is not part of the account tree")]
    MissingNode { idx: NodeIdx },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountTree {
    slots: Vec<Option<AccountNode>>,
    index: HashMap<String, NodeIdx>,
    root: Option<NodeIdx>,
}

impl AccountTree {
    /// A tree holding only a root node.
    pub fn with_root(id: impl Into<String>, tag: impl Into<String>) -> Self {
        let id = id.into();
        let root = NodeIdx(0);
        let mut index = HashMap::new();
        index.insert(id.clone(), root);
        Self {
            slots: vec![Some(AccountNode::new(id, tag.into(), NodeKind::Root, None))],
            index,
            root: Some(root),
        }
    }

    /// The current root; `None` once aggregation pruned everything.
    pub fn root(&self) -> Option<NodeIdx> {
        self.root
    }

    pub fn root_node(&self) -> Option<&AccountNode> {
        self.root.and_then(|idx| self.get(idx))
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, idx: NodeIdx) -> Option<&AccountNode> {
        self.slots.get(idx.0).and_then(Option::as_ref)
    }

    /// Mutable access for in-crate passes. Callers must not change `id`.
    pub(crate) fn get_mut(&mut self, idx: NodeIdx) -> Option<&mut AccountNode> {
        self.slots.get_mut(idx.0).and_then(Option::as_mut)
    }

    pub fn find(&self, id: &str) -> Option<NodeIdx> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&AccountNode> {
        self.find(id).and_then(|idx| self.get(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Children of `idx`, empty if the node is gone.
    pub fn children_of(&self, idx: NodeIdx) -> &[NodeIdx] {
        self.get(idx).map(AccountNode::children).unwrap_or(&[])
    }

    /// Id of the parent of `idx`.
    pub fn parent_id(&self, idx: NodeIdx) -> Option<&str> {
        self.get(idx)
            .and_then(AccountNode::parent)
            .and_then(|p| self.get(p))
            .map(|p| p.id.as_str())
    }

    /// Append a new child under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeIdx,
        id: impl Into<String>,
        tag: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeIdx, TreeError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(TreeError::DuplicateNode { id });
        }
        if self.get(parent).is_none() {
            return Err(TreeError::MissingNode { idx: parent });
        }

        let idx = NodeIdx(self.slots.len());
        self.index.insert(id.clone(), idx);
        self.slots
            .push(Some(AccountNode::new(id, tag.into(), kind, Some(parent))));
        if let Some(p) = self.get_mut(parent) {
            p.children.push(idx);
        }
        Ok(idx)
    }

    /// Re-parent `idx` (with its subtree) under `new_parent`, appending it to
    /// the new parent's children.
    pub fn move_node(&mut self, idx: NodeIdx, new_parent: NodeIdx) -> Result<(), TreeError> {
        if idx == new_parent || self.get(new_parent).is_none() {
            return Err(TreeError::MissingNode { idx: new_parent });
        }
        let old_parent = self
            .get(idx)
            .ok_or(TreeError::MissingNode { idx })?
            .parent;

        if let Some(old) = old_parent.and_then(|p| self.get_mut(p)) {
            old.children.retain(|c| *c != idx);
        }
        if let Some(node) = self.get_mut(idx) {
            node.parent = Some(new_parent);
        }
        if let Some(p) = self.get_mut(new_parent) {
            p.children.push(idx);
        }
        Ok(())
    }

    /// Remove `idx` and everything below it. Returns the number of nodes removed.
    pub fn remove_subtree(&mut self, idx: NodeIdx) -> usize {
        let Some(parent) = self.get(idx).map(AccountNode::parent) else {
            return 0;
        };
        if let Some(p) = parent.and_then(|p| self.get_mut(p)) {
            p.children.retain(|c| *c != idx);
        }
        if self.root == Some(idx) {
            self.root = None;
        }

        let mut removed = 0;
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.slots.get_mut(current.0).and_then(Option::take) {
                self.index.remove(&node.id);
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Make `idx` the root, discarding the old root node (but not its other
    /// children, which the caller must have dealt with).
    pub(crate) fn promote_to_root(&mut self, idx: NodeIdx) -> Result<(), TreeError> {
        if self.get(idx).is_none() {
            return Err(TreeError::MissingNode { idx });
        }
        if let Some(old_root) = self.root.filter(|r| *r != idx) {
            if let Some(node) = self.slots.get_mut(old_root.0).and_then(Option::take) {
                self.index.remove(&node.id);
            }
        }
        if let Some(node) = self.get_mut(idx) {
            node.parent = None;
        }
        self.root = Some(idx);
        Ok(())
    }

    /// All live nodes, parents before children, siblings in order.
    pub fn preorder(&self) -> Vec<NodeIdx> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.root {
            self.collect_preorder(root, &mut out);
        }
        out
    }

    fn collect_preorder(&self, start: NodeIdx, out: &mut Vec<NodeIdx>) {
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.get(idx) {
                out.push(idx);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    /// Ids of the direct children of `id`. Empty when `id` is unknown.
    pub fn children(&self, id: &str) -> Vec<String> {
        self.find(id)
            .map(|idx| self.ids(self.children_of(idx)))
            .unwrap_or_default()
    }

    /// Ids of every node below `id`, in pre-order. Empty when `id` is unknown.
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let Some(idx) = self.find(id) else {
            return Vec::new();
        };
        let mut below = Vec::new();
        self.collect_preorder(idx, &mut below);
        self.ids(&below[1..])
    }

    /// Look up `id`, falling back to the un-suffixed account for ids of
    /// synthetic leaf nodes (`"Expenses [Leaf]"` -> `"Expenses"`).
    pub fn resolve(&self, id: &str, leaf_suffix: &str) -> Option<NodeIdx> {
        self.find(id).or_else(|| {
            id.strip_suffix(leaf_suffix)
                .filter(|_| !leaf_suffix.is_empty())
                .and_then(|base| self.find(base))
        })
    }

    fn ids(&self, indices: &[NodeIdx]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|idx| self.get(*idx))
            .map(|n| n.id.clone())
            .collect()
    }
}
