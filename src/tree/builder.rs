// src/tree/builder.rs
//! Reconstruct the account hierarchy implied by a set of account paths.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::{NodeIdentity, TreeSettings};
use crate::models::{AccountPath, Transaction};

use super::arena::{AccountTree, NodeKind};

/// Builds an [`AccountTree`] from colon-delimited account paths.
///
/// Parent accounts without transactions of their own never show up in the
/// data, so every prefix of every path is created on the way down. A node is
/// only created when no node with the same id exists yet; with
/// [`NodeIdentity::Segment`] that means two branches sharing a segment name
/// end up sharing one node.
#[derive(Debug)]
pub struct PathTreeBuilder {
    identity: NodeIdentity,
    tree: AccountTree,
    seen: HashSet<String>,
}

impl PathTreeBuilder {
    pub fn new(settings: &TreeSettings) -> Self {
        Self {
            identity: settings.node_identity,
            tree: AccountTree::with_root(&settings.root_id, &settings.root_tag),
            seen: HashSet::new(),
        }
    }

    /// Add one account path. Repeated paths are ignored.
    pub fn insert_path(&mut self, raw: &str) {
        if !self.seen.insert(raw.to_string()) {
            return;
        }
        let path = AccountPath::parse(raw);
        let Some(mut parent) = self.tree.root() else {
            return;
        };

        for depth in 1..=path.len() {
            let key = match self.identity {
                NodeIdentity::Segment => path.segments()[depth - 1].clone(),
                NodeIdentity::FullPath => path.prefix(depth),
            };

            if let Some(existing) = self.tree.find(&key) {
                let existing_parent = self.tree.get(existing).and_then(|n| n.parent());
                if existing != parent && existing_parent != Some(parent) {
                    debug!(
                        node = %key,
                        path = %path,
                        "Account segment already exists under another parent; merging"
                    );
                }
                parent = existing;
                continue;
            }

            let tag = path.segments()[depth - 1].clone();
            match self.tree.add_child(parent, key, tag, NodeKind::Account) {
                Ok(idx) => parent = idx,
                Err(err) => {
                    warn!(error = %err, path = %path, "Skipping rest of account path");
                    break;
                }
            }
        }
    }

    pub fn build(self) -> AccountTree {
        self.tree
    }
}

/// Build the account tree for a transaction set and trim superfluous roots.
pub fn build_account_tree(transactions: &[Transaction], settings: &TreeSettings) -> AccountTree {
    let mut builder = PathTreeBuilder::new(settings);
    for tx in transactions {
        builder.insert_path(&tx.full_account_path);
    }
    trim_excess_root(builder.build())
}

/// Replace `A -> B -> (C, D)` with `B -> (C, D)`: while the root has exactly
/// one child, that child becomes the root.
///
/// A root that already carries a non-zero `leaf_amount` is kept, so trimming
/// after leaf amounts are assigned never drops money.
pub fn trim_excess_root(mut tree: AccountTree) -> AccountTree {
    while let Some(root) = tree.root() {
        if tree.get(root).and_then(|n| n.leaf_amount).unwrap_or(0) != 0 {
            break;
        }
        let only_child = match tree.children_of(root) {
            [child] => *child,
            _ => break,
        };
        if tree.promote_to_root(only_child).is_err() {
            break;
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(paths: &[&str], settings: &TreeSettings) -> AccountTree {
        let mut builder = PathTreeBuilder::new(settings);
        for p in paths {
            builder.insert_path(p);
        }
        builder.build()
    }

    #[test]
    fn every_prefix_exists_with_single_parent() {
        let settings = TreeSettings::default();
        let tree = tree_from(&["Expenses:Auto:Fuel", "Income:Salary"], &settings);

        let fuel = tree.find("Fuel").unwrap();
        assert_eq!(tree.parent_id(fuel), Some("Auto"));
        let auto = tree.find("Auto").unwrap();
        assert_eq!(tree.parent_id(auto), Some("Expenses"));
        let expenses = tree.find("Expenses").unwrap();
        assert_eq!(tree.parent_id(expenses), Some("root"));
        assert_eq!(tree.children("root"), vec!["Expenses", "Income"]);
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let settings = TreeSettings::default();
        let tree = tree_from(
            &["Expenses:Auto:Fuel", "Expenses:Auto:Repair", "Expenses:Auto:Fuel"],
            &settings,
        );
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.children("Auto"), vec!["Fuel", "Repair"]);
    }

    #[test]
    fn segment_identity_merges_colliding_names() {
        let settings = TreeSettings::default();
        let tree = tree_from(
            &["Expenses:Travel:Hotel", "Personal:Travel:Flights"],
            &settings,
        );
        // Both `Travel` segments share the node created under Expenses.
        assert_eq!(tree.children("Travel"), vec!["Hotel", "Flights"]);
        assert!(tree.children("Personal").is_empty());
    }

    #[test]
    fn full_path_identity_keeps_branches_apart() {
        let settings = TreeSettings {
            node_identity: NodeIdentity::FullPath,
            ..TreeSettings::default()
        };
        let tree = tree_from(
            &["Expenses:Travel:Hotel", "Personal:Travel:Flights"],
            &settings,
        );
        assert_eq!(tree.children("Expenses:Travel"), vec!["Expenses:Travel:Hotel"]);
        assert_eq!(tree.children("Personal:Travel"), vec!["Personal:Travel:Flights"]);
        assert_eq!(tree.node("Personal:Travel").unwrap().tag, "Travel");
    }

    #[test]
    fn trim_collapses_single_child_chain() {
        let settings = TreeSettings::default();
        let tree = trim_excess_root(tree_from(
            &["Expenses:Auto:Fuel", "Expenses:Auto:Repair"],
            &settings,
        ));
        assert_eq!(tree.root_node().unwrap().id, "Auto");
        assert!(!tree.contains("root"));
        assert!(!tree.contains("Expenses"));
        assert_eq!(tree.children("Auto"), vec!["Fuel", "Repair"]);
    }

    #[test]
    fn trim_keeps_branching_root() {
        let settings = TreeSettings::default();
        let tree = trim_excess_root(tree_from(&["Expenses:Fuel", "Income:Salary"], &settings));
        assert_eq!(tree.root_node().unwrap().id, "root");
    }

    #[test]
    fn trim_reduces_single_path_to_its_leaf() {
        let settings = TreeSettings::default();
        let tree = trim_excess_root(tree_from(&["Expenses:Auto:Fuel"], &settings));
        assert_eq!(tree.root_node().unwrap().id, "Fuel");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn trim_stops_at_root_with_own_amount() {
        let settings = TreeSettings::default();
        let mut tree = tree_from(&["Expenses:Auto:Fuel", "Expenses"], &settings);
        let expenses = tree.find("Expenses").unwrap();
        tree.get_mut(expenses).unwrap().leaf_amount = Some(20);
        let tree = trim_excess_root(tree);
        assert_eq!(tree.root_node().unwrap().id, "Expenses");
        assert_eq!(tree.children("Expenses"), vec!["Auto"]);
    }

    #[test]
    fn empty_input_keeps_bare_root() {
        let tree = build_account_tree(&[], &TreeSettings::default());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_node().unwrap().tag, "[Total]");
    }
}
