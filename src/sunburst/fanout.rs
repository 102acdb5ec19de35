use tracing::debug;

use crate::config::SunburstSettings;
use crate::models::Amount;
use crate::tree::{AccountTree, NodeIdx, NodeKind, TreeError};

/// Cap the number of direct children per node at `max_slices`.
///
/// A node with `max_slices` or more children keeps its `max_slices - 1`
/// largest ones (earlier siblings win ties, survivors stay in sibling order)
/// and moves the rest under an `Other <id>` node appended last. Runs on a
/// tree that already has totals.
pub fn summarize_to_other(
    tree: &mut AccountTree,
    settings: &SunburstSettings,
) -> Result<(), TreeError> {
    match tree.root() {
        Some(root) => collapse(tree, root, settings),
        None => Ok(()),
    }
}

fn collapse(
    tree: &mut AccountTree,
    idx: NodeIdx,
    settings: &SunburstSettings,
) -> Result<(), TreeError> {
    let max_slices = settings.max_slices.max(2);
    let children = tree.children_of(idx).to_vec();

    if children.len() >= max_slices {
        let Some(id) = tree.get(idx).map(|n| n.id.clone()) else {
            return Ok(());
        };
        let mut ranked: Vec<(NodeIdx, Amount)> = children
            .iter()
            .map(|c| (*c, tree.get(*c).and_then(|n| n.total_amount).unwrap_or(0)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let other_id = format!("{}{id}", settings.other_prefix);
        let other = tree.add_child(idx, other_id.clone(), other_id, NodeKind::Other)?;
        let mut other_total: Amount = 0;
        let mut absorbed = 0usize;
        for (child, total) in ranked.into_iter().skip(max_slices - 1) {
            tree.move_node(child, other)?;
            other_total = other_total.saturating_add(total);
            absorbed += 1;
        }
        if let Some(node) = tree.get_mut(other) {
            node.total_amount = Some(other_total);
        }
        debug!(node = %id, absorbed, total = other_total, "Collapsed small slices");
    }

    for child in tree.children_of(idx).to_vec() {
        collapse(tree, child, settings)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crowded(n: usize) -> AccountTree {
        let mut tree = AccountTree::with_root("root", "[Total]");
        let root = tree.root().unwrap();
        for i in 0..n {
            let id = format!("c{i}");
            let idx = tree.add_child(root, id.clone(), id, NodeKind::Account).unwrap();
            tree.get_mut(idx).unwrap().total_amount = Some((i as Amount + 1) * 10);
        }
        tree
    }

    #[test]
    fn nine_children_become_six_plus_other() {
        let mut tree = crowded(9);
        summarize_to_other(&mut tree, &SunburstSettings::default()).unwrap();

        let children = tree.children("root");
        assert_eq!(children.len(), 7);
        assert_eq!(&children[..6], &["c3", "c4", "c5", "c6", "c7", "c8"][..]);
        assert_eq!(children[6], "Other root");

        let other = tree.node("Other root").unwrap();
        assert_eq!(other.kind, NodeKind::Other);
        assert_eq!(other.tag, "Other root");
        assert_eq!(other.total_amount, Some(10 + 20 + 30));
        assert_eq!(tree.children("Other root"), vec!["c2", "c1", "c0"]);
    }

    #[test]
    fn nodes_below_limit_are_untouched() {
        let mut tree = crowded(6);
        let before = tree.clone();
        summarize_to_other(&mut tree, &SunburstSettings::default()).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn node_at_limit_moves_smallest_child_to_other() {
        let mut tree = crowded(7);
        summarize_to_other(&mut tree, &SunburstSettings::default()).unwrap();

        let children = tree.children("root");
        assert_eq!(children.len(), 7);
        assert_eq!(&children[..6], &["c1", "c2", "c3", "c4", "c5", "c6"][..]);
        assert_eq!(tree.children("Other root"), vec!["c0"]);
        assert_eq!(tree.node("Other root").unwrap().total_amount, Some(10));
    }

    #[test]
    fn other_node_is_collapsed_again_when_crowded() {
        let mut tree = crowded(20);
        let settings = SunburstSettings {
            max_slices: 3,
            ..SunburstSettings::default()
        };
        summarize_to_other(&mut tree, &settings).unwrap();
        for idx in tree.preorder() {
            assert!(tree.children_of(idx).len() <= 3);
        }
        assert!(tree.contains("Other Other root"));
    }

    #[test]
    fn ties_keep_sibling_order() {
        let mut tree = AccountTree::with_root("root", "[Total]");
        let root = tree.root().unwrap();
        for id in ["a", "b", "c", "d"] {
            let idx = tree.add_child(root, id, id, NodeKind::Account).unwrap();
            tree.get_mut(idx).unwrap().total_amount = Some(5);
        }
        let settings = SunburstSettings {
            max_slices: 3,
            ..SunburstSettings::default()
        };
        summarize_to_other(&mut tree, &settings).unwrap();
        assert_eq!(tree.children("root"), vec!["a", "b", "Other root"]);
    }
}
