// src/sunburst/aggregate.rs
//! Subtotals for the sunburst.

use crate::config::SunburstSettings;
use crate::models::Amount;
use crate::tree::{AccountTree, NodeIdx, NodeKind, TreeError};

/// Fill in `total_amount` bottom-up and return the root total.
///
/// A node with children is relabelled as a subtotal; if it also carries its
/// own amount, that amount moves to a new leaf child so every slice is the
/// sum of its children. Nodes totalling zero are removed with their subtree.
///
/// # Panics
///
/// Panics on a negative leaf amount. Callers normalize signs first.
pub fn set_node_totals(
    tree: &mut AccountTree,
    settings: &SunburstSettings,
) -> Result<Amount, TreeError> {
    match tree.root() {
        Some(root) => total_node(tree, root, settings),
        None => Ok(0),
    }
}

fn total_node(
    tree: &mut AccountTree,
    idx: NodeIdx,
    settings: &SunburstSettings,
) -> Result<Amount, TreeError> {
    let Some(node) = tree.get(idx) else {
        return Ok(0);
    };
    let leaf_amount = node.leaf_amount.unwrap_or(0);
    assert!(
        leaf_amount >= 0,
        "negative leaf amount {leaf_amount} on node {:?}",
        node.id
    );

    let mut running_total = leaf_amount;
    let mut children = node.children().to_vec();
    if !children.is_empty() {
        let (id, tag, kind) = (node.id.clone(), node.tag.clone(), node.kind);
        if kind != NodeKind::Root {
            if let Some(node) = tree.get_mut(idx) {
                node.tag = format!("{tag}{}", settings.subtotal_suffix);
            }
        }
        if leaf_amount > 0 {
            let leaf = tree.add_child(
                idx,
                format!("{id}{}", settings.leaf_suffix),
                tag,
                NodeKind::Leaf,
            )?;
            if let Some(leaf) = tree.get_mut(leaf) {
                leaf.leaf_amount = Some(leaf_amount);
                leaf.total_amount = Some(leaf_amount);
            }
            if let Some(node) = tree.get_mut(idx) {
                node.leaf_amount = Some(0);
            }
            running_total = 0;
            children.push(leaf);
        }
        for child in children {
            running_total = running_total.saturating_add(total_node(tree, child, settings)?);
        }
    }

    if running_total == 0 {
        tree.remove_subtree(idx);
    } else if let Some(node) = tree.get_mut(idx) {
        node.total_amount = Some(running_total);
    }
    Ok(running_total)
}
