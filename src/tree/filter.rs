// src/tree/filter.rs
//! Tree-driven selections over transaction sets.

use std::collections::HashSet;

use tracing::debug;

use crate::config::{NodeIdentity, RootAccountConvention, TreeSettings};
use crate::models::Transaction;

use super::arena::AccountTree;
use super::builder::PathTreeBuilder;

fn keep_matching(
    transactions: &[Transaction],
    identity: NodeIdentity,
    keys: &HashSet<String>,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| keys.contains(&*identity.key_for(tx)))
        .cloned()
        .collect()
}

/// Keep transactions posted to any of `accounts` or their descendants.
///
/// An empty `accounts` list keeps everything.
pub fn filter_accounts(
    transactions: &[Transaction],
    tree: &AccountTree,
    accounts: &[String],
    identity: NodeIdentity,
) -> Vec<Transaction> {
    if accounts.is_empty() {
        return transactions.to_vec();
    }
    let mut keys = HashSet::new();
    for account in accounts {
        keys.insert(account.clone());
        keys.extend(tree.descendants(account));
    }
    keep_matching(transactions, identity, &keys)
}

/// Transactions attributed to `account_id`, plus its descendants when `deep`.
///
/// Ids of synthetic leaf nodes resolve to their account. An id that isn't in
/// the tree at all only matches transactions posted to exactly that id.
pub fn select_for_account(
    transactions: &[Transaction],
    tree: &AccountTree,
    account_id: &str,
    deep: bool,
    identity: NodeIdentity,
    leaf_suffix: &str,
) -> Vec<Transaction> {
    let resolved = tree
        .resolve(account_id, leaf_suffix)
        .and_then(|idx| tree.get(idx))
        .map(|node| node.id.clone());

    let mut keys = HashSet::new();
    match resolved {
        Some(id) => {
            if deep {
                keys.extend(tree.descendants(&id));
            }
            keys.insert(id);
        }
        None => {
            debug!(account = account_id, "Account not in tree; matching exact id only");
            keys.insert(account_id.to_string());
        }
    }
    keep_matching(transactions, identity, &keys)
}

/// Negate the amounts of every account below a root whose convention says
/// `flip_negative`. The root account itself keeps its sign.
///
/// The hierarchy is rebuilt untrimmed from `transactions`, so conventions
/// still apply when the data holds a single top-level account.
pub fn apply_sign_conventions(
    transactions: &[Transaction],
    conventions: &[RootAccountConvention],
    settings: &TreeSettings,
) -> Vec<Transaction> {
    let mut builder = PathTreeBuilder::new(settings);
    for tx in transactions {
        builder.insert_path(&tx.full_account_path);
    }
    let tree = builder.build();

    let flipped: HashSet<String> = conventions
        .iter()
        .filter(|c| c.flip_negative)
        .flat_map(|c| tree.descendants(&c.id))
        .collect();

    let identity = settings.node_identity;
    transactions
        .iter()
        .map(|tx| {
            if flipped.contains(&*identity.key_for(tx)) {
                tx.clone().with_amount(tx.amount.saturating_neg())
            } else {
                tx.clone()
            }
        })
        .collect()
}
