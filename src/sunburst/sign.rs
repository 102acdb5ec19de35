use crate::models::{sum_amounts, Transaction};

/// Flip a subset whose amounts sum to a negative value so it can be drawn as
/// positive slices. Idempotent.
pub fn positize(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    if sum_amounts(&transactions) < 0 {
        for tx in &mut transactions {
            tx.amount = tx.amount.saturating_neg();
        }
    }
    transactions
}
