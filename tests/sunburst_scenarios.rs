mod support;

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use ledger_explorer::config::SunburstSettings;
use ledger_explorer::io::Dataset;
use ledger_explorer::series::TimeSpan;
use ledger_explorer::sunburst::SunburstSlice;
use ledger_explorer::tree::NodeKind;
use ledger_explorer::{aggregate_sunburst, ExplorerConfig, SunburstRequest};
use support::{clock, date, household, tx};

/// A 365-day window normalized per year keeps small integer amounts intact.
fn one_year() -> SunburstRequest {
    SunburstRequest {
        date_start: Some(date(2023, 1, 1)),
        date_end: Some(date(2024, 1, 1)),
        time_span: TimeSpan::Annualized,
    }
}

fn by_id(slices: &[SunburstSlice]) -> HashMap<&str, &SunburstSlice> {
    slices.iter().map(|s| (s.id.as_str(), s)).collect()
}

#[test]
fn subtotals_roll_up_through_the_hierarchy() -> Result<()> {
    let d = date(2023, 5, 1);
    let txs = vec![
        tx(d, 100, "Expenses:Auto:Fuel"),
        tx(d, 50, "Expenses:Auto:Repair"),
        tx(d, 30, "Expenses:Travel"),
    ];
    let sunburst = aggregate_sunburst(&txs, &one_year(), &ExplorerConfig::default(), &clock())?;
    let slices = sunburst.slices();
    let slices = by_id(&slices);

    assert_eq!(sunburst.total(), 180);
    assert_eq!(slices["Expenses"].parent, None);
    assert_eq!(slices["Expenses"].name, "Expenses [Subtotal]");
    assert_eq!(slices["Auto"].value, 150);
    assert_eq!(slices["Auto"].parent.as_deref(), Some("Expenses"));
    assert_eq!(slices["Fuel"].value, 100);
    assert_eq!(slices["Repair"].value, 50);
    assert_eq!(slices["Travel"].value, 30);
    assert_eq!(slices.len(), 5);
    Ok(())
}

#[test]
fn direct_amount_on_parent_becomes_leaf_slice() -> Result<()> {
    let d = date(2023, 5, 1);
    let txs = vec![
        tx(d, 20, "Expenses"),
        tx(d, 100, "Expenses:Food"),
        tx(d, 50, "Expenses:Rent"),
    ];
    let sunburst = aggregate_sunburst(&txs, &one_year(), &ExplorerConfig::default(), &clock())?;
    let slices = sunburst.slices();
    let slices = by_id(&slices);

    assert_eq!(slices["Expenses"].name, "Expenses [Subtotal]");
    assert_eq!(slices["Expenses"].value, 170);
    let leaf = slices["Expenses [Leaf]"];
    assert_eq!(leaf.name, "Expenses");
    assert_eq!(leaf.value, 20);
    assert_eq!(leaf.kind, NodeKind::Leaf);
    assert_eq!(leaf.parent.as_deref(), Some("Expenses"));
    Ok(())
}

#[test]
fn crowded_node_collapses_into_other() -> Result<()> {
    let d = date(2023, 5, 1);
    let txs: Vec<_> = (1..=9)
        .map(|i| tx(d, i * 10, &format!("Expenses:C{i}")))
        .collect();
    let mut config = ExplorerConfig::default();
    config.sunburst = SunburstSettings {
        collapse_other: true,
        ..SunburstSettings::default()
    };
    let sunburst = aggregate_sunburst(&txs, &one_year(), &config, &clock())?;

    let children = sunburst.tree.children("Expenses");
    assert_eq!(children, vec!["C4", "C5", "C6", "C7", "C8", "C9", "Other Expenses"]);
    let other = sunburst.tree.node("Other Expenses").expect("other node");
    assert_eq!(other.total_amount, Some(60));
    assert_eq!(sunburst.total(), 450);
    Ok(())
}

fn expense_dataset() -> (Dataset, ExplorerConfig) {
    let config = ExplorerConfig::default();
    let dataset = Dataset::new(household(), Vec::new(), &config);
    (dataset, config)
}

#[test]
fn leaves_sum_to_root_and_no_zero_slices_survive() -> Result<()> {
    let (dataset, config) = expense_dataset();
    let expenses = dataset.restrict_to_accounts(&["Expenses".to_string()], &config);
    let request = SunburstRequest {
        date_start: Some(date(2023, 1, 1)),
        date_end: Some(date(2024, 12, 31)),
        time_span: TimeSpan::Monthly,
    };
    let sunburst = aggregate_sunburst(&expenses, &request, &config, &clock())?;
    let slices = sunburst.slices();

    let parents: HashSet<&str> = slices.iter().filter_map(|s| s.parent.as_deref()).collect();
    let leaf_sum: i64 = slices
        .iter()
        .filter(|s| !parents.contains(s.id.as_str()))
        .map(|s| s.value)
        .sum();
    assert!(sunburst.total() > 0);
    assert_eq!(leaf_sum, sunburst.total());
    assert!(slices.iter().all(|s| s.value > 0));
    Ok(())
}

#[test]
fn fanout_bound_holds_everywhere() -> Result<()> {
    let d = date(2023, 5, 1);
    let mut txs = Vec::new();
    for group in 0..12 {
        for leaf in 0..(group + 1) {
            txs.push(tx(d, 10 + leaf, &format!("Expenses:G{group}:L{group}x{leaf}")));
        }
    }
    let mut config = ExplorerConfig::default();
    config.sunburst.collapse_other = true;
    config.sunburst.max_slices = 4;
    let sunburst = aggregate_sunburst(&txs, &one_year(), &config, &clock())?;

    let mut fanout: HashMap<String, usize> = HashMap::new();
    for slice in sunburst.slices() {
        if let Some(parent) = slice.parent {
            *fanout.entry(parent).or_default() += 1;
        }
    }
    assert!(fanout.values().all(|n| *n <= 4));
    Ok(())
}

#[test]
fn identical_inputs_produce_identical_trees() -> Result<()> {
    let (dataset, config) = expense_dataset();
    let request = SunburstRequest::default();
    let first = aggregate_sunburst(&dataset.transactions, &request, &config, &clock())?;
    let second = aggregate_sunburst(&dataset.transactions, &request, &config, &clock())?;
    assert_eq!(first, second);
    assert_eq!(first.slices(), second.slices());
    Ok(())
}
