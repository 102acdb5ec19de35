use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;
use crate::series::{TimeResolution, TimeSpan};

/// Default maximum number of slices under a single sunburst node.
fn default_max_slices() -> usize {
    7
}

fn default_leaf_suffix() -> String {
    " [Leaf]".to_string()
}

fn default_subtotal_suffix() -> String {
    " [Subtotal]".to_string()
}

fn default_other_prefix() -> String {
    "Other ".to_string()
}

fn default_root_id() -> String {
    "root".to_string()
}

fn default_root_tag() -> String {
    "[Total]".to_string()
}

/// How account tree nodes are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeIdentity {
    /// Key nodes by bare segment name. Unrelated branches that share a
    /// segment name (`Expenses:Travel:Hotel`, `Personal:Travel:Hotel`) merge
    /// into whichever `Travel` node was created first.
    #[default]
    Segment,
    /// Key nodes by their full path prefix (`Expenses:Travel`).
    FullPath,
}

impl NodeIdentity {
    /// The node id a transaction's amount is attributed to.
    pub fn key_for<'a>(&self, tx: &'a Transaction) -> Cow<'a, str> {
        match self {
            NodeIdentity::Segment => Cow::Borrowed(&tx.account),
            NodeIdentity::FullPath => {
                let canonical = tx.path().to_string();
                if canonical == tx.full_account_path {
                    Cow::Borrowed(&tx.full_account_path)
                } else {
                    Cow::Owned(canonical)
                }
            }
        }
    }
}

/// Account tree construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    /// Identifier of the synthetic root node.
    #[serde(default = "default_root_id")]
    pub root_id: String,

    /// Display tag of the synthetic root node.
    #[serde(default = "default_root_tag")]
    pub root_tag: String,

    pub node_identity: NodeIdentity,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            root_id: default_root_id(),
            root_tag: default_root_tag(),
            node_identity: NodeIdentity::default(),
        }
    }
}

/// Sunburst aggregation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunburstSettings {
    /// Most direct children a node keeps once `collapse_other` is enabled.
    #[serde(default = "default_max_slices")]
    pub max_slices: usize,

    /// Group the smallest children of crowded nodes under an "Other" node.
    pub collapse_other: bool,

    /// Appended to the id of the synthetic leaf split off a subtotal node.
    #[serde(default = "default_leaf_suffix")]
    pub leaf_suffix: String,

    /// Appended to the tag of any node that has children.
    #[serde(default = "default_subtotal_suffix")]
    pub subtotal_suffix: String,

    /// Prepended to the parent id to form the "Other" node id.
    #[serde(default = "default_other_prefix")]
    pub other_prefix: String,
}

impl Default for SunburstSettings {
    fn default() -> Self {
        Self {
            max_slices: default_max_slices(),
            collapse_other: false,
            leaf_suffix: default_leaf_suffix(),
            subtotal_suffix: default_subtotal_suffix(),
            other_prefix: default_other_prefix(),
        }
    }
}

/// Defaults for series requests that don't specify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesSettings {
    pub time_span: TimeSpan,
    pub resolution: TimeResolution,
}

/// Sign convention for one top-level account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAccountConvention {
    pub id: String,
    /// Negate every descendant's amounts on load.
    #[serde(default)]
    pub flip_negative: bool,
}

impl RootAccountConvention {
    pub fn new(id: impl Into<String>, flip_negative: bool) -> Self {
        Self {
            id: id.into(),
            flip_negative,
        }
    }
}

/// GnuCash exports credit balances (equity, expenses, income, liabilities)
/// with a negative sign.
fn default_root_accounts() -> Vec<RootAccountConvention> {
    vec![
        RootAccountConvention::new("Assets", false),
        RootAccountConvention::new("Equity", true),
        RootAccountConvention::new("Expenses", true),
        RootAccountConvention::new("Income", true),
        RootAccountConvention::new("Liabilities", true),
    ]
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Account tree settings.
    #[serde(default)]
    pub tree: TreeSettings,

    /// Sunburst settings.
    #[serde(default)]
    pub sunburst: SunburstSettings,

    /// Series defaults.
    #[serde(default)]
    pub series: SeriesSettings,

    /// Per top-level account sign conventions.
    #[serde(default = "default_root_accounts")]
    pub root_accounts: Vec<RootAccountConvention>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            tree: TreeSettings::default(),
            sunburst: SunburstSettings::default(),
            series: SeriesSettings::default(),
            root_accounts: default_root_accounts(),
        }
    }
}

impl ExplorerConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ExplorerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.sunburst.max_slices < 2 {
            anyhow::bail!(
                "Invalid sunburst.max_slices {} in {}: must be at least 2",
                config.sunburst.max_slices,
                path.display()
            );
        }

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./ledger-explorer.toml` if it exists in current directory
/// 2. `~/.config/ledger-explorer/ledger-explorer.toml` (XDG config directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("ledger-explorer.toml");
    if local_config.exists() {
        return local_config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("ledger-explorer")
            .join("ledger-explorer.toml");
    }

    local_config
}
