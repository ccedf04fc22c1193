//! Configuration structures for the invoice pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::GfsError;
use crate::invoice::MergeRule;

/// Main configuration for the gfs pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GfsConfig {
    /// Reference table configuration.
    pub reference: ReferenceConfig,

    /// Summary aggregation configuration.
    pub aggregation: AggregationConfig,
}

/// Where the reference table lives and how its columns are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Path to the reference workbook or its CSV export.
    pub path: PathBuf,

    /// Header of the item code column.
    pub item_code_column: String,

    /// Header of the GL code column.
    pub gl_code_column: String,

    /// Header of the GL description column.
    pub gl_description_column: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("GFS_DATABASE.csv"),
            item_code_column: "Item Code".to_string(),
            gl_code_column: "GL Code".to_string(),
            gl_description_column: "GL Description".to_string(),
        }
    }
}

/// Category merge rules applied after raw grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Source categories folded into a target category.
    pub merge_rules: Vec<MergeRule>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            merge_rules: MergeRule::defaults(),
        }
    }
}

impl GfsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| GfsError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| GfsError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
