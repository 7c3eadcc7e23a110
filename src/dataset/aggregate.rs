// src/dataset/aggregate.rs

use crate::dataset::{Dataset, DatasetError, CATEGORY_COLUMN};
use crate::geos::ZoneMap;
use std::collections::BTreeMap;

/// How rows are keyed on the chart's x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    /// State column mapped through the zone table.
    #[default]
    Zone,
    /// Town column used as-is.
    Town,
}

impl GroupBy {
    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("") | Some("zone") => Some(GroupBy::Zone),
            Some("town") => Some(GroupBy::Town),
            _ => None,
        }
    }

    pub fn source_column(&self) -> &'static str {
        match self {
            GroupBy::Zone => "state",
            GroupBy::Town => "town",
        }
    }

    pub fn key_label(&self) -> &'static str {
        match self {
            GroupBy::Zone => "Zone",
            GroupBy::Town => "Town",
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            GroupBy::Zone => "zone",
            GroupBy::Town => "town",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCount {
    pub key: String,
    pub category: String,
    pub count: usize,
}

/// Count rows per (key, category).
///
/// Fails with [`DatasetError::MissingColumns`] before counting anything if the
/// source or category column is absent. Rows with either cell blank are
/// skipped, so the counts sum to the rows that had both populated. Output is
/// ordered by key, then category.
pub fn count_by(
    dataset: &Dataset,
    group_by: GroupBy,
    zones: &ZoneMap,
) -> Result<Vec<GroupedCount>, DatasetError> {
    let Some(cols) = dataset.require_columns(&[group_by.source_column(), CATEGORY_COLUMN])? else {
        return Ok(Vec::new());
    };
    let (source_idx, category_idx) = (cols[0], cols[1]);

    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();

    for row in dataset.rows() {
        let source = row.get(source_idx).unwrap_or("");
        let category = row.get(category_idx).unwrap_or("");
        // Whitespace only counts as blank; lookups use the cell verbatim.
        if source.trim().is_empty() || category.trim().is_empty() {
            continue;
        }

        let key = match group_by {
            GroupBy::Zone => zones.zone_of(source).as_str().to_string(),
            GroupBy::Town => source.to_string(),
        };

        *counts.entry((key, category.to_string())).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .map(|((key, category), count)| GroupedCount {
            key,
            category,
            count,
        })
        .collect())
}
