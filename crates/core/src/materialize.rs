//! Result materialization
//!
//! The compiled query returns one row per (fact, dimension) pair. This
//! module folds those rows back into one record per fact, with dimension
//! keys promoted to sibling fields of the fact columns. A fact with no
//! dimension rows never reaches this stage at all.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// One flat row as returned by the compiled statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRow {
    pub fact_id: String,
    pub type_key: String,
    pub observed_at: Option<String>,
    pub key: String,
    pub value: String,
}

/// One fact with its dimensions folded in. The dimension map serializes
/// flattened, so its keys appear alongside `fact_id`/`type_key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactRecord {
    pub fact_id: String,
    pub type_key: String,
    pub observed_at: Option<String>,
    #[serde(flatten)]
    pub dimensions: BTreeMap<String, String>,
}

/// Group flat rows by fact, preserving the first-seen order of fact ids.
pub fn materialize(rows: Vec<DimensionRow>) -> Vec<FactRecord> {
    let mut records: Vec<FactRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let position = match index.get(&row.fact_id) {
            Some(position) => *position,
            None => {
                index.insert(row.fact_id.clone(), records.len());
                records.push(FactRecord {
                    fact_id: row.fact_id,
                    type_key: row.type_key,
                    observed_at: row.observed_at,
                    dimensions: BTreeMap::new(),
                });
                records.len() - 1
            }
        };
        records[position].dimensions.insert(row.key, row.value);
    }

    records
}
