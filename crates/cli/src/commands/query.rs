use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use facet_core::FactStore;

/// Run a bracket-notation query and print the matching records
#[derive(Debug, Parser)]
pub struct QueryCommand {
    /// Conditions in bracket notation, e.g. 'dim[systolic][gt]=120'
    #[arg(value_name = "CONDITION", required = true)]
    pub conditions: Vec<String>,
}

impl QueryCommand {
    pub fn execute(&self, db: &Path) -> Result<i32> {
        let pairs = parse_conditions(&self.conditions)?;
        let store = FactStore::open(db)
            .with_context(|| format!("failed to open database {}", db.display()))?;

        match store.query(&pairs) {
            Ok(records) => {
                println!("{}", serde_json::to_string_pretty(&records)?);
                Ok(0)
            }
            Err(error) => {
                eprintln!("{}: {}", error.title(), error);
                Ok(1)
            }
        }
    }
}

/// Split `key=value` arguments into the decoded pair list the engine
/// consumes.
pub fn parse_conditions(conditions: &[String]) -> Result<Vec<(String, String)>> {
    conditions
        .iter()
        .map(|condition| match condition.split_once('=') {
            Some((key, value)) => Ok((key.to_string(), value.to_string())),
            None => bail!("condition '{condition}' is not in key=value form"),
        })
        .collect()
}
