use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use facet_core::{FactStore, FactType};

/// Upsert fact types from a YAML document
#[derive(Debug, Parser)]
pub struct LoadTypesCommand {
    /// Path to a YAML file holding a list of fact types
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl LoadTypesCommand {
    pub fn execute(&self, db: &Path) -> Result<i32> {
        let fact_types = parse_fact_types(&self.file)?;
        let store = FactStore::open(db)
            .with_context(|| format!("failed to open database {}", db.display()))?;

        for fact_type in &fact_types {
            store
                .put_fact_type(fact_type)
                .with_context(|| format!("failed to store fact type '{}'", fact_type.key))?;
        }

        println!("loaded {} fact type(s)", fact_types.len());
        Ok(0)
    }
}

pub fn parse_fact_types(path: &Path) -> Result<Vec<FactType>> {
    let file =
        File::open(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_reader(file)
        .with_context(|| format!("invalid fact type document {}", path.display()))
}
