use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use facet_core::{FactStore, NewFact};

/// Insert a fact from a JSON document
#[derive(Debug, Parser)]
pub struct InsertCommand {
    /// Path to a JSON file holding the fact payload
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl InsertCommand {
    pub fn execute(&self, db: &Path) -> Result<i32> {
        let file = File::open(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let new_fact: NewFact = serde_json::from_reader(file)
            .with_context(|| format!("invalid fact payload {}", self.file.display()))?;

        let mut store = FactStore::open(db)
            .with_context(|| format!("failed to open database {}", db.display()))?;

        match store.insert_fact(new_fact) {
            Ok(fact) => {
                println!("{}", serde_json::to_string_pretty(&fact)?);
                Ok(0)
            }
            Err(error) => {
                eprintln!("{}: {}", error.title(), error);
                Ok(1)
            }
        }
    }
}
