//! SQLite-backed fact persistence
//!
//! One connection, one facts table, one fact type catalog. Writes run
//! inside a transaction covering catalog lookup, validation, and the row
//! write, so a fact and its dimensions appear atomically or not at all.
//! Reads execute the compiled statement as-is, with its named parameters.

pub mod functions;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{named_params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::error::EngineError;
use crate::materialize::{materialize, DimensionRow, FactRecord};
use crate::model::catalog::{CatalogError, SchemaCatalog};
use crate::model::{DimensionEntry, Fact, FactPatch, FactType, NewFact};
use crate::sql::{plan_query, CompiledQuery};
use crate::validation::validate_dimensions;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite failure: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("dimension encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("corrupt stored row: {message}")]
    Corrupt { message: String },
}

const MIGRATIONS: &str = "
CREATE TABLE IF NOT EXISTS fact_types (
  key TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  description TEXT,
  dimension_schemas TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS facts (
  id TEXT PRIMARY KEY,
  type_key TEXT NOT NULL,
  observed_at TEXT,
  person_id INTEGER,
  resource_id INTEGER,
  event_id INTEGER,
  dimensions TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS idx_facts_type_key ON facts (type_key);
";

pub struct FactStore {
    conn: Connection,
}

impl FactStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        functions::register_regexp(&conn)?;
        conn.execute_batch(MIGRATIONS)?;
        Ok(Self { conn })
    }

    /// Upsert a fact type. Existing facts of the type are not revalidated.
    pub fn put_fact_type(&self, fact_type: &FactType) -> Result<(), StoreError> {
        let schemas = serde_json::to_string(&fact_type.dimension_schemas)?;
        self.conn.execute(
            "INSERT INTO fact_types (key, name, description, dimension_schemas)
             VALUES (:key, :name, :description, :dimension_schemas)
             ON CONFLICT(key) DO UPDATE SET
               name = excluded.name,
               description = excluded.description,
               dimension_schemas = excluded.dimension_schemas",
            named_params! {
                ":key": fact_type.key,
                ":name": fact_type.name,
                ":description": fact_type.description,
                ":dimension_schemas": schemas,
            },
        )?;
        Ok(())
    }

    /// Insert a fact after validating its dimensions against the owning
    /// fact type. Runs in one transaction: no partial fact is ever
    /// visible.
    pub fn insert_fact(&mut self, new: NewFact) -> Result<Fact, EngineError> {
        let tx = self.conn.transaction().map_err(StoreError::from)?;

        let fact_type = load_fact_type(&tx, &new.type_key)?.ok_or_else(|| {
            CatalogError::FactTypeNotFound {
                key: new.type_key.clone(),
            }
        })?;
        validate_dimensions(&new.dimensions, &fact_type.dimension_schemas)?;

        let fact = Fact {
            id: Uuid::now_v7(),
            type_key: new.type_key,
            observed_at: new.observed_at,
            person_id: new.person_id,
            resource_id: new.resource_id,
            event_id: new.event_id,
            dimensions: new.dimensions,
        };
        write_fact(&tx, &fact, WriteMode::Insert)?;
        tx.commit().map_err(StoreError::from)?;

        debug!(fact_id = %fact.id, type_key = %fact.type_key, "inserted fact");
        Ok(fact)
    }

    /// Apply a partial update. A present `dimensions` array is validated
    /// against the fact's (possibly re-targeted) type and replaces the
    /// stored array wholesale.
    pub fn update_fact(&mut self, id: Uuid, patch: FactPatch) -> Result<Fact, EngineError> {
        let tx = self.conn.transaction().map_err(StoreError::from)?;

        let mut fact = load_fact(&tx, &id)?.ok_or(EngineError::FactNotFound { id })?;
        if let Some(type_key) = patch.type_key {
            fact.type_key = type_key;
        }
        if let Some(observed_at) = patch.observed_at {
            fact.observed_at = Some(observed_at);
        }
        if let Some(person_id) = patch.person_id {
            fact.person_id = Some(person_id);
        }
        if let Some(resource_id) = patch.resource_id {
            fact.resource_id = Some(resource_id);
        }
        if let Some(event_id) = patch.event_id {
            fact.event_id = Some(event_id);
        }
        if let Some(dimensions) = patch.dimensions {
            let fact_type = load_fact_type(&tx, &fact.type_key)?.ok_or_else(|| {
                CatalogError::FactTypeNotFound {
                    key: fact.type_key.clone(),
                }
            })?;
            validate_dimensions(&dimensions, &fact_type.dimension_schemas)?;
            fact.dimensions = dimensions;
        }

        write_fact(&tx, &fact, WriteMode::Update)?;
        tx.commit().map_err(StoreError::from)?;

        debug!(fact_id = %fact.id, "updated fact");
        Ok(fact)
    }

    pub fn fact(&self, id: Uuid) -> Result<Fact, EngineError> {
        load_fact(&self.conn, &id)?.ok_or(EngineError::FactNotFound { id })
    }

    /// The read path: parse, resolve, compile, execute, materialize.
    /// Client errors surface before the statement is prepared.
    pub fn query(&self, pairs: &[(String, String)]) -> Result<Vec<FactRecord>, EngineError> {
        let compiled = plan_query(self, pairs)?;
        debug!(params = compiled.params.len(), "executing compiled fact query");
        let rows = self.run_compiled(&compiled)?;
        Ok(materialize(rows))
    }

    fn run_compiled(&self, compiled: &CompiledQuery) -> Result<Vec<DimensionRow>, StoreError> {
        let mut stmt = self.conn.prepare(&compiled.sql)?;
        let params = compiled.param_refs();
        let mapped = stmt.query_map(params.as_slice(), |row| {
            Ok(DimensionRow {
                fact_id: row.get(0)?,
                type_key: row.get(1)?,
                observed_at: row.get(2)?,
                key: row.get(3)?,
                value: row.get(4)?,
            })
        })?;

        let mut rows = Vec::new();
        for row in mapped {
            rows.push(row?);
        }
        Ok(rows)
    }
}

impl SchemaCatalog for FactStore {
    fn fact_type(&self, key: &str) -> Result<FactType, CatalogError> {
        load_fact_type(&self.conn, key)
            .map_err(|error| CatalogError::OperationFailed {
                message: error.to_string(),
            })?
            .ok_or_else(|| CatalogError::FactTypeNotFound {
                key: key.to_string(),
            })
    }

    fn all_fact_types(&self) -> Result<Vec<FactType>, CatalogError> {
        load_all_fact_types(&self.conn).map_err(|error| CatalogError::OperationFailed {
            message: error.to_string(),
        })
    }
}

enum WriteMode {
    Insert,
    Update,
}

fn write_fact(conn: &Connection, fact: &Fact, mode: WriteMode) -> Result<(), StoreError> {
    let dimensions = serde_json::to_string(&fact.dimensions)?;
    let observed_at = fact.observed_at.map(|at| at.to_rfc3339());
    let params = named_params! {
        ":id": fact.id.to_string(),
        ":type_key": fact.type_key,
        ":observed_at": observed_at,
        ":person_id": fact.person_id,
        ":resource_id": fact.resource_id,
        ":event_id": fact.event_id,
        ":dimensions": dimensions,
    };

    match mode {
        WriteMode::Insert => conn.execute(
            "INSERT INTO facts (id, type_key, observed_at, person_id, resource_id, event_id, dimensions)
             VALUES (:id, :type_key, :observed_at, :person_id, :resource_id, :event_id, :dimensions)",
            params,
        )?,
        WriteMode::Update => conn.execute(
            "UPDATE facts SET
               type_key = :type_key,
               observed_at = :observed_at,
               person_id = :person_id,
               resource_id = :resource_id,
               event_id = :event_id,
               dimensions = :dimensions
             WHERE id = :id",
            params,
        )?,
    };
    Ok(())
}

fn load_fact_type(conn: &Connection, key: &str) -> Result<Option<FactType>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT key, name, description, dimension_schemas FROM fact_types WHERE key = :key",
    )?;
    let row = stmt
        .query_row(named_params! { ":key": key }, |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .optional()?;

    row.map(fact_type_from_row).transpose()
}

fn load_all_fact_types(conn: &Connection) -> Result<Vec<FactType>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT key, name, description, dimension_schemas FROM fact_types ORDER BY key",
    )?;
    let mapped = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut fact_types = Vec::new();
    for row in mapped {
        fact_types.push(fact_type_from_row(row?)?);
    }
    Ok(fact_types)
}

fn fact_type_from_row(
    (key, name, description, schemas): (String, String, Option<String>, String),
) -> Result<FactType, StoreError> {
    let dimension_schemas = serde_json::from_str(&schemas)?;
    Ok(FactType {
        key,
        name,
        description,
        dimension_schemas,
    })
}

fn load_fact(conn: &Connection, id: &Uuid) -> Result<Option<Fact>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, type_key, observed_at, person_id, resource_id, event_id, dimensions
         FROM facts WHERE id = :id",
    )?;
    let row = stmt
        .query_row(named_params! { ":id": id.to_string() }, |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<i64>>(3)?,
                row.get::<_, Option<i64>>(4)?,
                row.get::<_, Option<i64>>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .optional()?;

    let Some((raw_id, type_key, observed_at, person_id, resource_id, event_id, dimensions)) = row
    else {
        return Ok(None);
    };

    let id = Uuid::parse_str(&raw_id).map_err(|error| StoreError::Corrupt {
        message: format!("fact id '{raw_id}': {error}"),
    })?;
    let observed_at = observed_at
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|at| at.with_timezone(&Utc))
                .map_err(|error| StoreError::Corrupt {
                    message: format!("observed_at '{raw}': {error}"),
                })
        })
        .transpose()?;
    let dimensions: Vec<DimensionEntry> = serde_json::from_str(&dimensions)?;

    Ok(Some(Fact {
        id,
        type_key,
        observed_at,
        person_id,
        resource_id,
        event_id,
        dimensions,
    }))
}
