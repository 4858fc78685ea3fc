use facet_core::{
    CatalogError, DimensionEntry, DimensionSchema, DimensionType, FactStore, FactType, NewFact,
    SchemaCatalog,
};

#[allow(dead_code)]
pub fn dimension(key: &str, data_type: DimensionType, is_required: bool) -> DimensionSchema {
    DimensionSchema {
        key: key.to_string(),
        name: key.to_string(),
        data_type,
        data_unit: None,
        is_required,
    }
}

#[allow(dead_code)]
pub fn fact_type(key: &str, schemas: Vec<DimensionSchema>) -> FactType {
    FactType {
        key: key.to_string(),
        name: key.to_string(),
        description: None,
        dimension_schemas: schemas,
    }
}

/// The blood-pressure fact type: two required numeric dimensions.
#[allow(dead_code)]
pub fn bp_fact_type() -> FactType {
    fact_type(
        "bp",
        vec![
            dimension("systolic", DimensionType::Number, true),
            dimension("diastolic", DimensionType::Number, true),
        ],
    )
}

#[allow(dead_code)]
pub fn store_with(fact_types: &[FactType]) -> FactStore {
    let store = FactStore::open_in_memory().expect("open in-memory store");
    for fact_type in fact_types {
        store.put_fact_type(fact_type).expect("seed fact type");
    }
    store
}

#[allow(dead_code)]
pub fn new_fact(type_key: &str, dimensions: &[(&str, &str)]) -> NewFact {
    NewFact {
        type_key: type_key.to_string(),
        observed_at: None,
        person_id: None,
        resource_id: None,
        event_id: None,
        dimensions: dimensions
            .iter()
            .map(|(key, value)| DimensionEntry::new(*key, *value))
            .collect(),
    }
}

#[allow(dead_code)]
pub fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Catalog fake for exercising the planning path without a database.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    fact_types: Vec<FactType>,
    failure: Option<String>,
}

#[allow(dead_code)]
impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fact_type(mut self, fact_type: FactType) -> Self {
        self.fact_types.push(fact_type);
        self
    }

    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

impl SchemaCatalog for InMemoryCatalog {
    fn fact_type(&self, key: &str) -> Result<FactType, CatalogError> {
        if let Some(message) = &self.failure {
            return Err(CatalogError::OperationFailed {
                message: message.clone(),
            });
        }
        self.fact_types
            .iter()
            .find(|fact_type| fact_type.key == key)
            .cloned()
            .ok_or_else(|| CatalogError::FactTypeNotFound {
                key: key.to_string(),
            })
    }

    fn all_fact_types(&self) -> Result<Vec<FactType>, CatalogError> {
        if let Some(message) = &self.failure {
            return Err(CatalogError::OperationFailed {
                message: message.clone(),
            });
        }
        Ok(self.fact_types.clone())
    }
}
