use serde::{Deserialize, Serialize};

/// Logical type declared for a dimension value. Stored values are always
/// strings; this governs how they are interpreted at query time.
///
/// The variant order fixes the order in which comparison branches are
/// emitted when one key resolves to several types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionType {
    Number,
    Boolean,
    Date,
    String,
}

impl DimensionType {
    pub fn name(&self) -> &'static str {
        match self {
            DimensionType::Number => "number",
            DimensionType::Boolean => "boolean",
            DimensionType::Date => "date",
            DimensionType::String => "string",
        }
    }
}

impl std::fmt::Display for DimensionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One declared dimension of a fact type: the contract a submitted
/// `{key, value}` entry is checked against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSchema {
    pub key: String,
    pub name: String,
    pub data_type: DimensionType,
    #[serde(default)]
    pub data_unit: Option<String>,
    #[serde(default)]
    pub is_required: bool,
}

/// A fact type: the template declaring which dimensions are valid and
/// required for facts carrying its `key`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FactType {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dimension_schemas: Vec<DimensionSchema>,
}

impl FactType {
    /// Look up the schema entry for a dimension key, if declared.
    pub fn schema(&self, key: &str) -> Option<&DimensionSchema> {
        self.dimension_schemas.iter().find(|s| s.key == key)
    }

    /// Keys of all required dimensions, in declaration order.
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.dimension_schemas
            .iter()
            .filter(|s| s.is_required)
            .map(|s| s.key.as_str())
    }
}
