pub mod insert;
pub mod load_types;
pub mod query;

pub use insert::InsertCommand;
pub use load_types::LoadTypesCommand;
pub use query::QueryCommand;
