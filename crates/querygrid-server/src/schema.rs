//! Schema model and validation.
//!
//! The schema is an external collaborator seen through a narrow surface:
//! which root fields exist per operation kind, and whether the schema as a
//! whole is structurally sound. Structural validity drives the availability
//! gauge; per-query validation drives the validation-error class.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::parse::{OperationKind, ParsedQuery};

/// The schema failed its structural check.
#[derive(Debug, Clone, Error)]
#[error("schema is invalid: {0}")]
pub struct SchemaError(pub String);

/// Active schema: the root fields a query may select, per operation kind.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    description: Option<String>,
    query_fields: BTreeSet<String>,
    mutation_fields: BTreeSet<String>,
}

impl Schema {
    /// A schema serving the given query root fields.
    pub fn with_query_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: None,
            query_fields: fields.into_iter().map(Into::into).collect(),
            mutation_fields: BTreeSet::new(),
        }
    }

    /// Add mutation root fields.
    pub fn and_mutation_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mutation_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// A schema carrying only a description and no root fields — the
    /// canonical structurally invalid schema.
    pub fn description_only(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            query_fields: BTreeSet::new(),
            mutation_fields: BTreeSet::new(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Structural check: a schema that exposes no query root fields cannot
    /// answer anything and is invalid.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.query_fields.is_empty() {
            return Err(SchemaError("schema defines no query root fields".to_string()));
        }
        Ok(())
    }

    /// Static validation of a parsed query: every selected root field must
    /// exist for the document's operation kind. Returns one diagnostic per
    /// unknown field; empty means the query validates.
    pub fn validate_query(&self, query: &ParsedQuery) -> Vec<String> {
        let fields = match query.operation {
            OperationKind::Query => &self.query_fields,
            OperationKind::Mutation => &self.mutation_fields,
        };
        query
            .root_fields
            .iter()
            .filter(|name| !fields.contains(*name))
            .map(|name| format!("cannot query field '{name}' on this schema"))
            .collect()
    }
}
