use std::fmt;
use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schema::property::InvalidPropertyError;

/// Property data types accepted by the entity generator.
///
/// Each variant serializes to the exact token emitted as the TypeScript type
/// annotation of the generated field. Tokens are not mapped to other types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Number,
    Boolean,
    #[serde(rename = "Date")]
    Date,
    Text,
    Varchar,
    Int,
    BigInt,
    Decimal,
    Float,
    Json,
}

impl DataType {
    /// All supported data types, in the order they are offered to users.
    pub const ALL: [DataType; 11] = [
        DataType::String,
        DataType::Number,
        DataType::Boolean,
        DataType::Date,
        DataType::Text,
        DataType::Varchar,
        DataType::Int,
        DataType::BigInt,
        DataType::Decimal,
        DataType::Float,
        DataType::Json,
    ];

    /// The token used both in model files and in the rendered type annotation.
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Date => "Date",
            DataType::Text => "text",
            DataType::Varchar => "varchar",
            DataType::Int => "int",
            DataType::BigInt => "bigint",
            DataType::Decimal => "decimal",
            DataType::Float => "float",
            DataType::Json => "json",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = InvalidPropertyError;

    /// Tokens are case sensitive: `Date` is accepted, `date` is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidPropertyError::EmptyDataType);
        }
        DataType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| InvalidPropertyError::UnknownDataType(s.to_string()))
    }
}
