pub mod schema;

pub use schema::{
    DataType, EntityDef, EntityError, InvalidPropertyError, PropertyDef, PropertyId,
    PropertyPatch,
};
