pub mod data_type;
pub mod entity;
pub mod property;

pub use data_type::DataType;
pub use entity::{EntityDef, EntityError};
pub use property::{InvalidPropertyError, PropertyDef, PropertyId, PropertyPatch};
