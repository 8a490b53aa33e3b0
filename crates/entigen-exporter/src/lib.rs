//! Helpers to convert `EntityDef` models into ORM-specific source text,
//! currently TypeORM entity classes.

pub mod orm;
pub mod typeorm;

pub use orm::OrmExporter;
pub use typeorm::{
    TypeOrmExporter, TypeOrmExporterWithConfig, render_entity as render_typeorm_entity,
};
