use entigen_core::EntityDef;

/// Standardized exporter interface for all supported ORMs.
pub trait OrmExporter {
    /// Render one entity as a complete source file.
    fn render_entity(&self, entity: &EntityDef) -> String;
}
