use std::borrow::Cow;

use entigen_config::{EntigenConfig, TableNameFallback};
use entigen_core::{EntityDef, PropertyDef};
use entigen_naming::to_class_name;
use tracing::debug;

use crate::orm::OrmExporter;

/// Decorators always imported from `typeorm`, in emission order.
const BASE_IMPORTS: [&str; 4] = [
    "Column",
    "CreateDateColumn",
    "Entity",
    "PrimaryGeneratedColumn",
];
/// Imported after the base set only when timestamps are enabled.
const UPDATE_TIMESTAMP_IMPORT: &str = "UpdateDateColumn";

const INDENT: &str = "  ";
const PRIMARY_COLUMN: &str = "@PrimaryGeneratedColumn()";

type ColumnOptionRule = fn(&PropertyDef) -> Option<String>;

/// `@Column` options, in the order they are emitted.
const COLUMN_OPTIONS: [ColumnOptionRule; 4] = [
    length_option,
    default_option,
    unique_option,
    nullable_option,
];

pub struct TypeOrmExporter;

impl OrmExporter for TypeOrmExporter {
    fn render_entity(&self, entity: &EntityDef) -> String {
        debug!(
            entity = %entity.name,
            properties = entity.properties.len(),
            "rendering TypeORM entity"
        );
        render_entity(entity)
    }
}

/// TypeORM exporter that resolves empty table names with the project's
/// configured fallback before rendering.
pub struct TypeOrmExporterWithConfig {
    table_name_fallback: TableNameFallback,
}

impl TypeOrmExporterWithConfig {
    pub fn new(config: &EntigenConfig) -> Self {
        Self {
            table_name_fallback: config.table_name_fallback(),
        }
    }

    fn resolve<'a>(&self, entity: &'a EntityDef) -> Cow<'a, EntityDef> {
        let table_name = self
            .table_name_fallback
            .resolve(&entity.name, &entity.table_name);
        if table_name == entity.table_name {
            return Cow::Borrowed(entity);
        }
        debug!(entity = %entity.name, table = %table_name, "resolved empty table name");
        let mut resolved = entity.clone();
        resolved.table_name = table_name;
        Cow::Owned(resolved)
    }
}

impl OrmExporter for TypeOrmExporterWithConfig {
    fn render_entity(&self, entity: &EntityDef) -> String {
        TypeOrmExporter.render_entity(&self.resolve(entity))
    }
}

/// Render a single entity into a TypeORM entity class.
///
/// Output layout:
/// - one `import` line from `typeorm`, followed by a blank line
/// - `@Entity('<tableName>')` with the table name passed through verbatim
/// - `export class <ClassName> {` where the class name is the entity name
///   with its first character uppercased
/// - an implicit `id: number` primary generated column
/// - one decorated field per property, in list order
/// - `createdAt` / `updatedAt` when timestamps are enabled
/// - a closing `}` with no trailing newline
///
/// Every member is followed by a blank line. The function is deterministic
/// and never fails, including on empty names and empty property lists.
pub fn render_entity(entity: &EntityDef) -> String {
    let class_name = to_class_name(&entity.name);

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "import {{ {} }} from 'typeorm';",
        import_symbols(entity.include_timestamps).join(", ")
    ));
    lines.push(String::new());
    lines.push(format!("@Entity('{}')", entity.table_name));
    lines.push(format!("export class {} {{", class_name));

    render_member(&mut lines, PRIMARY_COLUMN, "id: number;");

    for property in &entity.properties {
        render_member(&mut lines, &column_decorator(property), &field_line(property));
    }

    if entity.include_timestamps {
        render_member(&mut lines, "@CreateDateColumn()", "createdAt: Date;");
        render_member(&mut lines, "@UpdateDateColumn()", "updatedAt: Date;");
    }

    lines.push("}".into());

    lines.join("\n")
}

/// Symbols named in the `import` line.
pub fn import_symbols(include_timestamps: bool) -> Vec<&'static str> {
    let mut symbols = BASE_IMPORTS.to_vec();
    if include_timestamps {
        symbols.push(UPDATE_TIMESTAMP_IMPORT);
    }
    symbols
}

/// Options that apply to a non-primary property, in emission order.
pub fn column_options(property: &PropertyDef) -> Vec<String> {
    COLUMN_OPTIONS
        .iter()
        .filter_map(|rule| rule(property))
        .collect()
}

/// Decorator line for a property, without indentation.
///
/// Primary keys always get `@PrimaryGeneratedColumn()`; their length,
/// default, unique and nullable settings are not emitted.
pub fn column_decorator(property: &PropertyDef) -> String {
    if property.is_primary_key {
        return PRIMARY_COLUMN.into();
    }
    let options = column_options(property);
    if options.is_empty() {
        "@Column()".into()
    } else {
        format!("@Column({{ {} }})", options.join(", "))
    }
}

/// Field declaration for a property, without indentation.
pub fn field_line(property: &PropertyDef) -> String {
    let marker = if property.is_nullable() { "?" } else { "" };
    format!("{}{}: {};", property.name, marker, property.data_type)
}

fn render_member(lines: &mut Vec<String>, decorator: &str, field: &str) {
    lines.push(format!("{INDENT}{decorator}"));
    lines.push(format!("{INDENT}{field}"));
    lines.push(String::new());
}

fn length_option(property: &PropertyDef) -> Option<String> {
    property.length().map(|length| format!("length: {length}"))
}

fn default_option(property: &PropertyDef) -> Option<String> {
    property
        .default_value()
        .map(|value| format!("default: '{value}'"))
}

fn unique_option(property: &PropertyDef) -> Option<String> {
    property.is_unique.then(|| "unique: true".to_string())
}

fn nullable_option(property: &PropertyDef) -> Option<String> {
    property.allow_null.then(|| "nullable: true".to_string())
}

#[cfg(test)]
mod helper_tests {
    use super::*;
    use entigen_core::DataType;
    use rstest::rstest;

    fn prop(name: &str, ty: DataType) -> PropertyDef {
        PropertyDef::new(name, ty).unwrap()
    }

    #[test]
    fn test_import_symbols() {
        assert_eq!(
            import_symbols(false),
            vec!["Column", "CreateDateColumn", "Entity", "PrimaryGeneratedColumn"]
        );
        assert_eq!(
            import_symbols(true),
            vec![
                "Column",
                "CreateDateColumn",
                "Entity",
                "PrimaryGeneratedColumn",
                "UpdateDateColumn"
            ]
        );
    }

    #[test]
    fn test_column_options_fixed_order() {
        let p = prop("name", DataType::Varchar)
            .nullable()
            .unique()
            .with_default("anon")
            .with_length("255");
        assert_eq!(
            column_options(&p),
            vec!["length: 255", "default: 'anon'", "unique: true", "nullable: true"]
        );
    }

    #[test]
    fn test_column_options_skip_absent() {
        assert!(column_options(&prop("name", DataType::String)).is_empty());
        assert_eq!(
            column_options(&prop("name", DataType::String).with_default("x").nullable()),
            vec!["default: 'x'", "nullable: true"]
        );
    }

    #[test]
    fn test_column_options_empty_strings_are_absent() {
        let p = prop("name", DataType::String).with_default("").with_length("");
        assert!(column_options(&p).is_empty());
    }

    #[test]
    fn test_column_options_ignore_is_optional() {
        let p = prop("nickname", DataType::String).optional();
        assert!(column_options(&p).is_empty());
        assert_eq!(column_decorator(&p), "@Column()");
    }

    #[test]
    fn test_default_value_is_not_escaped() {
        let p = prop("motto", DataType::String).with_default("it's");
        assert_eq!(column_decorator(&p), "@Column({ default: 'it's' })");
    }

    #[test]
    fn test_column_decorator_variants() {
        assert_eq!(column_decorator(&prop("a", DataType::Int)), "@Column()");
        assert_eq!(
            column_decorator(&prop("a", DataType::Varchar).with_length("100")),
            "@Column({ length: 100 })"
        );
        assert_eq!(
            column_decorator(&prop("a", DataType::String).unique()),
            "@Column({ unique: true })"
        );
    }

    #[test]
    fn test_primary_key_suppresses_options() {
        let p = prop("uuid", DataType::String)
            .primary_key()
            .with_length("36")
            .with_default("x")
            .unique()
            .nullable();
        assert_eq!(column_decorator(&p), "@PrimaryGeneratedColumn()");
    }

    #[rstest]
    #[case(false, false, "bio: text;")]
    #[case(true, false, "bio?: text;")]
    #[case(false, true, "bio?: text;")]
    #[case(true, true, "bio?: text;")]
    fn test_field_line_nullability(
        #[case] optional: bool,
        #[case] allow_null: bool,
        #[case] expected: &str,
    ) {
        let mut p = prop("bio", DataType::Text);
        p.is_optional = optional;
        p.allow_null = allow_null;
        assert_eq!(field_line(&p), expected);
    }

    #[rstest]
    #[case(DataType::String, "string")]
    #[case(DataType::Number, "number")]
    #[case(DataType::Boolean, "boolean")]
    #[case(DataType::Date, "Date")]
    #[case(DataType::Text, "text")]
    #[case(DataType::Varchar, "varchar")]
    #[case(DataType::Int, "int")]
    #[case(DataType::BigInt, "bigint")]
    #[case(DataType::Decimal, "decimal")]
    #[case(DataType::Float, "float")]
    #[case(DataType::Json, "json")]
    fn test_field_line_type_passes_through(#[case] ty: DataType, #[case] token: &str) {
        assert_eq!(field_line(&prop("value", ty)), format!("value: {token};"));
    }

    #[test]
    fn test_primary_key_nullability_still_marks_field() {
        let p = prop("code", DataType::String).primary_key().nullable();
        assert_eq!(field_line(&p), "code?: string;");
    }
}
