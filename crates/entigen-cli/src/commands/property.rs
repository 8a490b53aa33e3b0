use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;
use entigen_core::{DataType, EntityDef, PropertyDef, PropertyId, PropertyPatch};

use crate::utils::{find_model, load_config, read_model, write_model};

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// Append a property to an entity model.
    Add(AddArgs),
    /// Change fields of an existing property.
    Edit(EditArgs),
    /// Delete a property.
    Remove {
        /// Model name or path.
        entity: String,
        /// Property id or name.
        property: String,
    },
    /// Show the properties of an entity model.
    List {
        /// Model name or path.
        entity: String,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Model name or path.
    pub entity: String,
    #[arg(short = 'n', long = "name")]
    pub name: String,
    #[arg(short = 't', long = "type", default_value = "string")]
    pub data_type: String,
    #[arg(long = "default")]
    pub default_value: Option<String>,
    #[arg(long = "length")]
    pub length: Option<String>,
    #[arg(long)]
    pub optional: bool,
    #[arg(long)]
    pub unique: bool,
    #[arg(long)]
    pub nullable: bool,
    #[arg(long = "primary-key")]
    pub primary_key: bool,
}

/// Omitted fields are left unchanged. An empty `--default` or `--length`
/// clears the value.
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Model name or path.
    pub entity: String,
    /// Property id or name.
    pub property: String,
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,
    #[arg(short = 't', long = "type")]
    pub data_type: Option<String>,
    #[arg(long = "default")]
    pub default_value: Option<String>,
    #[arg(long = "length")]
    pub length: Option<String>,
    #[arg(long)]
    pub optional: Option<bool>,
    #[arg(long)]
    pub unique: Option<bool>,
    #[arg(long)]
    pub nullable: Option<bool>,
    #[arg(long = "primary-key")]
    pub primary_key: Option<bool>,
}

pub fn cmd_property(command: PropertyCommand) -> Result<()> {
    match command {
        PropertyCommand::Add(args) => cmd_property_add(args),
        PropertyCommand::Edit(args) => cmd_property_edit(args),
        PropertyCommand::Remove { entity, property } => cmd_property_remove(&entity, &property),
        PropertyCommand::List { entity } => cmd_property_list(&entity),
    }
}

fn cmd_property_add(args: AddArgs) -> Result<()> {
    let (path, mut entity) = open_entity(&args.entity)?;

    let mut property = PropertyDef::parse(args.name, &args.data_type)
        .with_context(|| format!("supported types: {}", supported_types()))?;
    property.default_value = args.default_value;
    property.length = args.length;
    property.is_optional = args.optional;
    property.is_unique = args.unique;
    property.allow_null = args.nullable;
    property.is_primary_key = args.primary_key;

    let name = property.name.clone();
    let id = entity
        .add_property(property)
        .with_context(|| format!("add property to {}", entity_label(&path)))?
        .clone();
    write_model(&path, &entity)?;

    println!(
        "{} {} {}",
        "Added property".bright_green(),
        name.bright_white(),
        format!("({id})").bright_black()
    );
    Ok(())
}

fn cmd_property_edit(args: EditArgs) -> Result<()> {
    let (path, mut entity) = open_entity(&args.entity)?;
    let updated = edit_property(&path, &mut entity, args)?;
    println!(
        "{} {}",
        "Updated property".bright_green(),
        describe(&updated)
    );
    Ok(())
}

/// Merge the requested changes and persist the model.
fn edit_property(path: &Path, entity: &mut EntityDef, args: EditArgs) -> Result<PropertyDef> {
    let id = resolve_property(entity, &args.property)?;

    let patch = PropertyPatch {
        name: args.name,
        data_type: args
            .data_type
            .as_deref()
            .map(str::parse::<DataType>)
            .transpose()
            .with_context(|| format!("supported types: {}", supported_types()))?,
        default_value: args.default_value,
        length: args.length,
        is_optional: args.optional,
        is_unique: args.unique,
        allow_null: args.nullable,
        is_primary_key: args.primary_key,
    };
    if patch.is_empty() {
        bail!("nothing to change for property '{}'", args.property);
    }

    let updated = entity
        .update_property(&id, &patch)
        .with_context(|| format!("edit property in {}", entity_label(path)))?
        .clone();
    write_model(path, entity)?;
    Ok(updated)
}

fn cmd_property_remove(entity_key: &str, property_key: &str) -> Result<()> {
    let (path, mut entity) = open_entity(entity_key)?;
    let id = resolve_property(&entity, property_key)?;
    let removed = entity.remove_property(&id)?;
    write_model(&path, &entity)?;

    println!(
        "{} {}",
        "Removed property".bright_yellow(),
        removed.name.bright_white()
    );
    Ok(())
}

fn cmd_property_list(entity_key: &str) -> Result<()> {
    let (_, entity) = open_entity(entity_key)?;

    let table = if entity.table_name.is_empty() {
        "(no table)".to_string()
    } else {
        entity.table_name.clone()
    };
    println!(
        "{} {}",
        entity.name.bright_cyan().bold(),
        format!("-> {table}").cyan()
    );
    if entity.properties.is_empty() {
        println!("  {}", "(no properties)".bright_black());
    }
    for property in &entity.properties {
        println!(
            "  {} {}",
            describe(property),
            format!("({})", property.id).bright_black()
        );
    }
    Ok(())
}

fn open_entity(key: &str) -> Result<(PathBuf, EntityDef)> {
    let config = load_config()?;
    let path = find_model(&config, key)?;
    let entity = read_model(&path)?;
    Ok((path, entity))
}

fn resolve_property(entity: &EntityDef, key: &str) -> Result<PropertyId> {
    match entity.find_property(key) {
        Some(property) => Ok(property.id.clone()),
        None => bail!("property '{}' not found in entity '{}'", key, entity.name),
    }
}

fn entity_label(path: &Path) -> String {
    path.display().to_string()
}

fn describe(property: &PropertyDef) -> String {
    let mut line = format!(
        "{}: {}",
        property.name.bright_white(),
        property.data_type.to_string().bright_magenta()
    );
    for badge in badges(property) {
        line.push(' ');
        line.push_str(&format!("[{badge}]").yellow().to_string());
    }
    line
}

/// Short labels for the flags and settings a property carries.
pub fn badges(property: &PropertyDef) -> Vec<String> {
    let mut out = Vec::new();
    if property.is_optional {
        out.push("Optional".to_string());
    }
    if property.is_unique {
        out.push("Unique".to_string());
    }
    if property.is_primary_key {
        out.push("Primary Key".to_string());
    }
    if property.allow_null {
        out.push("Nullable".to_string());
    }
    if let Some(value) = property.default_value() {
        out.push(format!("Default: {value}"));
    }
    if let Some(length) = property.length() {
        out.push(format!("Length: {length}"));
    }
    out
}

fn supported_types() -> String {
    DataType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
