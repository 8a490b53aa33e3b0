pub mod config;
pub mod file_format;
pub mod name_case;

pub use config::{EntigenConfig, TableNameFallback, default_file_suffix};
pub use file_format::FileFormat;
pub use name_case::NameCase;
