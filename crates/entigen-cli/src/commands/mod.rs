pub mod export;
pub mod init;
pub mod new;
pub mod property;
pub mod render;
pub mod schema;

pub use export::cmd_export;
pub use init::cmd_init;
pub use new::cmd_new;
pub use property::{PropertyCommand, cmd_property};
pub use render::cmd_render;
pub use schema::cmd_schema;
