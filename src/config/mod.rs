mod r#impl;
mod structs;
pub mod validators;

pub use r#impl::{get_config, init_config, init_config_from, try_get_config, update_config};
pub use structs::*;
