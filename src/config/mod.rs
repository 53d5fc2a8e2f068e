mod r#impl;
mod structs;

pub use r#impl::{get_config, init_config_from_path};
pub use structs::*;
