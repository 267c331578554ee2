#![allow(dead_code)]

pub mod logs;
pub mod registry;

pub use logs::capture_warnings;
pub use registry::{ScriptedRegistry, mod_list_body, mod_url};
