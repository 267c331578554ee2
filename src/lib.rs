pub mod config;
pub mod http;
pub mod logging;
pub mod mods;
pub mod report;
pub mod run;
