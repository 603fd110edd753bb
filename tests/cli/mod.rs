pub mod binary;
pub mod toml_config;
