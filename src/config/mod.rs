pub mod config_model;
mod env_expanding;
pub mod parse;
