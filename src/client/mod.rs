pub mod amp_client;
pub mod amp_json_protocol;
