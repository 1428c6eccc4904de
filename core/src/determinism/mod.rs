pub mod json_pretty;
pub mod update_id;
