pub mod date_serde;
pub mod time_utils;
