pub mod api;
pub mod config;
pub mod storage;
pub mod task;
pub mod utils;
