pub mod cli;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod results;
pub mod search;
pub mod storage;
