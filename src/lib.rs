pub mod analysis;
pub mod audio;
pub mod config;
pub mod models;
pub mod recommend;
pub mod report;
pub mod server;
pub mod summary;
