pub mod cache;
pub mod client;
pub mod config;
pub mod persistence;
pub mod security;
pub mod util;
