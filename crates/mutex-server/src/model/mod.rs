// Data models and configuration

pub mod config;
