pub mod catalog;
pub mod collection;
pub mod config;
pub mod contact;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod preferences;
pub mod render;
pub mod sqlite;
pub mod tasks;
