pub mod config;
pub mod formatter;
pub mod installer;
pub mod models;
pub mod payments;
