// Shared error, settings and logging plumbing for the config store
pub mod config;
pub mod error;
pub mod logging;
pub mod types;
