// File-backed per-cluster configuration store
pub mod file_config;
pub mod store;

pub use file_config::FileConfig;
pub use store::{ConfigStore, StoreReader};
