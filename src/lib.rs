pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use client::DataManager;
pub use error::LiftError;
pub use service::store_actor::StoreHandle;
