pub mod auth;
pub mod catalog;
pub mod export;
pub mod ledger;
pub mod options;
pub mod statistics;
pub mod store_actor;

pub use store_actor::StoreHandle;
