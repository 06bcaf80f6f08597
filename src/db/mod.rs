//! Database module: durable storage for the server store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `WorkoutsStorage`, the query layer used by the store actor

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbExercise, DbWorkout, DbWorkoutSet};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, WorkoutsStorage};
