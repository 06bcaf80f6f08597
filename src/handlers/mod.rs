pub mod auth;
pub mod exercises;
pub mod export;
pub mod statistics;
pub mod workouts;
