//! Wire and domain types shared by the server store, the HTTP layer and the
//! client data manager.

pub mod auth;
pub mod exercise;
pub mod statistics;
pub mod workout;

pub use auth::{SessionUser, SignInRequest};
pub use exercise::{CreateExerciseRequest, Exercise, ExerciseId};
pub use statistics::{StatisticPoint, Statistics};
pub use workout::{CreateWorkoutRequest, NewSet, SetId, Workout, WorkoutId, WorkoutSet};
