use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    auth::sign_in,
    exercises::{create_exercise, exercises_from_workouts, list_exercises},
    export::export_workouts,
    statistics::exercise_statistics,
    workouts::{create_workout, get_workout, list_workouts},
};
use crate::service::store_actor::StoreHandle;

#[derive(Clone)]
pub struct LiftState {
    pub store: StoreHandle,
}

impl LiftState {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }
}

pub fn lift_router(state: LiftState) -> Router {
    Router::new()
        .route("/api/exercises", get(list_exercises).post(create_exercise))
        .route("/api/exercises/from-workouts", get(exercises_from_workouts))
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/{id}", get(get_workout))
        .route("/api/statistics", get(exercise_statistics))
        .route("/api/export", get(export_workouts))
        .route("/api/auth/signin", post(sign_in))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
