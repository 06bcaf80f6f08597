use axum::{Json, extract::State, http::StatusCode};

use crate::middleware::JsonBody;
use crate::types::{CreateExerciseRequest, Exercise};
use crate::{LiftError, router::LiftState};

/// GET /api/exercises
pub async fn list_exercises(
    State(state): State<LiftState>,
) -> Result<Json<Vec<Exercise>>, LiftError> {
    Ok(Json(state.store.exercises().await?))
}

/// POST /api/exercises
pub async fn create_exercise(
    State(state): State<LiftState>,
    JsonBody(body): JsonBody<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<Exercise>), LiftError> {
    let (Some(name), Some(muscle_group)) = (
        body.name.filter(|s| !s.is_empty()),
        body.muscle_group.filter(|s| !s.is_empty()),
    ) else {
        return Err(LiftError::bad_request("Name and muscle_group are required"));
    };

    let exercise = state.store.create_exercise(name, muscle_group).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

/// GET /api/exercises/from-workouts
pub async fn exercises_from_workouts(
    State(state): State<LiftState>,
) -> Result<Json<Vec<Exercise>>, LiftError> {
    Ok(Json(state.store.exercises_from_workouts().await?))
}
