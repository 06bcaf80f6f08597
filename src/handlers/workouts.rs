use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::middleware::JsonBody;
use crate::service::ledger::EMPTY_SETS_MESSAGE;
use crate::types::{CreateWorkoutRequest, Workout, WorkoutId};
use crate::{LiftError, router::LiftState};

/// GET /api/workouts -> newest first.
pub async fn list_workouts(
    State(state): State<LiftState>,
) -> Result<Json<Vec<Workout>>, LiftError> {
    Ok(Json(state.store.workouts().await?))
}

/// POST /api/workouts
pub async fn create_workout(
    State(state): State<LiftState>,
    JsonBody(body): JsonBody<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>), LiftError> {
    let Some(sets) = body.sets.filter(|s| !s.is_empty()) else {
        return Err(LiftError::bad_request(EMPTY_SETS_MESSAGE));
    };

    let workout = state.store.create_workout(body.name, sets).await?;
    info!(
        id = workout.id,
        sets = workout.workout_sets.len(),
        "workout created"
    );
    Ok((StatusCode::CREATED, Json(workout)))
}

/// GET /api/workouts/{id}
pub async fn get_workout(
    State(state): State<LiftState>,
    Path(id): Path<String>,
) -> Result<Json<Workout>, LiftError> {
    let id: WorkoutId = id
        .parse()
        .map_err(|_| LiftError::bad_request("Invalid workout ID"))?;

    state
        .store
        .workout(id)
        .await?
        .map(Json)
        .ok_or_else(|| LiftError::NotFound("Workout not found".to_string()))
}
