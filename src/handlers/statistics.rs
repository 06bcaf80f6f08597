use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::types::{ExerciseId, Statistics};
use crate::{LiftError, router::LiftState};

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    pub exercise_id: Option<String>,
}

/// GET /api/statistics?exercise_id=N
pub async fn exercise_statistics(
    State(state): State<LiftState>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<Statistics>, LiftError> {
    let Some(raw) = query.exercise_id.filter(|s| !s.is_empty()) else {
        return Err(LiftError::bad_request("exercise_id parameter is required"));
    };
    let exercise_id: ExerciseId = raw
        .trim()
        .parse()
        .map_err(|_| LiftError::bad_request("Invalid exercise_id"))?;

    Ok(Json(state.store.statistics(exercise_id).await?))
}
