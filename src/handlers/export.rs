use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::service::export::{CSV_FILENAME, workouts_csv};
use crate::{LiftError, router::LiftState};

/// GET /api/export -> CSV attachment, one row per set.
pub async fn export_workouts(State(state): State<LiftState>) -> Result<Response, LiftError> {
    let workouts = state.store.workouts().await?;
    let csv = workouts_csv(&workouts);
    let disposition = format!("attachment; filename=\"{CSV_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
