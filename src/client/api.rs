use crate::client::as_directory;
use crate::error::{ApiErrorResponse, LiftError};
use crate::types::{
    CreateExerciseRequest, CreateWorkoutRequest, Exercise, ExerciseId, NewSet, Statistics,
    Workout, WorkoutId,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Typed client for the server's `/api` routes, mounted under `base`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self {
            client,
            base: as_directory(base),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `path` is relative to the base, e.g. `api/workouts`.
    fn url(&self, path: &str) -> Result<Url, LiftError> {
        Ok(self.base.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LiftError> {
        let resp = self.client.get(self.url(path)?).send().await?;
        Self::parse(resp).await
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, LiftError> {
        let resp = Self::ensure_success(resp).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, LiftError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match resp.json::<ApiErrorResponse>().await {
            Ok(body) => body.error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        debug!(status = %status, message = %message, "API call failed");
        Err(match status {
            StatusCode::CONFLICT => LiftError::DuplicateExercise,
            _ => LiftError::Api { status, message },
        })
    }

    pub async fn exercises(&self) -> Result<Vec<Exercise>, LiftError> {
        self.get_json("api/exercises").await
    }

    pub async fn create_exercise(
        &self,
        name: &str,
        muscle_group: &str,
    ) -> Result<Exercise, LiftError> {
        let body = CreateExerciseRequest {
            name: Some(name.to_string()),
            muscle_group: Some(muscle_group.to_string()),
        };
        let resp = self
            .client
            .post(self.url("api/exercises")?)
            .json(&body)
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn exercises_from_workouts(&self) -> Result<Vec<Exercise>, LiftError> {
        self.get_json("api/exercises/from-workouts").await
    }

    pub async fn workouts(&self) -> Result<Vec<Workout>, LiftError> {
        self.get_json("api/workouts").await
    }

    pub async fn workout(&self, id: WorkoutId) -> Result<Option<Workout>, LiftError> {
        match self.get_json(&format!("api/workouts/{id}")).await {
            Ok(workout) => Ok(Some(workout)),
            Err(LiftError::Api {
                status: StatusCode::NOT_FOUND,
                ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_workout(
        &self,
        name: Option<String>,
        sets: Vec<NewSet>,
    ) -> Result<Workout, LiftError> {
        let body = CreateWorkoutRequest {
            name,
            sets: Some(sets),
        };
        let resp = self
            .client
            .post(self.url("api/workouts")?)
            .json(&body)
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn statistics(&self, exercise_id: ExerciseId) -> Result<Statistics, LiftError> {
        self.get_json(&format!("api/statistics?exercise_id={exercise_id}"))
            .await
    }

    pub async fn export_csv(&self) -> Result<String, LiftError> {
        let resp = self.client.get(self.url("api/export")?).send().await?;
        let resp = Self::ensure_success(resp).await?;
        Ok(resp.text().await?)
    }
}
