use crate::client::storage::KvStorage;
use crate::error::LiftError;
use crate::service::catalog::{CATALOG_LEN, CATALOG_VERSION, default_exercises};
use crate::service::export::workouts_csv;
use crate::service::ledger::{
    SetNumbering, attach_exercises, build_workout, new_exercise, next_id, used_exercises,
};
use crate::service::statistics::daily_max;
use crate::types::{Exercise, ExerciseId, NewSet, Statistics, Workout, WorkoutId};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const EXERCISES_KEY: &str = "exercises";
pub const EXERCISES_VERSION_KEY: &str = "exercisesVersion";
pub const WORKOUTS_KEY: &str = "workouts";

/// Workout data kept as three JSON documents in a key/value store.
///
/// Creates rewrite a whole list, so they run one at a time through
/// `writes`; clones share the guard.
#[derive(Debug, Clone)]
pub struct KvRepository<S> {
    storage: S,
    save_timeout: Duration,
    writes: Arc<Mutex<()>>,
}

impl<S: KvStorage> KvRepository<S> {
    pub fn new(storage: S, save_timeout: Duration) -> Self {
        Self {
            storage,
            save_timeout,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored exercises, reseeding the built-in catalogue when the stored copy
    /// is missing, from an older catalogue version, or truncated.
    pub async fn exercises(&self) -> Result<Vec<Exercise>, LiftError> {
        let stored: Option<Vec<Exercise>> = self.storage.get_item(EXERCISES_KEY).await?;
        let version: Option<u32> = self.storage.get_item(EXERCISES_VERSION_KEY).await?;

        match stored {
            Some(exercises)
                if version.is_some_and(|v| v >= CATALOG_VERSION)
                    && exercises.len() >= CATALOG_LEN =>
            {
                Ok(exercises)
            }
            _ => {
                let exercises = default_exercises();
                self.storage.set_item(EXERCISES_KEY, &exercises).await?;
                self.storage
                    .set_item(EXERCISES_VERSION_KEY, &CATALOG_VERSION)
                    .await?;
                info!(
                    version = CATALOG_VERSION,
                    count = exercises.len(),
                    "exercise catalogue reseeded"
                );
                Ok(exercises)
            }
        }
    }

    pub async fn create_exercise(
        &self,
        name: &str,
        muscle_group: &str,
    ) -> Result<Exercise, LiftError> {
        let _guard = self.writes.lock().await;
        let mut exercises = self.exercises().await?;
        let exercise = new_exercise(&exercises, name, muscle_group)?;
        exercises.push(exercise.clone());
        self.storage.set_item(EXERCISES_KEY, &exercises).await?;
        Ok(exercise)
    }

    async fn stored_workouts(&self) -> Result<Vec<Workout>, LiftError> {
        Ok(self
            .storage
            .get_item::<Vec<Workout>>(WORKOUTS_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Newest first, with exercise snapshots.
    pub async fn workouts(&self) -> Result<Vec<Workout>, LiftError> {
        let (workouts, exercises) =
            futures::future::try_join(self.stored_workouts(), self.exercises()).await?;
        Ok(attach_exercises(workouts, &exercises))
    }

    pub async fn workout(&self, id: WorkoutId) -> Result<Option<Workout>, LiftError> {
        Ok(self.workouts().await?.into_iter().find(|w| w.id == id))
    }

    /// Append a workout. Sets are always numbered 1..n here; the write of the
    /// whole workout list is bounded by the save timeout.
    pub async fn create_workout(
        &self,
        name: Option<String>,
        sets: Vec<NewSet>,
    ) -> Result<Workout, LiftError> {
        let _guard = self.writes.lock().await;
        let mut workouts = self.stored_workouts().await?;
        let exercises = self.exercises().await?;
        let id = next_id(workouts.iter().map(|w| w.id));
        let workout = build_workout(
            id,
            name,
            sets,
            &exercises,
            Utc::now(),
            SetNumbering::Positional,
        )?;

        workouts.push(workout.clone().without_snapshots());
        debug!(id, total = workouts.len(), "saving workouts");
        tokio::time::timeout(
            self.save_timeout,
            self.storage.set_item(WORKOUTS_KEY, &workouts),
        )
        .await
        .map_err(|_| LiftError::CloudTimeout { op: "save workouts" })??;
        Ok(workout)
    }

    pub async fn exercises_from_workouts(&self) -> Result<Vec<Exercise>, LiftError> {
        let (workouts, exercises) =
            futures::future::try_join(self.stored_workouts(), self.exercises()).await?;
        Ok(used_exercises(&workouts, &exercises))
    }

    pub async fn statistics(&self, exercise_id: ExerciseId) -> Result<Statistics, LiftError> {
        let (workouts, exercises) =
            futures::future::try_join(self.stored_workouts(), self.exercises()).await?;
        Ok(Statistics {
            exercise: exercises.into_iter().find(|e| e.id == exercise_id),
            data: daily_max(exercise_id, &workouts),
        })
    }

    pub async fn export_csv(&self) -> Result<String, LiftError> {
        Ok(workouts_csv(&self.workouts().await?))
    }
}
