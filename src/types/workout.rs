use super::exercise::{Exercise, ExerciseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type WorkoutId = i64;
pub type SetId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub id: SetId,
    pub exercise_id: ExerciseId,
    /// Kilograms; `0` means bodyweight.
    pub weight: f64,
    pub reps: u32,
    /// 1-based position within the workout.
    pub set_order: u32,
    pub created_at: DateTime<Utc>,
    /// Snapshot attached at read time, never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Exercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: WorkoutId,
    pub name: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub workout_sets: Vec<WorkoutSet>,
}

impl Workout {
    /// Calendar day of the workout, `YYYY-MM-DD` in UTC.
    pub fn day(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub(crate) fn without_snapshots(mut self) -> Self {
        for set in &mut self.workout_sets {
            set.exercise = None;
        }
        self
    }
}

/// A set as submitted by the caller, before ids and timestamps are assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSet {
    pub exercise_id: ExerciseId,
    pub weight: f64,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_order: Option<u32>,
}

impl NewSet {
    pub fn new(exercise_id: ExerciseId, weight: f64, reps: u32) -> Self {
        Self {
            exercise_id,
            weight,
            reps,
            set_order: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWorkoutRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sets: Option<Vec<NewSet>>,
}
