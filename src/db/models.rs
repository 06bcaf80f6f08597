use crate::types::{Exercise, Workout, WorkoutSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbExercise {
    pub id: i64,
    pub name: String,
    pub muscle_group: String,
    pub is_custom: bool,
}

impl From<DbExercise> for Exercise {
    fn from(d: DbExercise) -> Self {
        Exercise {
            id: d.id,
            name: d.name,
            muscle_group: d.muscle_group,
            is_custom: d.is_custom,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbWorkout {
    pub id: i64,
    pub name: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbWorkoutSet {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub weight: f64,
    pub reps: i64,
    pub set_order: i64,
    pub created_at: DateTime<Utc>,
}

impl From<DbWorkoutSet> for WorkoutSet {
    fn from(d: DbWorkoutSet) -> Self {
        WorkoutSet {
            id: d.id,
            exercise_id: d.exercise_id,
            weight: d.weight,
            reps: u32::try_from(d.reps).unwrap_or_default(),
            set_order: u32::try_from(d.set_order).unwrap_or_default(),
            created_at: d.created_at,
            exercise: None,
        }
    }
}

impl DbWorkout {
    pub fn into_workout(self, workout_sets: Vec<WorkoutSet>) -> Workout {
        Workout {
            id: self.id,
            name: self.name,
            date: self.date,
            created_at: self.created_at,
            workout_sets,
        }
    }
}
