use crate::error::LiftError;
use crate::service::catalog::default_exercises;
use crate::service::statistics::daily_max;
use crate::types::{Exercise, ExerciseId, NewSet, Statistics, Workout, WorkoutId, WorkoutSet};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

pub const EMPTY_SETS_MESSAGE: &str = "Sets array is required and must not be empty";

/// In-memory exercise and workout store.
///
/// Owned by exactly one writer (the store actor); all id schemes below rely
/// on that.
#[derive(Debug, Clone)]
pub struct Ledger {
    exercises: Vec<Exercise>,
    workouts: Vec<Workout>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Fresh ledger seeded with the built-in catalogue and no workouts.
    pub fn new() -> Self {
        Self::from_parts(default_exercises(), Vec::new())
    }

    /// Rebuild from previously persisted rows. Snapshots are dropped; they are
    /// attached again on read.
    pub fn from_parts(exercises: Vec<Exercise>, workouts: Vec<Workout>) -> Self {
        let workouts = workouts.into_iter().map(Workout::without_snapshots).collect();
        Self {
            exercises,
            workouts,
        }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Validate and build a new custom exercise without storing it.
    pub fn prepare_exercise(&self, name: &str, muscle_group: &str) -> Result<Exercise, LiftError> {
        new_exercise(&self.exercises, name, muscle_group)
    }

    pub fn commit_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }

    pub fn create_exercise(&mut self, name: &str, muscle_group: &str) -> Result<Exercise, LiftError> {
        let exercise = self.prepare_exercise(name, muscle_group)?;
        self.commit_exercise(exercise.clone());
        Ok(exercise)
    }

    /// All workouts, newest first, with exercise snapshots attached.
    pub fn workouts(&self) -> Vec<Workout> {
        attach_exercises(self.workouts.clone(), &self.exercises)
    }

    pub fn workout(&self, id: WorkoutId) -> Option<Workout> {
        let workout = self.workouts.iter().find(|w| w.id == id)?.clone();
        attach_exercises(vec![workout], &self.exercises).pop()
    }

    /// Validate and build a new workout without storing it.
    pub fn prepare_workout(
        &self,
        name: Option<String>,
        sets: Vec<NewSet>,
        now: DateTime<Utc>,
    ) -> Result<Workout, LiftError> {
        let id = next_id(self.workouts.iter().map(|w| w.id));
        build_workout(id, name, sets, &self.exercises, now, SetNumbering::KeepGiven)
    }

    pub fn commit_workout(&mut self, workout: Workout) {
        self.workouts.push(workout.without_snapshots());
    }

    pub fn create_workout(
        &mut self,
        name: Option<String>,
        sets: Vec<NewSet>,
        now: DateTime<Utc>,
    ) -> Result<Workout, LiftError> {
        let workout = self.prepare_workout(name, sets, now)?;
        self.commit_workout(workout.clone());
        Ok(workout)
    }

    pub fn exercises_from_workouts(&self) -> Vec<Exercise> {
        used_exercises(&self.workouts, &self.exercises)
    }

    pub fn statistics(&self, exercise_id: ExerciseId) -> Statistics {
        Statistics {
            exercise: self.exercise(exercise_id).cloned(),
            data: daily_max(exercise_id, &self.workouts),
        }
    }
}

/// How `set_order` is assigned to incoming sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetNumbering {
    /// Keep a caller-provided non-zero order, otherwise use the position.
    KeepGiven,
    /// Always number by position, 1..n.
    Positional,
}

/// "max existing + 1", starting at 1.
pub fn next_id(ids: impl IntoIterator<Item = i64>) -> i64 {
    ids.into_iter().max().unwrap_or(0).max(0) + 1
}

pub fn new_exercise(
    existing: &[Exercise],
    name: &str,
    muscle_group: &str,
) -> Result<Exercise, LiftError> {
    if existing.iter().any(|e| e.has_name(name)) {
        return Err(LiftError::DuplicateExercise);
    }
    Ok(Exercise {
        id: next_id(existing.iter().map(|e| e.id)),
        name: name.to_string(),
        muscle_group: muscle_group.to_string(),
        is_custom: true,
    })
}

pub fn build_workout(
    id: WorkoutId,
    name: Option<String>,
    sets: Vec<NewSet>,
    exercises: &[Exercise],
    now: DateTime<Utc>,
    numbering: SetNumbering,
) -> Result<Workout, LiftError> {
    if sets.is_empty() {
        return Err(LiftError::bad_request(EMPTY_SETS_MESSAGE));
    }
    let base_id = now.timestamp_millis();
    let workout_sets = sets
        .into_iter()
        .zip(0u32..)
        .map(|(set, index)| {
            let set_order = match (numbering, set.set_order) {
                (SetNumbering::KeepGiven, Some(order)) if order > 0 => order,
                _ => index + 1,
            };
            WorkoutSet {
                id: base_id + i64::from(index),
                exercise_id: set.exercise_id,
                weight: set.weight,
                reps: set.reps,
                set_order,
                created_at: now,
                exercise: exercises.iter().find(|e| e.id == set.exercise_id).cloned(),
            }
        })
        .collect();
    Ok(Workout {
        id,
        name: name.filter(|n| !n.is_empty()),
        date: now,
        created_at: now,
        workout_sets,
    })
}

/// Attach exercise snapshots and order newest first.
pub fn attach_exercises(mut workouts: Vec<Workout>, exercises: &[Exercise]) -> Vec<Workout> {
    for set in workouts.iter_mut().flat_map(|w| w.workout_sets.iter_mut()) {
        set.exercise = exercises.iter().find(|e| e.id == set.exercise_id).cloned();
    }
    workouts.sort_by(|a, b| b.date.cmp(&a.date));
    workouts
}

pub fn used_exercises(workouts: &[Workout], exercises: &[Exercise]) -> Vec<Exercise> {
    let used: HashSet<ExerciseId> = workouts
        .iter()
        .flat_map(|w| w.workout_sets.iter().map(|s| s.exercise_id))
        .collect();
    exercises
        .iter()
        .filter(|e| used.contains(&e.id))
        .cloned()
        .collect()
}
