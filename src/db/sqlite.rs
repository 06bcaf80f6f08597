use crate::db::models::{DbExercise, DbWorkout, DbWorkoutSet};
use crate::db::schema::SQLITE_INIT;
use crate::error::LiftError;
use crate::types::{Exercise, Workout, WorkoutSet};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct WorkoutsStorage {
    pool: SqlitePool,
}

impl WorkoutsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the
    /// schema. A single connection: the store actor is the only writer, and
    /// `sqlite::memory:` databases are per-connection.
    pub async fn connect(database_url: &str) -> Result<Self, LiftError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), LiftError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert `exercises` only when the table is empty. Returns how many rows
    /// were written.
    pub async fn seed_exercises(&self, exercises: &[Exercise]) -> Result<usize, LiftError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercises")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for exercise in exercises {
            sqlx::query(
                "INSERT INTO exercises (id, name, muscle_group, is_custom) VALUES (?, ?, ?, ?)",
            )
            .bind(exercise.id)
            .bind(&exercise.name)
            .bind(&exercise.muscle_group)
            .bind(exercise.is_custom)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        info!(count = exercises.len(), "seeded exercise catalogue");
        Ok(exercises.len())
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, LiftError> {
        let rows: Vec<DbExercise> = sqlx::query_as(
            "SELECT id, name, muscle_group, is_custom FROM exercises ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn insert_exercise(&self, exercise: &Exercise) -> Result<(), LiftError> {
        sqlx::query("INSERT INTO exercises (id, name, muscle_group, is_custom) VALUES (?, ?, ?, ?)")
            .bind(exercise.id)
            .bind(&exercise.name)
            .bind(&exercise.muscle_group)
            .bind(exercise.is_custom)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All workouts in insertion order, sets in stored order, no snapshots.
    pub async fn list_workouts(&self) -> Result<Vec<Workout>, LiftError> {
        let workouts: Vec<DbWorkout> =
            sqlx::query_as("SELECT id, name, date, created_at FROM workouts ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let sets: Vec<DbWorkoutSet> = sqlx::query_as(
            r#"SELECT id, workout_id, exercise_id, weight, reps, set_order, created_at
               FROM workout_sets ORDER BY workout_id, row_id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_workout: HashMap<i64, Vec<WorkoutSet>> = HashMap::new();
        for set in sets {
            by_workout.entry(set.workout_id).or_default().push(set.into());
        }

        Ok(workouts
            .into_iter()
            .map(|w| {
                let sets = by_workout.remove(&w.id).unwrap_or_default();
                w.into_workout(sets)
            })
            .collect())
    }

    /// Insert a workout and all of its sets in a single transaction.
    pub async fn insert_workout(&self, workout: &Workout) -> Result<(), LiftError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO workouts (id, name, date, created_at) VALUES (?, ?, ?, ?)")
            .bind(workout.id)
            .bind(workout.name.as_deref())
            .bind(workout.date)
            .bind(workout.created_at)
            .execute(&mut *tx)
            .await?;

        for set in &workout.workout_sets {
            sqlx::query(
                r#"
                INSERT INTO workout_sets (
                    id, workout_id, exercise_id, weight, reps, set_order, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(set.id)
            .bind(workout.id)
            .bind(set.exercise_id)
            .bind(set.weight)
            .bind(i64::from(set.reps))
            .bind(i64::from(set.set_order))
            .bind(set.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
