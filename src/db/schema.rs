//! SQL DDL for initializing the workout storage.

/// SQLite schema with:
/// - `exercises.id` assigned by the application ("max + 1"), so no AUTOINCREMENT
/// - no UNIQUE on exercise names: the built-in catalogue repeats one name
///   across two muscle groups; uniqueness of custom names is checked in memory
/// - `workout_sets.row_id` as the physical key because set ids are
///   timestamp-based and may repeat across workouts
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS exercises (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    muscle_group TEXT NOT NULL,
    is_custom INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS workouts (
    id INTEGER PRIMARY KEY,
    name TEXT NULL,
    date TEXT NOT NULL, -- RFC3339
    created_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS workout_sets (
    row_id INTEGER PRIMARY KEY AUTOINCREMENT,
    id INTEGER NOT NULL,
    workout_id INTEGER NOT NULL REFERENCES workouts(id),
    exercise_id INTEGER NOT NULL,
    weight REAL NOT NULL,
    reps INTEGER NOT NULL,
    set_order INTEGER NOT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_workout_sets_workout_id ON workout_sets(workout_id);
"#;
