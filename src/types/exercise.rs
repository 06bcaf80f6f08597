use serde::{Deserialize, Serialize};

pub type ExerciseId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub muscle_group: String,
    pub is_custom: bool,
}

impl Exercise {
    /// Names compare case-insensitively (Unicode aware).
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Body of `POST /api/exercises`. Both fields are optional here so the
/// handler can answer 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateExerciseRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub muscle_group: Option<String>,
}
