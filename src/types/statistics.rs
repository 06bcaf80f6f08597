use super::exercise::Exercise;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Best set of one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatisticPoint {
    pub date: NaiveDate,
    pub weight: f64,
    pub reps: u32,
    pub workout_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Statistics {
    pub exercise: Option<Exercise>,
    pub data: Vec<StatisticPoint>,
}

impl Statistics {
    pub fn empty() -> Self {
        Self::default()
    }
}
