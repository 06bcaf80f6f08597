//! Choice lists offered when entering sets.

use crate::types::Exercise;
use serde::Serialize;
use std::collections::BTreeMap;

const BODYWEIGHT_LABEL: &str = "Собственный вес";
const UNGROUPED_LABEL: &str = "Другие";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeightOption {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RepsOption {
    pub value: u32,
    pub label: String,
}

/// Bodyweight, then 0.5 kg steps up to 20 kg, then 2.5 kg steps up to 200 kg.
pub fn weight_options() -> Vec<WeightOption> {
    let light = (1..=40).map(|i| f64::from(i) * 0.5);
    let heavy = (9..=80).map(|i| f64::from(i) * 2.5);
    std::iter::once(WeightOption {
        value: 0.0,
        label: BODYWEIGHT_LABEL.to_string(),
    })
    .chain(light.chain(heavy).map(|value| WeightOption {
        value,
        label: format!("{value} кг"),
    }))
    .collect()
}

pub fn reps_options() -> Vec<RepsOption> {
    (1..=50)
        .map(|value| RepsOption {
            value,
            label: value.to_string(),
        })
        .collect()
}

pub fn group_by_muscle(exercises: &[Exercise]) -> BTreeMap<String, Vec<Exercise>> {
    let mut groups: BTreeMap<String, Vec<Exercise>> = BTreeMap::new();
    for exercise in exercises {
        let key = if exercise.muscle_group.is_empty() {
            UNGROUPED_LABEL
        } else {
            exercise.muscle_group.as_str()
        };
        groups.entry(key.to_string()).or_default().push(exercise.clone());
    }
    groups
}
