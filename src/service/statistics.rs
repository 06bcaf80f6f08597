use crate::types::{ExerciseId, StatisticPoint, Workout, WorkoutSet};

/// One point per calendar day holding the heaviest set of `exercise_id`.
///
/// Sets are visited in ascending workout date; on a tie in weight the first
/// set seen keeps its reps.
pub fn daily_max(exercise_id: ExerciseId, workouts: &[Workout]) -> Vec<StatisticPoint> {
    let mut sets: Vec<(&Workout, &WorkoutSet)> = workouts
        .iter()
        .flat_map(|w| {
            w.workout_sets
                .iter()
                .filter(move |s| s.exercise_id == exercise_id)
                .map(move |s| (w, s))
        })
        .collect();
    sets.sort_by_key(|(w, _)| w.date);

    let mut points: Vec<StatisticPoint> = Vec::new();
    for (workout, set) in sets {
        let day = workout.date.date_naive();
        match points.last_mut() {
            Some(point) if point.date == day => {
                if set.weight > point.weight {
                    point.weight = set.weight;
                    point.reps = set.reps;
                }
            }
            _ => points.push(StatisticPoint {
                date: day,
                weight: set.weight,
                reps: set.reps,
                workout_date: workout.date,
            }),
        }
    }
    points
}
