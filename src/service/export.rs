use crate::types::Workout;
use std::borrow::Cow;

pub const CSV_HEADERS: [&str; 7] = [
    "Дата тренировки",
    "Название тренировки",
    "Упражнение",
    "Группа мышц",
    "Вес (кг)",
    "Повторения",
    "Номер подхода",
];

pub const CSV_FILENAME: &str = "workout_history.csv";

const DEFAULT_WORKOUT_NAME: &str = "Тренировка";
const UNKNOWN_EXERCISE: &str = "Неизвестное упражнение";
const UNKNOWN_MUSCLE_GROUP: &str = "Неизвестная группа";

/// Render one row per set, in the order the workouts are given.
///
/// Expects workouts with exercise snapshots attached; sets without one fall
/// back to the "unknown" labels.
pub fn workouts_csv(workouts: &[Workout]) -> String {
    let mut rows = vec![CSV_HEADERS.join(",")];
    for workout in workouts {
        let day = workout.day();
        let name = workout.name.as_deref().unwrap_or(DEFAULT_WORKOUT_NAME);
        for set in &workout.workout_sets {
            let (exercise, group) = set
                .exercise
                .as_ref()
                .map(|e| (e.name.as_str(), e.muscle_group.as_str()))
                .unwrap_or((UNKNOWN_EXERCISE, UNKNOWN_MUSCLE_GROUP));
            let row = [
                field(&day),
                field(name),
                field(exercise),
                field(group),
                Cow::Owned(set.weight.to_string()),
                Cow::Owned(set.reps.to_string()),
                Cow::Owned(set.set_order.to_string()),
            ];
            rows.push(row.join(","));
        }
    }
    rows.join("\n")
}

fn field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ledger::Ledger;
    use crate::types::NewSet;
    use chrono::{TimeZone, Utc};

    #[test]
    fn one_row_per_set_with_mapped_fields() {
        let mut ledger = Ledger::new();
        ledger
            .create_workout(
                Some("Ноги, тяжёлый день".into()),
                vec![NewSet::new(28, 102.5, 5), NewSet::new(500, 0.0, 12)],
                Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            )
            .unwrap();
        ledger
            .create_workout(
                None,
                vec![NewSet::new(1, 80.0, 8)],
                Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap(),
            )
            .unwrap();

        let csv = workouts_csv(&ledger.workouts());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Дата тренировки,Название тренировки,Упражнение,Группа мышц,Вес (кг),Повторения,Номер подхода"
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "2024-06-03,Тренировка,Жим лежа,Грудь,80,8,1");
        assert_eq!(
            lines[2],
            "2024-06-01,\"Ноги, тяжёлый день\",Приседания со штангой,Ноги,102.5,5,1"
        );
        assert_eq!(
            lines[3],
            "2024-06-01,\"Ноги, тяжёлый день\",Неизвестное упражнение,Неизвестная группа,0,12,2"
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn empty_history_is_header_only() {
        assert_eq!(workouts_csv(&[]), CSV_HEADERS.join(","));
    }
}
