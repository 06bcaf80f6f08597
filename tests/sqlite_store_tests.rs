use liftlog::StoreHandle;
use liftlog::db::WorkoutsStorage;
use liftlog::types::NewSet;
use std::{
    fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_database_url(tag: &str) -> (String, std::path::PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "liftlog-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    (format!("sqlite:{}", temp_path.display()), temp_path)
}

#[tokio::test]
async fn store_survives_restart() {
    let (database_url, temp_path) = temp_database_url("restart");

    let storage = WorkoutsStorage::connect(&database_url)
        .await
        .expect("failed to open database");
    let store = StoreHandle::spawn(Some(storage))
        .await
        .expect("failed to spawn store");

    let custom = store
        .create_exercise("Тяга к подбородку", "Плечи")
        .await
        .expect("create exercise");
    let workout = store
        .create_workout(
            Some("Плечи".to_string()),
            vec![
                NewSet::new(custom.id, 40.0, 10),
                NewSet {
                    exercise_id: 1,
                    weight: 60.0,
                    reps: 8,
                    set_order: Some(5),
                },
            ],
        )
        .await
        .expect("create workout");
    assert_eq!(workout.workout_sets[1].set_order, 5);

    // a second store over the same file sees everything written by the first
    let storage = WorkoutsStorage::connect(&database_url)
        .await
        .expect("failed to reopen database");
    let reopened = StoreHandle::spawn(Some(storage))
        .await
        .expect("failed to spawn second store");

    let exercises = reopened.exercises().await.unwrap();
    assert_eq!(exercises.len(), 73);
    assert!(exercises.iter().any(|e| e.id == custom.id && e.is_custom));

    let fetched = reopened
        .workout(workout.id)
        .await
        .unwrap()
        .expect("workout persisted");
    assert_eq!(fetched.name.as_deref(), Some("Плечи"));
    assert_eq!(fetched.workout_sets.len(), 2);
    assert_eq!(fetched.workout_sets[0].weight, 40.0);
    assert_eq!(
        fetched.workout_sets[0].exercise.as_ref().map(|e| e.name.as_str()),
        Some("Тяга к подбородку")
    );
    assert_eq!(fetched.workout_sets[1].set_order, 5);

    let duplicate = reopened.create_exercise("тяга к подбородку", "Плечи").await;
    assert!(matches!(duplicate, Err(liftlog::LiftError::DuplicateExercise)));

    let _ = fs::remove_file(temp_path);
}
