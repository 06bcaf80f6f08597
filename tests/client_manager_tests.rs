use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use liftlog::client::{BackendKind, ClientSettings, CloudStorage, KvStorage};
use liftlog::router::{LiftState, lift_router};
use liftlog::types::NewSet;
use liftlog::{DataManager, LiftError, StoreHandle};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use url::Url;

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "liftlog-client-{tag}-{}-{nanos}",
        std::process::id()
    ))
}

async fn serve(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    Url::parse(&format!("http://{addr}/")).expect("invalid test server url")
}

async fn serve_api() -> (Url, StoreHandle) {
    let store = StoreHandle::spawn(None)
        .await
        .expect("failed to spawn store");
    let url = serve(lift_router(LiftState::new(store.clone()))).await;
    (url, store)
}

/// In-memory stand-in for the host's storage bridge. Writes to `hang_on`
/// never answer.
#[derive(Clone, Default)]
struct FakeBridge {
    items: Arc<Mutex<HashMap<String, String>>>,
    hang_on: Option<&'static str>,
}

async fn bridge_get_item(State(bridge): State<FakeBridge>, Json(body): Json<Value>) -> Json<Value> {
    let key = body["key"].as_str().unwrap_or_default();
    let value = bridge.items.lock().unwrap().get(key).cloned();
    Json(json!({ "value": value }))
}

async fn bridge_set_item(State(bridge): State<FakeBridge>, Json(body): Json<Value>) -> Json<Value> {
    let key = body["key"].as_str().unwrap_or_default().to_string();
    if bridge.hang_on.is_some_and(|k| k == key) {
        tokio::time::sleep(Duration::from_secs(60)).await;
    }
    let value = body["value"].as_str().unwrap_or_default().to_string();
    bridge.items.lock().unwrap().insert(key, value);
    Json(json!({ "ok": true }))
}

async fn bridge_remove_item(
    State(bridge): State<FakeBridge>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let key = body["key"].as_str().unwrap_or_default();
    bridge.items.lock().unwrap().remove(key);
    Json(json!({ "ok": true }))
}

async fn bridge_get_items(
    State(bridge): State<FakeBridge>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let items = bridge.items.lock().unwrap();
    let values: HashMap<&str, &String> = body["keys"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .filter_map(|k| items.get(k).map(|v| (k, v)))
        .collect();
    Json(json!({ "values": values }))
}

async fn bridge_get_keys(State(bridge): State<FakeBridge>) -> Json<Value> {
    let keys: Vec<String> = bridge.items.lock().unwrap().keys().cloned().collect();
    Json(json!({ "keys": keys }))
}

async fn serve_bridge(bridge: FakeBridge) -> Url {
    let app = Router::new()
        .route("/ready", get(|| async { "ok" }))
        .route("/getItem", post(bridge_get_item))
        .route("/setItem", post(bridge_set_item))
        .route("/removeItem", post(bridge_remove_item))
        .route("/getItems", post(bridge_get_items))
        .route("/getKeys", post(bridge_get_keys))
        .with_state(bridge);
    serve(app).await
}

fn cloud_settings(bridge: Url, api: Option<Url>) -> ClientSettings {
    ClientSettings {
        cloud_bridge_url: Some(bridge),
        api_base_url: api,
        local_storage_dir: temp_dir("unused"),
        cloud_timeout: Duration::from_millis(500),
        cloud_save_timeout: Duration::from_millis(300),
        ..ClientSettings::default()
    }
}

#[tokio::test]
async fn local_backend_round_trip() {
    let dir = temp_dir("local");
    let settings = ClientSettings {
        local_storage_dir: dir.clone(),
        ..ClientSettings::default()
    };
    let manager = DataManager::connect(&settings).await.unwrap();
    assert_eq!(manager.backend().kind(), BackendKind::Local);

    assert_eq!(manager.exercises().await.len(), 72);
    let custom = manager.create_exercise("Пуловер", "Грудь").await.unwrap();
    assert_eq!(custom.id, 73);
    assert_eq!(manager.exercises().await.len(), 73);
    assert!(matches!(
        manager.create_exercise("пуловер", "Грудь").await,
        Err(LiftError::DuplicateExercise)
    ));

    let empty = manager.create_workout(None, Vec::new()).await;
    assert!(matches!(empty, Err(LiftError::BadRequest(_))));

    let workout = manager
        .create_workout(
            Some("Грудь".to_string()),
            vec![
                NewSet::new(1, 90.0, 5),
                NewSet {
                    exercise_id: custom.id,
                    weight: 20.0,
                    reps: 12,
                    set_order: Some(7),
                },
            ],
        )
        .await
        .unwrap();
    let orders: Vec<u32> = workout.workout_sets.iter().map(|s| s.set_order).collect();
    assert_eq!(orders, vec![1, 2]);

    let listed = manager.workouts().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(
        manager.workout(workout.id).await.unwrap().map(|w| w.id),
        Some(workout.id)
    );
    assert!(manager.workout(workout.id + 1).await.unwrap().is_none());

    let used: Vec<i64> = manager
        .exercises_from_workouts()
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(used, vec![1, custom.id]);

    let stats = manager.statistics(1).await;
    assert_eq!(stats.data.len(), 1);
    assert_eq!(stats.data[0].weight, 90.0);

    let groups = manager.exercises_by_muscle().await;
    assert_eq!(groups.values().map(Vec::len).sum::<usize>(), 73);
    assert!(groups["Грудь"].iter().any(|e| e.id == custom.id));

    let csv = manager.export_csv().await.unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains(",Грудь,Пуловер,Грудь,20,12,2"));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn api_backend_reads_server_state() {
    let (api, store) = serve_api().await;
    let settings = ClientSettings {
        api_base_url: Some(api),
        local_storage_dir: temp_dir("api"),
        ..ClientSettings::default()
    };
    let manager = DataManager::connect(&settings).await.unwrap();
    assert_eq!(manager.backend().kind(), BackendKind::Api);

    let created = manager
        .create_workout(None, vec![NewSet::new(13, 140.0, 3)])
        .await
        .unwrap();
    assert_eq!(store.workouts().await.unwrap().len(), 1);
    assert_eq!(
        manager.workout(created.id).await.unwrap().map(|w| w.id),
        Some(created.id)
    );
    assert!(manager.workout(999).await.unwrap().is_none());

    assert!(matches!(
        manager.create_exercise("Становая тяга", "Спина").await,
        Err(LiftError::DuplicateExercise)
    ));

    let stats = manager.statistics(13).await;
    assert_eq!(stats.exercise.map(|e| e.name), Some("Становая тяга".to_string()));
    assert!(manager.export_csv().await.unwrap().contains("Становая тяга"));
}

#[tokio::test]
async fn cloud_backend_stores_through_the_bridge() {
    let bridge = FakeBridge::default();
    let url = serve_bridge(bridge.clone()).await;
    let manager = DataManager::connect(&cloud_settings(url, None))
        .await
        .unwrap();
    assert_eq!(manager.backend().kind(), BackendKind::Cloud);

    assert_eq!(manager.exercises().await.len(), 72);
    manager
        .create_workout(None, vec![NewSet::new(16, 0.0, 10)])
        .await
        .unwrap();

    let items = bridge.items.lock().unwrap().clone();
    assert_eq!(items.get("exercisesVersion").map(String::as_str), Some("4"));
    let stored: Value = serde_json::from_str(&items["workouts"]).unwrap();
    assert_eq!(stored.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn cloud_keys_are_scoped_per_user() {
    let bridge = FakeBridge::default();
    bridge
        .items
        .lock()
        .unwrap()
        .insert("user_8_theme".to_string(), "\"dark\"".to_string());
    let url = serve_bridge(bridge.clone()).await;
    let cloud = CloudStorage::new(
        reqwest::Client::new(),
        url,
        Some(7),
        Duration::from_millis(500),
    );
    assert!(cloud.is_available().await);
    assert_eq!(cloud.user_key("workouts"), "user_7_workouts");

    cloud.set_item("goal", &120u32).await.unwrap();
    cloud.set_raw("note", "not json".to_string()).await.unwrap();
    assert!(bridge.items.lock().unwrap().contains_key("user_7_goal"));

    let mut keys = cloud.keys().await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["goal".to_string(), "note".to_string()]);

    let items = cloud.get_items(&["goal", "note", "missing"]).await.unwrap();
    assert_eq!(items.get("goal"), Some(&json!(120)));
    assert_eq!(items.get("note"), Some(&json!("not json")));
    assert!(!items.contains_key("missing"));

    cloud.remove_item("goal").await.unwrap();
    assert_eq!(cloud.get_item::<u32>("goal").await.unwrap(), None);
}

#[tokio::test]
async fn cloud_save_timeout_falls_back_to_api() {
    let bridge = FakeBridge {
        hang_on: Some("workouts"),
        ..FakeBridge::default()
    };
    let bridge_url = serve_bridge(bridge).await;
    let (api, store) = serve_api().await;

    let manager = DataManager::connect(&cloud_settings(bridge_url, Some(api)))
        .await
        .unwrap();
    assert_eq!(manager.backend().kind(), BackendKind::Cloud);

    let saved = manager
        .create_workout(Some("Спина".to_string()), vec![NewSet::new(16, 10.0, 8)])
        .await
        .unwrap();
    assert_eq!(saved.name.as_deref(), Some("Спина"));

    let on_server = store.workouts().await.unwrap();
    assert_eq!(on_server.len(), 1);
    assert_eq!(on_server[0].workout_sets[0].exercise_id, 16);
}

#[tokio::test]
async fn cloud_save_without_fallback_reports_failure() {
    let bridge = FakeBridge {
        hang_on: Some("workouts"),
        ..FakeBridge::default()
    };
    let bridge_url = serve_bridge(bridge).await;
    let manager = DataManager::connect(&cloud_settings(bridge_url, None))
        .await
        .unwrap();

    let result = manager
        .create_workout(None, vec![NewSet::new(1, 50.0, 5)])
        .await;
    assert!(matches!(result, Err(LiftError::SaveFailed)));
    assert!(manager.workouts().await.is_empty());
}

#[tokio::test]
async fn unreachable_bridge_falls_back_to_local_files() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = temp_dir("detect");
    let settings = ClientSettings {
        cloud_bridge_url: Some(Url::parse(&format!("http://{addr}/bridge")).unwrap()),
        local_storage_dir: dir.clone(),
        cloud_timeout: Duration::from_millis(300),
        ..ClientSettings::default()
    };
    let manager = DataManager::connect(&settings).await.unwrap();
    assert_eq!(manager.backend().kind(), BackendKind::Local);
    assert!(manager.workouts().await.is_empty());
    assert!(manager.statistics(1).await.data.is_empty());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn unreadable_local_files_fall_back() {
    let dir = temp_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("exercises.json"), "{not json").unwrap();
    std::fs::write(dir.join("workouts.json"), "{not json").unwrap();

    let settings = ClientSettings {
        local_storage_dir: dir.clone(),
        ..ClientSettings::default()
    };
    let manager = DataManager::connect(&settings).await.unwrap();
    assert_eq!(manager.backend().kind(), BackendKind::Local);

    assert_eq!(manager.exercises().await.len(), 72);
    assert!(manager.workouts().await.is_empty());
    let stats = manager.statistics(1).await;
    assert!(stats.exercise.is_none());
    assert!(stats.data.is_empty());
    assert!(manager.export_csv().await.is_err());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn read_errors_serve_the_last_loaded_lists() {
    let dir = temp_dir("stale");
    let settings = ClientSettings {
        local_storage_dir: dir.clone(),
        // every read goes to storage, the cache only keeps the last value
        exercises_ttl: Duration::ZERO,
        workouts_ttl: Duration::ZERO,
        ..ClientSettings::default()
    };
    let manager = DataManager::connect(&settings).await.unwrap();

    manager.create_exercise("Пуловер", "Грудь").await.unwrap();
    manager
        .create_workout(None, vec![NewSet::new(1, 70.0, 6)])
        .await
        .unwrap();
    assert_eq!(manager.exercises().await.len(), 73);
    assert_eq!(manager.workouts().await.len(), 1);

    std::fs::write(dir.join("exercises.json"), "{not json").unwrap();
    std::fs::write(dir.join("workouts.json"), "{not json").unwrap();

    assert_eq!(manager.exercises().await.len(), 73);
    assert_eq!(manager.workouts().await.len(), 1);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn saving_a_workout_refreshes_the_cached_list() {
    let dir = temp_dir("invalidate");
    let settings = ClientSettings {
        local_storage_dir: dir.clone(),
        workouts_ttl: Duration::from_secs(3600),
        ..ClientSettings::default()
    };
    let manager = DataManager::connect(&settings).await.unwrap();

    assert!(manager.workouts().await.is_empty());
    let saved = manager
        .create_workout(None, vec![NewSet::new(13, 120.0, 5)])
        .await
        .unwrap();
    let listed = manager.workouts().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn api_base_keeps_its_path_prefix() {
    let store = StoreHandle::spawn(None)
        .await
        .expect("failed to spawn store");
    let url = serve(Router::new().nest("/app", lift_router(LiftState::new(store.clone())))).await;

    let settings = ClientSettings {
        api_base_url: Some(url.join("app").unwrap()),
        local_storage_dir: temp_dir("prefix"),
        ..ClientSettings::default()
    };
    let manager = DataManager::connect(&settings).await.unwrap();
    assert_eq!(manager.backend().kind(), BackendKind::Api);

    assert_eq!(manager.exercises().await.len(), 72);
    manager
        .create_workout(None, vec![NewSet::new(1, 50.0, 10)])
        .await
        .unwrap();
    assert_eq!(store.workouts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_bridge_is_reported_as_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cloud = CloudStorage::new(
        reqwest::Client::new(),
        Url::parse(&format!("http://{addr}/")).unwrap(),
        None,
        Duration::from_millis(500),
    );
    let err = cloud.get_raw("workouts").await.unwrap_err();
    assert!(matches!(err, LiftError::CloudUnavailable));
    assert!(err.is_cloud_failure());
}
