use crate::client::api::ApiClient;
use crate::client::cache::TtlCache;
use crate::client::cloud::CloudStorage;
use crate::client::kv_repo::KvRepository;
use crate::client::storage::LocalStorage;
use crate::client::ClientSettings;
use crate::error::LiftError;
use crate::service::catalog::default_exercises;
use crate::service::ledger::EMPTY_SETS_MESSAGE;
use crate::service::options::group_by_muscle;
use crate::types::{Exercise, ExerciseId, NewSet, Statistics, Workout, WorkoutId};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Storage the data manager talks to.
#[derive(Debug, Clone)]
pub enum Backend {
    Cloud(KvRepository<CloudStorage>),
    Local(KvRepository<LocalStorage>),
    Api(ApiClient),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Cloud,
    Local,
    Api,
}

// Every backend exposes the same operation names and signatures.
macro_rules! dispatch {
    ($backend:expr, $b:ident => $call:expr) => {
        match $backend {
            Backend::Cloud($b) => $call,
            Backend::Local($b) => $call,
            Backend::Api($b) => $call,
        }
    };
}

impl Backend {
    /// Cloud when the bridge is configured and answers; otherwise the API
    /// when configured; otherwise local files.
    pub async fn detect(settings: &ClientSettings, client: reqwest::Client) -> Self {
        if let Some(bridge) = settings.cloud_bridge_url.clone() {
            let cloud = CloudStorage::new(
                client.clone(),
                bridge,
                settings.cloud_user_id,
                settings.cloud_timeout,
            );
            if cloud.is_available().await {
                return Backend::Cloud(KvRepository::new(cloud, settings.cloud_save_timeout));
            }
            warn!("cloud storage configured but unavailable");
        }
        if let Some(base) = settings.api_base_url.clone() {
            info!(base = %base, "using HTTP API storage");
            return Backend::Api(ApiClient::new(client, base));
        }
        info!(dir = %settings.local_storage_dir.display(), "using local storage");
        Backend::Local(KvRepository::new(
            LocalStorage::new(settings.local_storage_dir.clone()),
            settings.cloud_save_timeout,
        ))
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Cloud(_) => BackendKind::Cloud,
            Backend::Local(_) => BackendKind::Local,
            Backend::Api(_) => BackendKind::Api,
        }
    }
}

/// Caching front for one backend, with the cloud -> API save fallback.
pub struct DataManager {
    backend: Backend,
    fallback: Option<ApiClient>,
    exercises: Mutex<TtlCache<Vec<Exercise>>>,
    workouts: Mutex<TtlCache<Vec<Workout>>>,
}

impl DataManager {
    pub fn new(backend: Backend, fallback: Option<ApiClient>, settings: &ClientSettings) -> Self {
        Self {
            backend,
            fallback,
            exercises: Mutex::new(TtlCache::new(settings.exercises_ttl)),
            workouts: Mutex::new(TtlCache::new(settings.workouts_ttl)),
        }
    }

    /// Build the HTTP client, detect the backend and wire the API fallback.
    pub async fn connect(settings: &ClientSettings) -> Result<Self, LiftError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("liftlog/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;
        let backend = Backend::detect(settings, client.clone()).await;
        let fallback = settings
            .api_base_url
            .clone()
            .map(|base| ApiClient::new(client, base));
        Ok(Self::new(backend, fallback, settings))
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Cached for the exercise TTL. Never fails: on a backend error the last
    /// known list (or the built-in catalogue) is returned.
    pub async fn exercises(&self) -> Vec<Exercise> {
        let mut cache = self.exercises.lock().await;
        if let Some(cached) = cache.get() {
            debug!("using cached exercises");
            return cached;
        }
        match dispatch!(&self.backend, b => b.exercises().await) {
            Ok(exercises) => {
                cache.put(exercises.clone());
                exercises
            }
            Err(e) => {
                error!(error = %e, "loading exercises failed");
                cache.last().unwrap_or_else(default_exercises)
            }
        }
    }

    /// Exercises for the picker, grouped by muscle group.
    pub async fn exercises_by_muscle(&self) -> BTreeMap<String, Vec<Exercise>> {
        group_by_muscle(&self.exercises().await)
    }

    pub async fn create_exercise(
        &self,
        name: &str,
        muscle_group: &str,
    ) -> Result<Exercise, LiftError> {
        let created = dispatch!(&self.backend, b => b.create_exercise(name, muscle_group).await)
            .inspect_err(|e| error!(error = %e, "creating exercise failed"))?;
        self.exercises.lock().await.invalidate();
        Ok(created)
    }

    /// Cached for the workout TTL; on error the last known list or nothing.
    pub async fn workouts(&self) -> Vec<Workout> {
        let mut cache = self.workouts.lock().await;
        if let Some(cached) = cache.get() {
            debug!("using cached workouts");
            return cached;
        }
        match dispatch!(&self.backend, b => b.workouts().await) {
            Ok(workouts) => {
                cache.put(workouts.clone());
                workouts
            }
            Err(e) => {
                error!(error = %e, "loading workouts failed");
                cache.last().unwrap_or_default()
            }
        }
    }

    pub async fn workout(&self, id: WorkoutId) -> Result<Option<Workout>, LiftError> {
        dispatch!(&self.backend, b => b.workout(id).await)
    }

    pub async fn exercises_from_workouts(&self) -> Result<Vec<Exercise>, LiftError> {
        dispatch!(&self.backend, b => b.exercises_from_workouts().await)
    }

    /// Save a workout. A cloud timeout or bridge error is retried once
    /// through the HTTP API; if that fails too the caller gets
    /// [`LiftError::SaveFailed`].
    pub async fn create_workout(
        &self,
        name: Option<String>,
        sets: Vec<NewSet>,
    ) -> Result<Workout, LiftError> {
        if sets.is_empty() {
            return Err(LiftError::bad_request(EMPTY_SETS_MESSAGE));
        }
        debug!(sets = sets.len(), backend = ?self.backend.kind(), "creating workout");

        let result = match &self.backend {
            Backend::Cloud(repo) => match repo.create_workout(name.clone(), sets.clone()).await {
                Err(e) if e.is_cloud_failure() => {
                    warn!(error = %e, "cloud save failed, trying API fallback");
                    self.save_via_fallback(name, sets).await
                }
                other => other,
            },
            backend => dispatch!(backend, b => b.create_workout(name, sets).await),
        };

        match result {
            Ok(workout) => {
                self.workouts.lock().await.invalidate();
                info!(id = workout.id, "workout saved");
                Ok(workout)
            }
            Err(e) => {
                error!(error = %e, "creating workout failed");
                Err(e)
            }
        }
    }

    async fn save_via_fallback(
        &self,
        name: Option<String>,
        sets: Vec<NewSet>,
    ) -> Result<Workout, LiftError> {
        let Some(api) = self.fallback.as_ref() else {
            return Err(LiftError::SaveFailed);
        };
        api.create_workout(name, sets).await.map_err(|e| {
            error!(error = %e, "API fallback also failed");
            LiftError::SaveFailed
        })
    }

    /// Never fails: errors yield empty statistics.
    pub async fn statistics(&self, exercise_id: ExerciseId) -> Statistics {
        dispatch!(&self.backend, b => b.statistics(exercise_id).await).unwrap_or_else(|e| {
            error!(exercise_id, error = %e, "loading statistics failed");
            Statistics::empty()
        })
    }

    pub async fn export_csv(&self) -> Result<String, LiftError> {
        dispatch!(&self.backend, b => b.export_csv().await)
    }
}
