use crate::db::WorkoutsStorage;
use crate::error::LiftError;
use crate::service::catalog::default_exercises;
use crate::service::ledger::Ledger;
use crate::types::{Exercise, ExerciseId, NewSet, Statistics, Workout, WorkoutId};

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, info, warn};

/// Public messages handled by the store actor.
#[derive(Debug)]
pub enum StoreMessage {
    ListExercises(RpcReplyPort<Vec<Exercise>>),
    /// name, muscle group
    CreateExercise(String, String, RpcReplyPort<Result<Exercise, LiftError>>),
    ExercisesFromWorkouts(RpcReplyPort<Vec<Exercise>>),
    ListWorkouts(RpcReplyPort<Vec<Workout>>),
    GetWorkout(WorkoutId, RpcReplyPort<Option<Workout>>),
    CreateWorkout(
        Option<String>,
        Vec<NewSet>,
        RpcReplyPort<Result<Workout, LiftError>>,
    ),
    Statistics(ExerciseId, RpcReplyPort<Statistics>),
}

/// Handle for interacting with the store actor.
#[derive(Clone)]
pub struct StoreHandle {
    actor: ActorRef<StoreMessage>,
}

fn rpc_failed(op: &str, e: impl std::fmt::Display) -> LiftError {
    LiftError::RactorError(format!("{op} RPC failed: {e}"))
}

impl StoreHandle {
    pub async fn exercises(&self) -> Result<Vec<Exercise>, LiftError> {
        ractor::call!(self.actor, StoreMessage::ListExercises)
            .map_err(|e| rpc_failed("ListExercises", e))
    }

    pub async fn create_exercise(
        &self,
        name: impl Into<String>,
        muscle_group: impl Into<String>,
    ) -> Result<Exercise, LiftError> {
        ractor::call!(
            self.actor,
            StoreMessage::CreateExercise,
            name.into(),
            muscle_group.into()
        )
        .map_err(|e| rpc_failed("CreateExercise", e))?
    }

    pub async fn exercises_from_workouts(&self) -> Result<Vec<Exercise>, LiftError> {
        ractor::call!(self.actor, StoreMessage::ExercisesFromWorkouts)
            .map_err(|e| rpc_failed("ExercisesFromWorkouts", e))
    }

    pub async fn workouts(&self) -> Result<Vec<Workout>, LiftError> {
        ractor::call!(self.actor, StoreMessage::ListWorkouts)
            .map_err(|e| rpc_failed("ListWorkouts", e))
    }

    pub async fn workout(&self, id: WorkoutId) -> Result<Option<Workout>, LiftError> {
        ractor::call!(self.actor, StoreMessage::GetWorkout, id)
            .map_err(|e| rpc_failed("GetWorkout", e))
    }

    pub async fn create_workout(
        &self,
        name: Option<String>,
        sets: Vec<NewSet>,
    ) -> Result<Workout, LiftError> {
        ractor::call!(self.actor, StoreMessage::CreateWorkout, name, sets)
            .map_err(|e| rpc_failed("CreateWorkout", e))?
    }

    pub async fn statistics(&self, exercise_id: ExerciseId) -> Result<Statistics, LiftError> {
        ractor::call!(self.actor, StoreMessage::Statistics, exercise_id)
            .map_err(|e| rpc_failed("Statistics", e))
    }

    /// Spawn the store actor. With `storage` the ledger is loaded from the
    /// database (seeding the catalogue on first run) and every write goes
    /// through to it; without, the store lives in memory only.
    pub async fn spawn(storage: Option<WorkoutsStorage>) -> Result<Self, LiftError> {
        let (actor, _jh) = Actor::spawn(None, StoreActor, storage)
            .await
            .map_err(|e| LiftError::RactorError(format!("spawn StoreActor failed: {e}")))?;
        Ok(Self { actor })
    }
}

/// Internal state held by the store actor
struct StoreActorState {
    ledger: Ledger,
    storage: Option<WorkoutsStorage>,
}

/// ractor-based store actor; the single writer of the ledger.
struct StoreActor;

#[ractor::async_trait]
impl Actor for StoreActor {
    type Msg = StoreMessage;
    type State = StoreActorState;
    type Arguments = Option<WorkoutsStorage>;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        storage: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let Some(storage) = storage else {
            let ledger = Ledger::new();
            info!(
                exercises = ledger.exercises().len(),
                "StoreActor started in memory"
            );
            return Ok(StoreActorState {
                ledger,
                storage: None,
            });
        };

        storage
            .seed_exercises(&default_exercises())
            .await
            .map_err(|e| ActorProcessingErr::from(format!("DB seed failed: {e}")))?;
        let exercises = storage
            .list_exercises()
            .await
            .map_err(|e| ActorProcessingErr::from(format!("DB load exercises failed: {e}")))?;
        let workouts = storage
            .list_workouts()
            .await
            .map_err(|e| ActorProcessingErr::from(format!("DB load workouts failed: {e}")))?;

        info!(
            exercises = exercises.len(),
            workouts = workouts.len(),
            "StoreActor started from DB"
        );

        Ok(StoreActorState {
            ledger: Ledger::from_parts(exercises, workouts),
            storage: Some(storage),
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StoreMessage::ListExercises(rp) => {
                let _ = rp.send(state.ledger.exercises().to_vec());
            }
            StoreMessage::CreateExercise(name, muscle_group, rp) => {
                let result = self.handle_create_exercise(state, &name, &muscle_group).await;
                let _ = rp.send(result);
            }
            StoreMessage::ExercisesFromWorkouts(rp) => {
                let _ = rp.send(state.ledger.exercises_from_workouts());
            }
            StoreMessage::ListWorkouts(rp) => {
                let _ = rp.send(state.ledger.workouts());
            }
            StoreMessage::GetWorkout(id, rp) => {
                let _ = rp.send(state.ledger.workout(id));
            }
            StoreMessage::CreateWorkout(name, sets, rp) => {
                let result = self.handle_create_workout(state, name, sets).await;
                let _ = rp.send(result);
            }
            StoreMessage::Statistics(exercise_id, rp) => {
                let _ = rp.send(state.ledger.statistics(exercise_id));
            }
        }
        Ok(())
    }
}

impl StoreActor {
    async fn handle_create_exercise(
        &self,
        state: &mut StoreActorState,
        name: &str,
        muscle_group: &str,
    ) -> Result<Exercise, LiftError> {
        let exercise = state.ledger.prepare_exercise(name, muscle_group)?;
        if let Some(storage) = state.storage.as_ref() {
            storage.insert_exercise(&exercise).await.inspect_err(|e| {
                warn!(id = exercise.id, error = %e, "DB insert exercise failed");
            })?;
        }
        state.ledger.commit_exercise(exercise.clone());
        info!(id = exercise.id, name = %exercise.name, "exercise created");
        Ok(exercise)
    }

    async fn handle_create_workout(
        &self,
        state: &mut StoreActorState,
        name: Option<String>,
        sets: Vec<NewSet>,
    ) -> Result<Workout, LiftError> {
        let workout = state.ledger.prepare_workout(name, sets, Utc::now())?;
        if let Some(storage) = state.storage.as_ref() {
            storage.insert_workout(&workout).await.inspect_err(|e| {
                warn!(id = workout.id, error = %e, "DB insert workout failed");
            })?;
        }
        state.ledger.commit_workout(workout.clone());
        debug!(
            id = workout.id,
            sets = workout.workout_sets.len(),
            "workout recorded"
        );
        Ok(workout)
    }
}
