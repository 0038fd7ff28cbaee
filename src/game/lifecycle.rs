//! Game lifecycle
//!
//! `MergeGame` owns whatever outlives a single run (config, high score
//! ledger, event queue) plus at most one active run. Runs move
//! Idle -> Running and back when the bin overfills or the host stops them;
//! game over is handled inside a single `step`, never observable as a
//! lingering phase.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::boundary;
use crate::game::merge;
use crate::game::session::{GameEvent, Session};
use crate::highscore::HighScoreLedger;
use crate::physics::{Body, BodyId, Bounds, PhysicsWorld};
use crate::storage::KeyValueStore;

/// Where the controller is between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Idle,
    Running,
}

/// Why a run could not start
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartError {
    /// `start` was called while a run is active
    AlreadyRunning,
    /// Surface too small or degenerate to host the bin
    InvalidSurface { width: f32, height: f32 },
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::AlreadyRunning => write!(f, "a run is already in progress"),
            StartError::InvalidSurface { width, height } => {
                write!(f, "surface {}x{} cannot host a game", width, height)
            }
        }
    }
}

impl std::error::Error for StartError {}

/// One run's world and state, torn down together
struct Active<W> {
    world: W,
    session: Session,
}

/// Top-level game controller, generic over physics backend and storage
pub struct MergeGame<W: PhysicsWorld, S: KeyValueStore> {
    config: GameConfig,
    ledger: HighScoreLedger<S>,
    active: Option<Active<W>>,
    events: Vec<GameEvent>,
}

impl<W: PhysicsWorld, S: KeyValueStore> MergeGame<W, S> {
    /// Build a controller, reading gameplay config from `store`
    pub fn new(store: S) -> Self {
        let config = GameConfig::load(&store);
        Self::with_config(store, config)
    }

    pub fn with_config(store: S, config: GameConfig) -> Self {
        Self {
            config,
            ledger: HighScoreLedger::new(store),
            active: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.active.is_some() {
            GamePhase::Running
        } else {
            GamePhase::Idle
        }
    }

    /// Start a run on a fresh world
    pub fn start(&mut self, bounds: Bounds, seed: u64) -> Result<(), StartError> {
        if self.active.is_some() {
            return Err(StartError::AlreadyRunning);
        }
        let surface_ok = bounds.width.is_finite()
            && bounds.height.is_finite()
            && bounds.width > self.config.drop_margin * 2.0
            && bounds.height > self.config.boundary_y;
        if !surface_ok {
            return Err(StartError::InvalidSurface {
                width: bounds.width,
                height: bounds.height,
            });
        }
        let world = W::create(bounds);
        let session = Session::new(seed, self.config, bounds, &mut self.events);
        self.active = Some(Active { world, session });
        log::info!(
            "Run started ({}x{}, seed {})",
            bounds.width,
            bounds.height,
            seed
        );
        Ok(())
    }

    /// Advance the run by one fixed step
    ///
    /// The overfill scan comes first, against the positions the player last
    /// saw; a breach ends the run without stepping physics again.
    pub fn step(&mut self, dt: f32) {
        let over = match self.active.as_mut() {
            Some(active) => {
                if boundary::breached(&active.session, active.world.bodies()) {
                    true
                } else {
                    let contacts = active.world.step(dt);
                    merge::resolve_contacts(
                        &mut active.session,
                        &mut active.world,
                        &contacts,
                        &mut self.events,
                    );
                    active.session.tick(dt);
                    false
                }
            }
            None => false,
        };
        if over {
            self.finish();
        }
    }

    /// Drop the pending tier at `x`; `None` while Idle or cooling down
    pub fn request_drop(&mut self, x: f32) -> Option<BodyId> {
        let active = self.active.as_mut()?;
        active.session.try_drop(&mut active.world, x, &mut self.events)
    }

    /// Abandon the current run without settling the score
    pub fn stop(&mut self) {
        if self.active.take().is_some() {
            log::info!("Run stopped");
        }
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn score(&self) -> u32 {
        self.active.as_ref().map_or(0, |a| a.session.score)
    }

    /// Tier the next drop will spawn, while a run is active
    pub fn next_tier(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.session.next_tier)
    }

    pub fn is_drop_armed(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.session.drop_armed)
    }

    /// Best score on record, from past runs or this one
    pub fn best_score(&self) -> u32 {
        self.ledger.best()
    }

    /// Everything in the world, walls included; empty while Idle
    pub fn bodies(&self) -> &[Body] {
        self.active.as_ref().map(|a| a.world.bodies()).unwrap_or(&[])
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> Option<&mut W> {
        self.active.as_mut().map(|a| &mut a.world)
    }

    /// Tear down the run and settle its score against the ledger
    fn finish(&mut self) {
        let active = match self.active.take() {
            Some(active) => active,
            None => return,
        };
        let score = active.session.score;
        let outcome = self.ledger.finalize(score);
        self.events.push(GameEvent::GameOver {
            score,
            best: outcome.best,
            new_record: outcome.new_record,
        });
        log::info!("Run over: scored {} (best {})", score, outcome.best);
    }
}
