//! Encounter director
//!
//! Driven by [`Director::tick`]. Each wave selects the spawn points nearest
//! the player, issues spawn requests at the wave's cadence, then waits for
//! every spawned hostile to report its death before starting the post-wave
//! delay.

use crate::config::{DirectorConfig, WaveSource, WaveSpec};
use crate::difficulty::{compute_difficulty, is_elite, stat_multipliers};
use crate::spawn::{select_nearest, SpawnPoint};
use glam::Vec3;
use onslaught_core::{CombatError, Delay, ObjectId, Presentation};
use onslaught_event::Observers;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Director lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectorPhase {
    /// Not started; the first tick starts wave 1
    Idle,
    /// Issuing spawn requests
    Spawning,
    /// All requests issued, waiting for the wave to die
    WaitingForClear,
    /// Wave cleared, post-wave delay running
    WaitingForNextWave,
    /// Scripted list exhausted
    Completed,
    /// Shut down or unable to spawn
    Stopped,
}

/// Snapshot of encounter bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterState {
    pub wave_number: u32,
    pub enemies_left_to_spawn: u32,
    pub enemies_alive: u32,
    pub is_spawning: bool,
    pub is_waiting_for_next_wave: bool,
    pub is_elite_wave: bool,
}

/// Everything a factory needs to place one hostile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub wave: u32,
    pub elite: bool,
    pub point: SpawnPoint,
    pub health_multiplier: f32,
    pub damage_multiplier: f32,
}

/// Creates hostiles on behalf of the director
pub trait HostileFactory {
    /// Spawn a hostile, returning its id, or `None` if it could not be created
    fn spawn_hostile(&mut self, request: &SpawnRequest) -> Option<ObjectId>;
}

/// Adaptive encounter director
pub struct Director {
    config: DirectorConfig,
    spawn_points: Vec<SpawnPoint>,
    active_points: Vec<SpawnPoint>,
    phase: DirectorPhase,
    wave_number: u32,
    wave: WaveSpec,
    elite: bool,
    enemies_left_to_spawn: u32,
    enemies_alive: u32,
    /// Seconds since the wave started, and when the next spawn is due
    spawn_elapsed: f32,
    next_spawn_at: f32,
    next_wave: Option<Delay>,
    observers: Observers,
    rng: StdRng,
    presentation: Arc<dyn Presentation>,
}

impl Director {
    /// Create a director over a fixed set of spawn points
    pub fn new(config: DirectorConfig, spawn_points: Vec<SpawnPoint>, presentation: Arc<dyn Presentation>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            wave: config.initial_wave,
            config,
            spawn_points,
            active_points: Vec::new(),
            phase: DirectorPhase::Idle,
            wave_number: 0,
            elite: false,
            enemies_left_to_spawn: 0,
            enemies_alive: 0,
            spawn_elapsed: 0.0,
            next_spawn_at: 0.0,
            next_wave: None,
            observers: Observers::new(),
            rng,
            presentation,
        }
    }

    /// Advance pacing by `delta_time`
    pub fn tick(&mut self, delta_time: f32, player_position: Vec3, factory: &mut dyn HostileFactory) {
        match self.phase {
            DirectorPhase::Idle => {
                self.start_wave(1, player_position);
                self.advance_spawning(0.0, factory);
            }
            DirectorPhase::Spawning => self.advance_spawning(delta_time, factory),
            DirectorPhase::WaitingForNextWave => {
                let expired = self
                    .next_wave
                    .as_mut()
                    .map(|delay| delay.tick(delta_time))
                    .unwrap_or(true);
                if expired {
                    self.next_wave = None;
                    self.start_wave(self.wave_number + 1, player_position);
                    self.advance_spawning(0.0, factory);
                }
            }
            DirectorPhase::WaitingForClear | DirectorPhase::Completed | DirectorPhase::Stopped => {}
        }
    }

    fn start_wave(&mut self, wave_number: u32, player_position: Vec3) {
        let elite = is_elite(wave_number, self.config.elite_interval);
        let wave = match &self.config.source {
            WaveSource::Adaptive => Some(compute_difficulty(wave_number, elite, &self.config)),
            WaveSource::Scripted { waves } => waves.get(wave_number.saturating_sub(1) as usize).copied(),
        };
        let Some(wave) = wave else {
            self.complete();
            return;
        };

        self.active_points = select_nearest(&self.spawn_points, player_position, self.config.spawn_subset_size);
        if self.active_points.is_empty() {
            CombatError::ConfigurationMissing("spawn points").log();
            self.phase = DirectorPhase::Stopped;
            return;
        }

        self.wave_number = wave_number;
        self.wave = wave;
        self.elite = elite;
        self.enemies_left_to_spawn = wave.enemy_count;
        self.spawn_elapsed = 0.0;
        self.next_spawn_at = 0.0;
        self.phase = DirectorPhase::Spawning;

        let distances: Vec<String> = self
            .active_points
            .iter()
            .map(|p| format!("{:.1}", p.position.distance(player_position)))
            .collect();
        log::info!(
            "Wave {} started{}: {} hostiles every {:.2}s, spawn distances [{}]",
            wave_number,
            if elite { " (elite)" } else { "" },
            wave.enemy_count,
            wave.spawn_interval,
            distances.join(", ")
        );
        self.presentation.on_wave_changed(wave_number);
    }

    fn advance_spawning(&mut self, delta_time: f32, factory: &mut dyn HostileFactory) {
        if self.phase != DirectorPhase::Spawning {
            return;
        }

        // Issue every spawn that fell due during this tick
        self.spawn_elapsed += delta_time.max(0.0);
        while self.enemies_left_to_spawn > 0 && self.spawn_elapsed >= self.next_spawn_at {
            self.spawn_one(factory);
            self.next_spawn_at += self.wave.spawn_interval.max(0.0);
        }

        if self.enemies_left_to_spawn == 0 {
            self.phase = DirectorPhase::WaitingForClear;
            log::debug!("Wave {} spawning complete", self.wave_number);
            self.check_cleared();
        }
    }

    fn spawn_one(&mut self, factory: &mut dyn HostileFactory) {
        self.enemies_left_to_spawn -= 1;

        let index = self.rng.gen_range(0..self.active_points.len());
        let (health_multiplier, damage_multiplier) =
            stat_multipliers(self.wave_number, self.elite, &self.config.scaling);
        let request = SpawnRequest {
            wave: self.wave_number,
            elite: self.elite,
            point: self.active_points[index],
            health_multiplier,
            damage_multiplier,
        };

        let Some(id) = factory.spawn_hostile(&request) else {
            log::warn!("Spawn request for wave {} was not fulfilled", self.wave_number);
            return;
        };

        self.observers.subscribe_once(id);
        self.enemies_alive += 1;
        log::info!(
            "Spawned {} at {:?} (wave {}, health x{:.2}, damage x{:.2})",
            id,
            request.point.position,
            self.wave_number,
            health_multiplier,
            damage_multiplier
        );
        self.presentation.on_enemy_count_changed(self.enemies_alive);
    }

    /// Record the death of a spawned hostile
    ///
    /// Each hostile counts once. A repeated or unknown notice is ignored and
    /// reported as `RedundantTransition`.
    pub fn handle_death(&mut self, agent: ObjectId) -> onslaught_core::Result<()> {
        if let Err(err) = self.observers.notify(agent, "death") {
            err.log();
            return Err(err);
        }

        self.enemies_alive = self.enemies_alive.saturating_sub(1);
        log::info!("{} died, {} hostiles alive", agent, self.enemies_alive);
        self.presentation.on_enemy_count_changed(self.enemies_alive);
        self.check_cleared();
        Ok(())
    }

    fn check_cleared(&mut self) {
        if self.phase != DirectorPhase::WaitingForClear || self.enemies_alive > 0 {
            return;
        }

        if self.is_last_wave() {
            log::info!("Wave {} cleared", self.wave_number);
            self.complete();
            return;
        }

        log::info!(
            "Wave {} cleared, next wave in {:.1}s",
            self.wave_number,
            self.wave.post_wave_delay
        );
        self.next_wave = Some(Delay::new(self.wave.post_wave_delay));
        self.phase = DirectorPhase::WaitingForNextWave;
    }

    fn is_last_wave(&self) -> bool {
        match &self.config.source {
            WaveSource::Adaptive => false,
            WaveSource::Scripted { waves } => self.wave_number as usize >= waves.len(),
        }
    }

    fn complete(&mut self) {
        log::info!("All waves completed");
        self.next_wave = None;
        self.phase = DirectorPhase::Completed;
    }

    /// Stop pacing and cancel pending timers
    pub fn shutdown(&mut self) {
        if let Some(delay) = self.next_wave.as_mut() {
            delay.cancel();
        }
        self.observers.clear();
        self.enemies_left_to_spawn = 0;
        self.phase = DirectorPhase::Stopped;
        log::info!("Director shut down at wave {}", self.wave_number);
    }

    /// Bookkeeping snapshot
    pub fn state(&self) -> EncounterState {
        EncounterState {
            wave_number: self.wave_number,
            enemies_left_to_spawn: self.enemies_left_to_spawn,
            enemies_alive: self.enemies_alive,
            is_spawning: self.phase == DirectorPhase::Spawning,
            is_waiting_for_next_wave: self.phase == DirectorPhase::WaitingForNextWave,
            is_elite_wave: self.elite,
        }
    }

    pub fn phase(&self) -> DirectorPhase {
        self.phase
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    /// The current wave's size and pacing
    pub fn current_wave(&self) -> WaveSpec {
        self.wave
    }

    /// Spawn points in use this wave
    pub fn active_points(&self) -> &[SpawnPoint] {
        &self.active_points
    }

    /// Seconds until the next wave, while waiting for it
    pub fn time_to_next_wave(&self) -> Option<f32> {
        self.next_wave
            .as_ref()
            .filter(|d| d.is_pending())
            .map(|d| d.remaining())
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }
}
