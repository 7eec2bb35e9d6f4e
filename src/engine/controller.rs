// View Simulator - Simulation Controller
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! The start/pause/reset state machine and the single source of truth for
//! progress, history and aggregates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use super::events::SimulationEvent;
use super::scheduler::{ScheduleHandle, Scheduler, Task};
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::factory::EventFactory;
use crate::models::ViewEvent;
use crate::stats::{AggregateStats, HistoryBuffer};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    /// Ticking.
    Armed,
    /// Target reached; only reset leaves this state.
    Completed,
}

/// Progress of the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationState {
    pub progress: u32,
    pub target: u32,
    pub running: bool,
    pub phase: Phase,
}

/// Consistent point-in-time read of the controller.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub state: SimulationState,
    /// Newest first.
    pub history: Vec<ViewEvent>,
    pub stats: AggregateStats,
}

impl Snapshot {
    /// The `n` most recent views.
    pub fn recent(&self, n: usize) -> &[ViewEvent] {
        &self.history[..n.min(self.history.len())]
    }

    /// Completion in percent, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.state.target == 0 {
            return 0.0;
        }
        (f64::from(self.state.progress) * 100.0 / f64::from(self.state.target)).min(100.0)
    }
}

struct Engine {
    config: SimulationConfig,
    progress: u32,
    phase: Phase,
    /// Bumped whenever a schedule starts or stops; stale ticks carry an old value.
    generation: u64,
    history: HistoryBuffer,
    stats: AggregateStats,
    factory: EventFactory,
    schedule: Option<ScheduleHandle>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Engine {
    fn state(&self) -> SimulationState {
        SimulationState {
            progress: self.progress,
            target: self.config.target_views,
            running: self.phase == Phase::Armed,
            phase: self.phase,
        }
    }

    fn stop_schedule(&mut self) {
        self.generation += 1;
        if let Some(schedule) = self.schedule.take() {
            schedule.cancel();
        }
    }

    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}

struct Shared {
    engine: Mutex<Engine>,
    events: broadcast::Sender<SimulationEvent>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SimulationEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Apply one tick scheduled under `generation`, as one unit.
    fn tick(&self, generation: u64) {
        let mut engine = self.lock();
        if engine.phase != Phase::Armed || engine.generation != generation {
            trace!("Discarding stale tick (generation {})", generation);
            return;
        }

        let timestamp = engine.next_timestamp();
        let view = engine.factory.produce_at(timestamp);
        engine.history.push(view.clone());
        engine.progress += 1;
        engine.stats = AggregateStats::compute(&engine.history);

        let progress = engine.progress;
        debug!(
            "View {} from {} ({}), progress {}/{}",
            view.id, view.country, view.device, progress, engine.config.target_views
        );
        self.emit(SimulationEvent::ViewGenerated { view, progress });

        if progress >= engine.config.target_views {
            engine.stop_schedule();
            engine.phase = Phase::Completed;
            info!("Simulation complete: {} views", progress);
            self.emit(SimulationEvent::Completed { total: progress });
        }
    }
}

/// Drives a simulation run. Cloning yields another handle to the same run.
#[derive(Clone)]
pub struct SimulationController {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
}

impl SimulationController {
    /// Create a controller with an entropy-seeded factory.
    ///
    /// The initial configuration is used as given; [`configure`](Self::configure)
    /// is where changes are validated.
    pub fn new(config: SimulationConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        Self::with_factory(config, scheduler, EventFactory::new())
    }

    /// Create a controller producing views from `factory`.
    pub fn with_factory(
        config: SimulationConfig,
        scheduler: Arc<dyn Scheduler>,
        factory: EventFactory,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let engine = Engine {
            config,
            progress: 0,
            phase: Phase::Idle,
            generation: 0,
            history: HistoryBuffer::new(),
            stats: AggregateStats::default(),
            factory,
            schedule: None,
            last_timestamp: None,
        };
        Self {
            shared: Arc::new(Shared {
                engine: Mutex::new(engine),
                events,
            }),
            scheduler,
        }
    }

    /// Subscribe to simulation events.
    pub fn subscribe(&self) -> broadcast::Receiver<SimulationEvent> {
        self.shared.events.subscribe()
    }

    /// Get the active configuration.
    pub fn config(&self) -> SimulationConfig {
        self.shared.lock().config
    }

    /// Replace the configuration. Rejected while running or when invalid.
    pub fn configure(&self, config: SimulationConfig) -> Result<()> {
        let mut engine = self.shared.lock();
        if engine.phase == Phase::Armed {
            warn!("Rejected reconfiguration while running");
            return Err(SimulationError::Busy);
        }
        if let Err(e) = config.validate() {
            warn!("Rejected configuration: {}", e);
            return Err(e);
        }
        if config.target_views < engine.progress {
            let e = SimulationError::TargetBelowProgress {
                target: config.target_views,
                progress: engine.progress,
            };
            warn!("Rejected configuration: {}", e);
            return Err(e);
        }

        info!(
            "Configured: target {} views at {} per minute",
            config.target_views, config.views_per_minute
        );
        engine.config = config;
        Ok(())
    }

    /// Arm the clock. No-op while running or after completion.
    pub fn start(&self) -> SimulationState {
        let mut engine = self.shared.lock();
        match engine.phase {
            Phase::Armed | Phase::Completed => return engine.state(),
            Phase::Idle => {}
        }

        if engine.progress >= engine.config.target_views {
            engine.phase = Phase::Completed;
            info!("Nothing to simulate: target {} reached", engine.config.target_views);
            self.shared.emit(SimulationEvent::Completed {
                total: engine.progress,
            });
            return engine.state();
        }

        engine.generation += 1;
        let generation = engine.generation;
        let interval = engine.config.tick_interval();
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let task: Task = Arc::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.tick(generation);
            }
        });
        engine.schedule = Some(self.scheduler.schedule_repeating(interval, task));
        engine.phase = Phase::Armed;

        let views_per_minute = engine.config.views_per_minute;
        info!(
            "Simulation started: {} views per minute ({:?} interval)",
            views_per_minute, interval
        );
        self.shared.emit(SimulationEvent::Started {
            views_per_minute,
            interval,
        });
        engine.state()
    }

    /// Stop ticking, keeping progress and history. No-op unless running.
    pub fn pause(&self) -> SimulationState {
        let mut engine = self.shared.lock();
        if engine.phase == Phase::Armed {
            engine.stop_schedule();
            engine.phase = Phase::Idle;
            info!("Simulation paused at {}", engine.progress);
            self.shared.emit(SimulationEvent::Paused {
                progress: engine.progress,
            });
        }
        engine.state()
    }

    /// Cancel any schedule and clear progress and history. Config is kept.
    pub fn reset(&self) -> SimulationState {
        let mut engine = self.shared.lock();
        engine.stop_schedule();
        engine.phase = Phase::Idle;
        engine.progress = 0;
        engine.history.clear();
        engine.stats = AggregateStats::default();
        engine.last_timestamp = None;
        info!("Simulation reset");
        self.shared.emit(SimulationEvent::Reset);
        engine.state()
    }

    /// Progress only.
    pub fn state(&self) -> SimulationState {
        self.shared.lock().state()
    }

    /// Progress, history and aggregates read under one lock.
    pub fn current_state(&self) -> Snapshot {
        let engine = self.shared.lock();
        Snapshot {
            state: engine.state(),
            history: engine.history.iter().cloned().collect(),
            stats: engine.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualScheduler;
    use crate::stats::HISTORY_CAPACITY;
    use std::time::Duration;

    fn controller(target: u32, rate: u32) -> (SimulationController, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let controller = SimulationController::with_factory(
            SimulationConfig::new(target, rate),
            Arc::new(scheduler.clone()),
            EventFactory::seeded(1234),
        );
        (controller, scheduler)
    }

    fn drain(rx: &mut broadcast::Receiver<SimulationEvent>) -> Vec<SimulationEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn test_five_ticks_complete() {
        let (controller, scheduler) = controller(5, 60);
        let state = controller.start();
        assert!(state.running);
        assert_eq!(state.phase, Phase::Armed);

        assert_eq!(scheduler.advance(Duration::from_millis(4999)), 4);
        assert_eq!(controller.state().progress, 4);
        scheduler.advance(Duration::from_millis(1));

        let snapshot = controller.current_state();
        assert_eq!(snapshot.state.progress, 5);
        assert!(!snapshot.state.running);
        assert_eq!(snapshot.state.phase, Phase::Completed);
        assert_eq!(snapshot.history.len(), 5);
        assert_eq!(scheduler.pending(), 0);

        // Completed is terminal until reset.
        assert_eq!(scheduler.advance(Duration::from_secs(10)), 0);
        assert!(!controller.start().running);
        assert_eq!(controller.state().progress, 5);
    }

    #[test]
    fn test_zero_target_completes_without_scheduling() {
        let (controller, scheduler) = controller(0, 60);
        let mut rx = controller.subscribe();
        let state = controller.start();
        assert_eq!(state.progress, 0);
        assert!(!state.running);
        assert_eq!(state.phase, Phase::Completed);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(drain(&mut rx), vec![SimulationEvent::Completed { total: 0 }]);
    }

    #[test]
    fn test_history_tracks_progress() {
        let (controller, scheduler) = controller(80, 60);
        controller.start();
        for _ in 0..80 {
            scheduler.advance(Duration::from_secs(1));
            let snapshot = controller.current_state();
            let progress = snapshot.state.progress as usize;
            assert_eq!(snapshot.history.len(), progress.min(HISTORY_CAPACITY));
            let devices: usize = snapshot.stats.devices.iter().map(|(_, c)| c).sum();
            assert_eq!(devices, snapshot.history.len());
            assert_eq!(snapshot.stats.total, snapshot.history.len());
        }
        assert_eq!(controller.state().phase, Phase::Completed);
    }

    #[test]
    fn test_start_and_pause_are_idempotent() {
        let (controller, scheduler) = controller(10, 60);
        let first = controller.start();
        let second = controller.start();
        assert_eq!(first, second);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_secs(3));
        let paused = controller.pause();
        assert_eq!(controller.pause(), paused);
        assert_eq!(paused.progress, 3);
        assert!(!paused.running);
        assert_eq!(scheduler.pending(), 0);

        assert_eq!(scheduler.advance(Duration::from_secs(5)), 0);
        assert_eq!(controller.state().progress, 3);
    }

    #[test]
    fn test_resume_keeps_history() {
        let (controller, scheduler) = controller(10, 30);
        controller.start();
        scheduler.advance(Duration::from_secs(4));
        controller.pause();
        let before = controller.current_state();
        assert_eq!(before.state.progress, 2);

        controller.start();
        scheduler.advance(Duration::from_secs(2));
        let after = controller.current_state();
        assert_eq!(after.state.progress, 3);
        assert_eq!(&after.history[1..], &before.history[..]);
    }

    #[test]
    fn test_reset_from_any_state() {
        for ticks in [0u64, 3, 10] {
            let (controller, scheduler) = controller(10, 60);
            controller.start();
            scheduler.advance(Duration::from_secs(ticks));
            let state = controller.reset();
            assert_eq!(state.progress, 0);
            assert!(!state.running);
            assert_eq!(state.phase, Phase::Idle);
            let snapshot = controller.current_state();
            assert!(snapshot.history.is_empty());
            assert_eq!(snapshot.stats, AggregateStats::default());
            assert_eq!(scheduler.pending(), 0);
            assert_eq!(controller.config(), SimulationConfig::new(10, 60));
        }
    }

    #[test]
    fn test_configure_rejected_while_running() {
        let (controller, _scheduler) = controller(10, 60);
        controller.start();
        assert_eq!(
            controller.configure(SimulationConfig::new(20, 30)),
            Err(SimulationError::Busy)
        );
        assert_eq!(controller.config(), SimulationConfig::new(10, 60));

        controller.pause();
        assert!(controller.configure(SimulationConfig::new(20, 30)).is_ok());
        assert_eq!(controller.config(), SimulationConfig::new(20, 30));
    }

    #[test]
    fn test_configure_validation() {
        let (controller, scheduler) = controller(10, 60);
        assert_eq!(
            controller.configure(SimulationConfig::new(0, 60)),
            Err(SimulationError::InvalidTarget(0))
        );
        assert_eq!(
            controller.configure(SimulationConfig::new(10, 0)),
            Err(SimulationError::InvalidRate(0))
        );

        controller.start();
        scheduler.advance(Duration::from_secs(4));
        controller.pause();
        assert_eq!(
            controller.configure(SimulationConfig::new(3, 60)),
            Err(SimulationError::TargetBelowProgress {
                target: 3,
                progress: 4
            })
        );
        assert_eq!(controller.config(), SimulationConfig::new(10, 60));
    }

    #[test]
    fn test_new_rate_applies_on_next_start() {
        let (controller, scheduler) = controller(10, 60);
        controller.start();
        scheduler.advance(Duration::from_secs(2));
        controller.pause();
        controller.configure(SimulationConfig::new(10, 6)).unwrap();

        controller.start();
        assert_eq!(scheduler.advance(Duration::from_secs(9)), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(1)), 1);
        assert_eq!(controller.state().progress, 3);
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let (controller, _scheduler) = controller(10, 60);
        controller.start();
        let stale = controller.shared.lock().generation;
        controller.pause();
        controller.start();

        controller.shared.tick(stale);
        assert_eq!(controller.state().progress, 0);

        let current = controller.shared.lock().generation;
        controller.shared.tick(current);
        assert_eq!(controller.state().progress, 1);
    }

    #[test]
    fn test_notifications() {
        let (controller, scheduler) = controller(2, 60);
        let mut rx = controller.subscribe();
        controller.start();
        scheduler.advance(Duration::from_secs(2));
        controller.reset();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], SimulationEvent::Started { views_per_minute: 60, .. }));
        assert!(matches!(events[1], SimulationEvent::ViewGenerated { progress: 1, .. }));
        assert!(matches!(events[2], SimulationEvent::ViewGenerated { progress: 2, .. }));
        assert_eq!(events[3], SimulationEvent::Completed { total: 2 });
        assert_eq!(events[4], SimulationEvent::Reset);
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let (controller, scheduler) = controller(30, 60);
        controller.start();
        scheduler.advance(Duration::from_secs(30));
        let history = controller.current_state().history;
        assert!(history.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_snapshot_helpers() {
        let (controller, scheduler) = controller(20, 60);
        controller.start();
        scheduler.advance(Duration::from_secs(5));
        let snapshot = controller.current_state();
        assert_eq!(snapshot.progress_percent(), 25.0);
        assert_eq!(snapshot.recent(3).len(), 3);
        assert_eq!(snapshot.recent(100).len(), 5);
        assert_eq!(snapshot.recent(1)[0], snapshot.history[0]);
    }
}
