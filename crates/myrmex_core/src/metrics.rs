//! Runtime counters and logging setup.
//!
//! Provides structured logging and a lightweight collector the world updates
//! every tick, so a headless run can report progress without a renderer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Agents spawned at the colony.
pub const SPAWNED: &str = "spawned";
/// Agents taken in after returning.
pub const RETURNED: &str = "returned";
/// Depleted food sources replaced.
pub const FOOD_REPLACED: &str = "food_replaced";
/// Forager contacts with food.
pub const BITES: &str = "bites";

/// How often (in ticks) a summary line is logged.
pub const SUMMARY_INTERVAL: u64 = 1000;

pub struct Metrics {
    tick_count: AtomicU64,
    agent_count: AtomicU64,
    marker_count: AtomicU64,
    food_count: AtomicU64,
    last_tick_micros: AtomicU64,
    counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("tick_count", &self.tick_count())
            .field("agent_count", &self.agent_count())
            .field("marker_count", &self.marker_count())
            .finish_non_exhaustive()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            agent_count: AtomicU64::new(0),
            marker_count: AtomicU64::new(0),
            food_count: AtomicU64::new(0),
            last_tick_micros: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration and population figures.
    pub fn record_tick(&self, duration: Duration, agents: usize, markers: usize, food: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.agent_count.store(agents as u64, Ordering::Relaxed);
        self.marker_count.store(markers as u64, Ordering::Relaxed);
        self.food_count.store(food as u64, Ordering::Relaxed);
        self.last_tick_micros
            .store(duration.as_micros() as u64, Ordering::Relaxed);

        if tick % SUMMARY_INTERVAL == 0 {
            tracing::info!(
                tick,
                agents,
                markers,
                food,
                returned = self.counter(RETURNED),
                bites = self.counter(BITES),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(amount, Ordering::Relaxed);
    }

    /// Current value of a named counter, zero if never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn agent_count(&self) -> u64 {
        self.agent_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn marker_count(&self) -> u64 {
        self.marker_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_count(&self) -> u64 {
        self.food_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_tick_duration(&self) -> Duration {
        Duration::from_micros(self.last_tick_micros.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}
