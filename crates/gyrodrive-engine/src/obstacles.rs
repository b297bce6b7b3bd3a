//! Obstacle spawning, movement and culling

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::config::ObstacleConfig;
use crate::geometry::{Layout, Rect, Size};

/// Chooses where across the road the next obstacle appears.
pub trait ObstaclePlacement: Send {
    /// A value in `[0.0, 1.0]`; 0 is the left road edge, 1 puts the
    /// obstacle flush with the right edge.
    fn next_fraction(&mut self) -> f64;
}

/// Uniformly random placement.
#[derive(Debug)]
pub struct RandomPlacement {
    rng: StdRng,
}

impl RandomPlacement {
    /// Seeded placement produces the same sequence on every run.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl ObstaclePlacement for RandomPlacement {
    fn next_fraction(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Cycles through a fixed list of fractions.
#[derive(Debug, Clone)]
pub struct FixedPlacement {
    fractions: Vec<f64>,
    next: usize,
}

impl FixedPlacement {
    pub fn new(fractions: Vec<f64>) -> Self {
        Self { fractions, next: 0 }
    }

    /// Every obstacle in the middle of the road.
    pub fn centred() -> Self {
        Self::new(vec![0.5])
    }
}

impl ObstaclePlacement for FixedPlacement {
    fn next_fraction(&mut self) -> f64 {
        let value = self.fractions.get(self.next).copied().unwrap_or(0.5);
        if !self.fractions.is_empty() {
            self.next = (self.next + 1) % self.fractions.len();
        }
        value
    }
}

/// Live obstacles in spawn order.
#[derive(Debug, Clone)]
pub struct ObstacleSet {
    items: Vec<Rect>,
    since_spawn: f64,
    spawn_interval: f64,
    size: Size,
    road: Rect,
    cull_below: f64,
}

impl ObstacleSet {
    pub fn new(config: &ObstacleConfig, layout: &Layout) -> Self {
        Self {
            items: Vec::new(),
            since_spawn: 0.0,
            spawn_interval: config.spawn_interval_secs,
            size: layout.obstacle_size,
            road: layout.road,
            cull_below: layout.screen.height,
        }
    }

    /// Spawn if due, move everything down by `speed * dt`, then drop
    /// obstacles that have left the screen. Returns the number spawned.
    pub fn advance(
        &mut self,
        dt: f64,
        speed: f64,
        placement: &mut dyn ObstaclePlacement,
    ) -> usize {
        let mut spawned = 0;
        self.since_spawn += dt;
        if self.since_spawn > self.spawn_interval {
            let fraction = placement.next_fraction().clamp(0.0, 1.0);
            let x = self.road.x + fraction * (self.road.width - self.size.width);
            self.items
                .push(Rect::new(x, -self.size.height, self.size.width, self.size.height));
            self.since_spawn = 0.0;
            spawned = 1;
            trace!(x, "Obstacle spawned");
        }

        let dy = speed * dt;
        for item in &mut self.items {
            item.y += dy;
        }

        let cull_below = self.cull_below;
        self.items.retain(|o| o.y <= cull_below);
        spawned
    }

    /// True if any obstacle overlaps `car`.
    pub fn collides_with(&self, car: &Rect) -> bool {
        self.items.iter().any(|o| o.intersects(car))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Seconds since the last spawn.
    pub fn since_spawn(&self) -> f64 {
        self.since_spawn
    }

    /// Remove every obstacle and restart the spawn timer.
    pub fn clear(&mut self) {
        self.items.clear();
        self.since_spawn = 0.0;
    }
}
