//! GyroDrive Engine - game loop core
//!
//! This crate owns the lifecycle state machine, the per-run session, car
//! motion, obstacles and scoring. It is driven by [`Game::tick`] once per
//! frame and never touches sockets or the screen itself.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod game;
pub mod geometry;
pub mod motion;
pub mod obstacles;
pub mod score;
pub mod session;
pub mod state;

pub use config::{
    CarConfig, GameConfig, MotionConfig, ObstacleConfig, RoadConfig, ScreenConfig,
    SmoothingConfig, TelemetryConfig,
};
pub use game::{FrameSnapshot, Game, TickReport};
pub use geometry::{Layout, Rect, Size};
pub use motion::{CarState, MotionController};
pub use obstacles::{FixedPlacement, ObstaclePlacement, ObstacleSet, RandomPlacement};
pub use score::{FileScoreStore, MemoryScoreStore, ScoreRecord, ScoreStore};
pub use session::Session;
pub use state::{
    GameState, ParseTriggerError, Transition, TransitionCause, Trigger, TriggerError,
    TriggerOutcome,
};
