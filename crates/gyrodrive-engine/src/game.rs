//! The game: one owner for state, session and telemetry pipeline.
//!
//! [`Game::tick`] is called once per frame with the outcome of a single
//! non-blocking socket poll. It frames and parses whatever arrived, routes
//! samples to calibration or smoothing depending on the state, advances the
//! simulation and reports what happened.

use std::time::Instant;

use gyrodrive_calibration::CalibrationStatus;
use gyrodrive_errors::{TelemetryError, ValidationError};
use gyrodrive_filters::ControlSignal;
use gyrodrive_telemetry_streams::{LineFramer, LinkInput, RecordParser, StreamEvent};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::geometry::{Layout, Rect, Size};
use crate::motion::MotionController;
use crate::obstacles::ObstaclePlacement;
use crate::score::{ScoreRecord, ScoreStore};
use crate::session::Session;
use crate::state::{GameState, Transition, Trigger, TriggerError, TriggerOutcome};

/// Summary of one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// State after the tick.
    pub state: GameState,
    /// Samples fed to calibration or smoothing.
    pub accepted: usize,
    /// Records rejected as malformed, plus residual overflows.
    pub rejected: usize,
    /// Blank and header lines.
    pub ignored: usize,
    /// Records received while no run was active.
    pub discarded: usize,
    /// Obstacles spawned.
    pub spawned: usize,
    /// True if the link reported a disconnect.
    pub disconnected: bool,
    /// State change caused by this tick, if any.
    pub transition: Option<Transition>,
    /// Set when the run ended this tick.
    pub score: Option<ScoreRecord>,
}

/// Everything an external renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub state: GameState,
    pub road: Rect,
    pub car: Rect,
    pub zoom: f64,
    /// Camera view size; the view stays centred on the screen.
    pub view: Size,
    pub speed: f64,
    pub obstacles: Vec<Rect>,
    pub score: f64,
    pub best_score: f64,
    pub signal: ControlSignal,
}

pub struct Game {
    config: GameConfig,
    layout: Layout,
    motion: MotionController,
    state: GameState,
    session: Session,
    framer: LineFramer,
    parser: RecordParser,
    best: f64,
    last_run: Option<ScoreRecord>,
    store: Box<dyn ScoreStore>,
    placement: Box<dyn ObstaclePlacement>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("best", &self.best)
            .field("score", &self.session.score)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Build a game in the main menu.
    ///
    /// The best score is read from `store` once, here. A store that fails
    /// to load counts as no best score.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `config` is inconsistent.
    pub fn new(
        config: GameConfig,
        store: Box<dyn ScoreStore>,
        placement: Box<dyn ObstaclePlacement>,
    ) -> Result<Self, ValidationError> {
        config.validate()?;

        let best = match store.load_best() {
            Ok(best) => best,
            Err(e) => {
                warn!(error = %e, "Could not load best score, starting from zero");
                0.0
            }
        };

        let layout = Layout::from_config(&config);
        let framer = LineFramer::new(config.telemetry.max_residual_bytes);
        let parser = RecordParser::new(
            config.telemetry.channels,
            config.telemetry.variant,
            config.telemetry.header_marker.clone(),
        );

        Ok(Self {
            motion: MotionController::new(config.motion, &layout),
            session: Session::new(&config, &layout, Instant::now()),
            state: GameState::MainMenu,
            framer,
            parser,
            best,
            last_run: None,
            store,
            placement,
            layout,
            config,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn best_score(&self) -> f64 {
        self.best
    }

    /// Result of the most recent finished run.
    pub fn last_run(&self) -> Option<ScoreRecord> {
        self.last_run
    }

    /// Apply a user trigger at `now`.
    ///
    /// Start and retry reset the session and begin calibration. Quit is
    /// reported back without touching the game state.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::NotAllowed`] if the trigger is not valid in
    /// the current state; nothing changes in that case.
    pub fn handle_trigger(
        &mut self,
        trigger: Trigger,
        now: Instant,
    ) -> Result<TriggerOutcome, TriggerError> {
        let outcome = self.state.on_trigger(trigger).inspect_err(|e| {
            debug!(error = %e, "Ignoring trigger");
        })?;

        match outcome {
            TriggerOutcome::Transition(transition) => {
                self.session.reset(&self.config, &self.layout, now);
                self.enter(transition);
            }
            TriggerOutcome::Quit => {
                info!(state = %self.state, "Quit requested");
            }
        }
        Ok(outcome)
    }

    /// Run one frame.
    pub fn tick(&mut self, now: Instant, input: LinkInput<'_>) -> TickReport {
        let mut report = TickReport::default();

        for event in self.framer.feed(input) {
            match event {
                StreamEvent::Record(record) => self.handle_record(&record, now, &mut report),
                StreamEvent::Dropped(_) => report.rejected += 1,
                StreamEvent::Disconnected => {
                    report.disconnected = true;
                    if let Some(transition) = self.state.on_disconnect() {
                        warn!(state = %self.state, "Sensor stream disconnected");
                        self.enter(transition);
                        report.transition = Some(transition);
                        report.state = self.state;
                        return report;
                    }
                    debug!(state = %self.state, "Sensor stream disconnected");
                }
            }
        }

        match self.state {
            GameState::Calibrating => {
                if let CalibrationStatus::Complete(_) = self.session.calibration.poll(now) {
                    self.finish_calibration(now, &mut report);
                }
            }
            GameState::Playing => self.advance(now, &mut report),
            GameState::MainMenu | GameState::GameOver => {}
        }

        report.state = self.state;
        report
    }

    /// Current frame for a renderer.
    pub fn snapshot(&self) -> FrameSnapshot {
        let car = &self.session.car;
        FrameSnapshot {
            state: self.state,
            road: self.layout.road,
            car: car.rect,
            zoom: car.zoom,
            view: Size {
                width: self.layout.screen.width * car.zoom,
                height: self.layout.screen.height * car.zoom,
            },
            speed: car.speed,
            obstacles: self.session.obstacles.iter().copied().collect(),
            score: self.session.score,
            best_score: self.best,
            signal: self.session.signal,
        }
    }

    fn handle_record(&mut self, record: &str, now: Instant, report: &mut TickReport) {
        if !self.state.consumes_telemetry() {
            report.discarded += 1;
            return;
        }

        let sample = match self.parser.parse(record) {
            Ok(Some(sample)) => sample,
            Ok(None) => {
                report.ignored += 1;
                return;
            }
            Err(e) => {
                log_rejected(&e);
                report.rejected += 1;
                return;
            }
        };

        match self.state {
            GameState::Calibrating => {
                report.accepted += 1;
                if let CalibrationStatus::Complete(_) = self.session.calibration.push(sample, now) {
                    self.finish_calibration(now, report);
                }
            }
            GameState::Playing => {
                let offsets = self.session.offsets.unwrap_or_default();
                let calibrated = offsets.apply(sample);
                if !calibrated.is_finite() {
                    warn!(
                        steering = sample.steering,
                        zoom = sample.zoom,
                        speed = sample.speed,
                        "Calibrated sample is not finite, skipping"
                    );
                    report.rejected += 1;
                    return;
                }
                report.accepted += 1;
                self.session.signal = self.session.smoother.apply(calibrated);
            }
            GameState::MainMenu | GameState::GameOver => {}
        }
    }

    fn finish_calibration(&mut self, now: Instant, report: &mut TickReport) {
        let Some(transition) = self.state.on_calibration_complete() else {
            return;
        };
        match self.session.calibration.finish() {
            Ok(offsets) => self.session.offsets = Some(offsets),
            Err(e) => {
                warn!(error = %e, "Calibration closed without offsets");
                return;
            }
        }
        self.session.last_update = now;
        self.enter(transition);
        report.transition = Some(transition);
    }

    fn advance(&mut self, now: Instant, report: &mut TickReport) {
        let dt = self.session.take_dt(now);
        let session = &mut self.session;

        session.score += dt;
        self.motion.step(&mut session.car, session.signal, dt);
        report.spawned += session
            .obstacles
            .advance(dt, session.car.speed, self.placement.as_mut());

        if !session.obstacles.collides_with(&session.car.rect) {
            return;
        }
        let Some(transition) = self.state.on_collision() else {
            return;
        };

        session.car.speed = 0.0;
        let record = ScoreRecord::commit(session.score, self.best);
        if record.new_best {
            info!(score = record.run, previous = self.best, "New best score");
            self.best = record.best;
            if let Err(e) = self.store.save_best(record.best) {
                warn!(error = %e, "Failed to save best score");
            }
        }
        self.last_run = Some(record);
        report.score = Some(record);

        self.enter(transition);
        report.transition = Some(transition);
    }

    fn enter(&mut self, transition: Transition) {
        info!(
            from = %transition.from,
            to = %transition.to,
            cause = %transition.cause,
            "State transition"
        );
        self.state = transition.to;
    }
}

fn log_rejected(error: &TelemetryError) {
    match error {
        TelemetryError::IncompleteRecord { fields, required } => {
            warn!(fields, required, "Incomplete data line, skipping");
        }
        TelemetryError::InvalidNumber { index, value } => {
            warn!(index, value = %value, "Invalid gyroscope value, skipping");
        }
        other => warn!(error = %other, "Telemetry record dropped"),
    }
}
