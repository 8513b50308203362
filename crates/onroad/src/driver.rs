//! Fixed-rate HUD driver

use std::time::Duration;

use hud::{CanvasSize, HudCompositor, HudLayout};
use hud_state::{StateSnapshot, TopicBus, UiParams};
use render::{FrameTimer, RenderBackend, VideoFrame};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::gesture::ShellCommand;
use crate::replay::StateSource;
use crate::settings::Settings;
use crate::window::OnroadWindow;
use crate::OnroadError;

/// Counters reported when the driver stops
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriverStats {
    pub ticks: u64,
    pub rendered: u64,
    pub render_errors: u64,
    pub slow_frames: u64,
    pub restarts: u64,
}

/// Owns one tick's pipeline: source, bus, window, compositor, backend
pub struct Driver<S, B> {
    tick_hz: u32,
    canvas: CanvasSize,
    max_ticks: Option<u64>,
    params: UiParams,
    settings: Settings,
    bus: TopicBus,
    window: OnroadWindow,
    hud: HudCompositor,
    source: S,
    backend: B,
    background: Option<VideoFrame>,
    timer: FrameTimer,
    commands: mpsc::Receiver<ShellCommand>,
    restart_at: Option<Instant>,
    side_panel_visible: bool,
    stats: DriverStats,
}

impl<S: StateSource, B: RenderBackend> Driver<S, B> {
    pub fn new(
        settings: &Settings,
        source: S,
        backend: B,
        commands: mpsc::Receiver<ShellCommand>,
    ) -> Result<Self, OnroadError> {
        settings.validate()?;
        let layout = HudLayout::preset(settings.layout);
        let window = OnroadWindow::new(settings.alert_config(), layout.border);
        let hud = HudCompositor::new(layout, settings.tick_hz)?;

        info!(
            tick_hz = settings.tick_hz,
            width = settings.canvas.width,
            height = settings.canvas.height,
            "Driver created"
        );

        Ok(Self {
            tick_hz: settings.tick_hz,
            canvas: settings.canvas,
            max_ticks: settings.max_ticks,
            params: settings.params.clone(),
            settings: settings.clone(),
            bus: TopicBus::new(),
            window,
            hud,
            source,
            backend,
            background: None,
            timer: FrameTimer::new(),
            commands,
            restart_at: None,
            side_panel_visible: false,
            stats: DriverStats::default(),
        })
    }

    /// Camera frame drawn under the HUD
    pub fn with_background(mut self, frame: Option<VideoFrame>) -> Self {
        self.background = frame;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn window(&self) -> &OnroadWindow {
        &self.window
    }

    pub fn stats(&self) -> &DriverStats {
        &self.stats
    }

    pub fn side_panel_visible(&self) -> bool {
        self.side_panel_visible
    }

    /// Run one tick; returns false once the source is exhausted
    pub fn tick(&mut self, now_ns: u64) -> Result<bool, OnroadError> {
        let Some(messages) = self.source.poll() else {
            return Ok(false);
        };
        self.bus.update(messages, now_ns);

        let snapshot = StateSnapshot::capture(&self.bus, &self.params);
        let update = self.window.update_state(&snapshot);

        // Composed every tick so the blink animation keeps time
        let now_ms = now_ns / 1_000_000;
        let hud = self.hud.compose(&snapshot, self.canvas, now_ms);

        if update.needs_render() {
            let mut directives = self.window.border_directives(self.canvas);
            directives.extend(hud);
            directives.extend(self.window.alert_directives(self.canvas));

            match self
                .backend
                .render(self.canvas, self.background.as_ref(), &directives)
            {
                Ok(()) => self.stats.rendered += 1,
                Err(e) => {
                    self.stats.render_errors += 1;
                    warn!("Frame {} failed to render: {}", snapshot.frame, e);
                }
            }
        }

        // Paced per tick, so idle ticks without a render are not gaps
        self.timer.frame_done(now_ms);
        self.stats.slow_frames = self.timer.slow_frames();
        self.stats.ticks += 1;
        Ok(true)
    }

    /// Apply a command from the gesture shell
    pub fn handle_command(&mut self, command: ShellCommand, now: Instant) {
        debug!(?command, "shell command");
        match command {
            ShellCommand::ToggleSidePanel => {
                self.side_panel_visible = !self.side_panel_visible;
                info!(visible = self.side_panel_visible, "Side panel toggled");
            }
            ShellCommand::ToggleRecording => {
                self.window.toggle_recording();
            }
            ShellCommand::ResetCalibration { restart_after } => {
                info!("Calibration reset, restarting in {:?}", restart_after);
                self.schedule_restart(now + restart_after);
            }
            ShellCommand::SoftRestart { after } => {
                info!("Soft restart in {:?}", after);
                self.schedule_restart(now + after);
            }
        }
    }

    fn schedule_restart(&mut self, at: Instant) {
        self.restart_at = Some(self.restart_at.map_or(at, |pending| pending.min(at)));
    }

    /// Drop all accumulated state, as if the UI had just been launched
    fn restart(&mut self) -> Result<(), OnroadError> {
        let layout = HudLayout::preset(self.settings.layout);
        self.window = OnroadWindow::new(self.settings.alert_config(), layout.border);
        self.hud = HudCompositor::new(layout, self.tick_hz)?;
        self.bus = TopicBus::new();
        self.side_panel_visible = false;
        self.stats.restarts += 1;
        info!("UI restarted ({} so far)", self.stats.restarts);
        Ok(())
    }

    /// Tick at the configured rate until the source is exhausted or the tick
    /// limit is reached
    pub async fn run(&mut self) -> Result<DriverStats, OnroadError> {
        let period = Duration::from_secs_f64(1.0 / f64::from(self.tick_hz));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let start = Instant::now();
        info!("Starting driver at {} Hz", self.tick_hz);

        loop {
            ticker.tick().await;
            let now = Instant::now();

            while let Ok(command) = self.commands.try_recv() {
                self.handle_command(command, now);
            }
            if self.restart_at.is_some_and(|at| at <= now) {
                self.restart_at = None;
                self.restart()?;
            }

            let now_ns = u64::try_from(now.duration_since(start).as_nanos()).unwrap_or(u64::MAX);
            if !self.tick(now_ns)? {
                info!("State source exhausted after {} ticks", self.stats.ticks);
                break;
            }

            if self.max_ticks.is_some_and(|max| self.stats.ticks >= max) {
                info!("Tick limit {} reached", self.stats.ticks);
                break;
            }
        }

        Ok(self.stats.clone())
    }
}
