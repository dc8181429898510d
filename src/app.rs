//! Application shell: owns the state, the background loader, and the panels.

use std::path::PathBuf;

use eframe::egui::{self, CentralPanel, TopBottomPanel};

use crate::ambient::BeamField;
use crate::chart::{ChartPanel, render};
use crate::config::AppConfig;
use crate::constants::layout::STATS_PANEL_HEIGHT;
use crate::data::{BackgroundLoader, Dataset, FileSource};
use crate::state::{AppState, LoadPhase};
use crate::ui::stats_panel::stats_panel;
use crate::ui::toolbar::{ToolbarAction, toolbar};

pub struct GlareScope {
    state: AppState,
    config: AppConfig,
    panel: ChartPanel,
    loader: BackgroundLoader,
    ambient: BeamField,
    /// Capture as loaded, before display-time smoothing
    raw: Option<Dataset>,
}

impl GlareScope {
    pub fn new(initial: Option<PathBuf>) -> Self {
        let config = AppConfig::load();
        let mut state = AppState::default();
        state.view = config.view_state();
        state.recent_files = config.recent_files.clone();

        let mut app = Self {
            state,
            config,
            panel: ChartPanel::default(),
            loader: BackgroundLoader::spawn(),
            ambient: BeamField::new(),
            raw: None,
        };
        if let Some(path) = initial {
            app.open(path);
        }
        app
    }

    /// Start loading a capture, superseding whatever is in flight
    fn open(&mut self, path: PathBuf) {
        self.state.set_current_file(path.clone());
        self.state.phase = LoadPhase::Loading;
        self.raw = None;
        self.panel.invalidate();
        self.loader.request(Box::new(FileSource::new(path)));
        self.save_config();
    }

    fn cancel(&mut self) {
        self.loader.cancel();
        self.state.phase = LoadPhase::Idle;
    }

    fn poll_loader(&mut self) {
        if !self.state.phase.is_loading() {
            return;
        }
        if let Some(result) = self.loader.poll() {
            match result {
                Ok(dataset) => {
                    self.raw = Some(dataset);
                    self.refresh_displayed();
                }
                Err(err) => {
                    self.state.phase = LoadPhase::Failed(err);
                    self.panel.invalidate();
                }
            }
        }
    }

    /// Rebuild the displayed dataset from the raw capture, applying the
    /// current smoothing window and recomputing statistics.
    fn refresh_displayed(&mut self) {
        let Some(raw) = &self.raw else {
            return;
        };
        let dataset = raw.smoothed(self.state.view.smooth_window);
        self.state.phase = LoadPhase::from_result(Ok(dataset));
        self.panel.invalidate();
    }

    fn save_config(&mut self) {
        self.config.apply_view(self.state.view);
        self.config.recent_files = self.state.recent_files.clone();
        let _ = self.config.save();
    }

    fn handle_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Open(path) => self.open(path),
            ToolbarAction::Reload => {
                if let Some(path) = self.state.current_file.clone() {
                    self.open(path);
                }
            }
            ToolbarAction::Cancel => self.cancel(),
        }
    }
}

impl eframe::App for GlareScope {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::scope!("frame");
        ctx.set_visuals(egui::Visuals::dark());

        self.poll_loader();

        // Keyboard shortcuts
        ctx.input(|i| {
            if i.key_pressed(egui::Key::G) {
                self.state.view.show_grid = !self.state.view.show_grid;
            }
            if i.key_pressed(egui::Key::T) {
                self.state.view.show_threshold = !self.state.view.show_threshold;
            }
            if i.key_pressed(egui::Key::A) {
                self.state.view.ambient = !self.state.view.ambient;
            }
        });

        // Drag and drop opens the first dropped capture
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .first()
                .and_then(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            self.open(path);
        }

        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let output = toolbar(ui, &mut self.state);
            if output.smooth_changed {
                self.refresh_displayed();
            }
            if output.view_changed {
                self.save_config();
            }
            if let Some(action) = output.action {
                self.handle_action(action);
            }
        });

        if self.state.view.show_stats {
            if let LoadPhase::Ready { dataset, stats } = &self.state.phase {
                TopBottomPanel::bottom("stats")
                    .exact_height(STATS_PANEL_HEIGHT)
                    .show(ctx, |ui| {
                        stats_panel(ui, dataset, stats, self.panel.hovered_index());
                    });
            }
        }

        CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                render::background(ui.painter(), rect);

                if self.state.view.ambient {
                    let dt = ctx.input(|i| i.stable_dt);
                    self.ambient.update(dt);
                    self.ambient.paint(ui.painter(), rect);
                }

                self.panel.ui(ui, &self.state.phase, &self.state.view);
            });

        if self.state.phase.is_loading() || self.state.view.ambient {
            ctx.request_repaint();
        }
        profiling::finish_frame!();
    }
}
