//! Top toolbar: file picking, reload, and display toggles.

use std::path::PathBuf;

use egui::Ui;

use crate::state::AppState;

/// What the user asked the app to do this frame
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    Open(PathBuf),
    Reload,
    Cancel,
}

#[derive(Debug, Default)]
pub struct ToolbarOutput {
    pub action: Option<ToolbarAction>,
    /// A display toggle flipped; preferences should be saved
    pub view_changed: bool,
    /// The smoothing window changed; the displayed capture must be rebuilt
    pub smooth_changed: bool,
}

pub fn toolbar(ui: &mut Ui, state: &mut AppState) -> ToolbarOutput {
    let mut output = ToolbarOutput::default();

    ui.horizontal(|ui| {
        if ui.button("📂 Open…").clicked() {
            if let Some(path) = pick_capture_file() {
                output.action = Some(ToolbarAction::Open(path));
            }
        }

        if !state.recent_files.is_empty() {
            ui.menu_button("Recent", |ui| {
                let mut chosen = None;
                for path in &state.recent_files {
                    let label = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    if ui.button(label).clicked() {
                        chosen = Some(path.clone());
                        ui.close();
                    }
                }
                if let Some(path) = chosen {
                    output.action = Some(ToolbarAction::Open(path));
                }
            });
        }

        let can_reload = state.current_file.is_some() && !state.phase.is_loading();
        if ui
            .add_enabled(can_reload, egui::Button::new("⟳ Reload"))
            .clicked()
        {
            output.action = Some(ToolbarAction::Reload);
        }

        if state.phase.is_loading() {
            ui.spinner();
            if ui.button("Cancel").clicked() {
                output.action = Some(ToolbarAction::Cancel);
            }
        }

        ui.separator();

        let view = &mut state.view;
        output.view_changed |= ui.checkbox(&mut view.show_grid, "Grid").changed();
        output.view_changed |= ui.checkbox(&mut view.show_threshold, "Threshold").changed();
        output.view_changed |= ui.checkbox(&mut view.show_stats, "Stats").changed();
        output.view_changed |= ui.checkbox(&mut view.ambient, "Ambient").changed();

        ui.separator();
        ui.label("Smooth");
        let smooth = ui.add(
            egui::DragValue::new(&mut view.smooth_window)
                .range(1..=64)
                .speed(0.1),
        );
        if smooth.changed() {
            output.smooth_changed = true;
            output.view_changed = true;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(path) = &state.current_file {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.weak(name).on_hover_text(path.display().to_string());
            }
        });
    });

    output
}

fn pick_capture_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Captures", &["csv", "txt"])
        .add_filter("All files", &["*"])
        .pick_file()
}
