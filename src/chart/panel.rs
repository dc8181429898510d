//! Chart widget: owns hover state and the cached pixel mapping.
//!
//! The panel recomputes its `ChartScale` only when the dataset or the
//! allocated rect change, and drives the render pass directly from the
//! widget response instead of routing pointer events through any shared
//! dispatch.

use egui::{Rect, Sense, Ui, vec2};

use crate::chart::render::{ChartContent, RenderOptions, render};
use crate::chart::scale::{ChartScale, Margins};
use crate::constants::chart::MIN_CHART_HEIGHT;
use crate::state::{LoadPhase, ViewState};

pub struct ChartPanel {
    margins: Margins,
    scale: Option<ChartScale>,
    cached_rect: Rect,
    hover: Option<usize>,
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            scale: None,
            cached_rect: Rect::NOTHING,
            hover: None,
        }
    }
}

impl ChartPanel {
    /// Drop the cached mapping; call whenever a new dataset lands
    pub fn invalidate(&mut self) {
        self.scale = None;
        self.hover = None;
    }

    /// Index of the sample under the pointer, if any
    pub fn hovered_index(&self) -> Option<usize> {
        self.hover
    }

    /// Lay out and paint the chart for the current load phase.
    pub fn ui(&mut self, ui: &mut Ui, phase: &LoadPhase, view: &ViewState) {
        let size = vec2(
            ui.available_width(),
            ui.available_height().max(MIN_CHART_HEIGHT),
        );
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        if !ui.is_rect_visible(rect) {
            return;
        }
        let painter = ui.painter_at(rect);
        let options = RenderOptions {
            show_grid: view.show_grid,
            show_threshold: view.show_threshold,
        };

        let LoadPhase::Ready { dataset, stats } = phase else {
            self.hover = None;
            let content = match phase {
                LoadPhase::Idle => ChartContent::Idle,
                LoadPhase::Empty => ChartContent::Empty,
                LoadPhase::Loading => ChartContent::Loading,
                LoadPhase::Failed(err) => ChartContent::Failed(err),
                LoadPhase::Ready { .. } => unreachable!(),
            };
            render(&painter, rect, content, None, options);
            return;
        };

        if self.scale.is_none() || rect != self.cached_rect {
            self.cached_rect = rect;
            self.scale = Some(ChartScale::compute(dataset, stats, rect, self.margins));
        }
        let Some(scale) = self.scale.as_ref() else {
            return;
        };

        // Only the pointer's x matters; the nearest sample is looked up by
        // inverting the x mapping.
        self.hover = response.hover_pos().and_then(|pos| scale.index_at(pos.x));

        render(
            &painter,
            rect,
            ChartContent::Ready {
                dataset,
                stats,
                scale,
            },
            self.hover,
            options,
        );
    }
}
