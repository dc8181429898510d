//! Stateless chart drawing pass.
//!
//! Every call fully repaints the chart rect; nothing here accumulates state,
//! so the pass is safe to run on-demand or every animation tick. Layering:
//! grid and axes, threshold overlay, area fill, curve, exceedance highlight,
//! hover marker and tooltip. The viewport backdrop is painted separately via
//! [`background`] so the ambient layer can sit between it and the chart.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, pos2, vec2};

use crate::chart::scale::ChartScale;
use crate::constants::chart::{MAX_DRAW_WIDTH, MIN_DRAW_WIDTH};
use crate::data::{Dataset, GlareStats};
use crate::error::LoadError;

// Night-sky palette lifted from the Starless landing page
const BG_TOP: Color32 = Color32::from_rgb(13, 17, 28);
const BG_BOTTOM: Color32 = Color32::from_rgb(7, 9, 16);
const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 10);
const AXIS_COLOR: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 40);
const TICK_TEXT: Color32 = Color32::from_rgb(148, 163, 184);
const CURVE_COLOR: Color32 = Color32::from_rgb(120, 140, 255);
const AREA_ALPHA: u8 = 54;
const THRESHOLD_COLOR: Color32 = Color32::from_rgb(248, 180, 80);
const WARN_COLOR: Color32 = Color32::from_rgb(248, 113, 113);
const STATUS_TEXT: Color32 = Color32::from_rgb(148, 163, 184);
const TOOLTIP_BG: Color32 = Color32::from_rgba_premultiplied(15, 20, 34, 235);

/// What the chart has to show this pass
pub enum ChartContent<'a> {
    /// Nothing opened yet
    Idle,
    /// A load is outstanding; the dataset must not be read yet
    Loading,
    /// The last load failed
    Failed(&'a LoadError),
    /// Loaded fine, but the capture held no readings
    Empty,
    Ready {
        dataset: &'a Dataset,
        stats: &'a GlareStats,
        scale: &'a ChartScale,
    },
}

/// Per-pass display toggles
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_grid: bool,
    pub show_threshold: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_threshold: true,
        }
    }
}

/// Paint one full chart pass into `rect`.
pub fn render(
    painter: &Painter,
    rect: Rect,
    content: ChartContent<'_>,
    hover: Option<usize>,
    options: RenderOptions,
) {
    profiling::scope!("chart_render");

    let (dataset, stats, scale) = match content {
        ChartContent::Idle => return status_line(painter, rect, "Open a capture to begin"),
        ChartContent::Loading => return status_line(painter, rect, "Loading…"),
        ChartContent::Failed(err) => return status_line(painter, rect, &err.user_message()),
        ChartContent::Empty => return status_line(painter, rect, "No data"),
        ChartContent::Ready {
            dataset,
            stats,
            scale,
        } => (dataset, stats, scale),
    };

    draw_grid_and_axes(painter, scale, options.show_grid);
    if options.show_threshold {
        draw_threshold(painter, stats, scale);
    }

    let stride = decimation_stride(dataset.len(), scale.inner_width());
    let indices = decimated_indices(dataset.len(), stride);
    let points: Vec<Pos2> = indices
        .iter()
        .map(|&i| scale.point(i, dataset.values()[i]))
        .collect();

    draw_area_fill(painter, &points, scale);
    if points.len() >= 2 {
        painter.add(Shape::line(points.clone(), Stroke::new(1.6, CURVE_COLOR)));
    }
    draw_exceedance(painter, dataset, stats, &indices, &points);
    if let Some(index) = hover {
        draw_hover(painter, dataset, scale, index);
    }
}

/// Stride bounding per-pass drawing cost: roughly one sample per horizontal
/// pixel, with the effective width clamped so tiny and huge viewports both
/// stay sane.
pub fn decimation_stride(n: usize, inner_width: f32) -> usize {
    let clamped = (inner_width as f64).clamp(MIN_DRAW_WIDTH, MAX_DRAW_WIDTH);
    ((n as f64 / clamped).ceil() as usize).max(1)
}

/// Indices actually plotted. The final sample is always included so the
/// curve never ends short of the last reading.
pub fn decimated_indices(n: usize, stride: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).step_by(stride.max(1)).collect();
    if let Some(&last) = indices.last() {
        if last != n - 1 {
            indices.push(n - 1);
        }
    }
    indices
}

/// Contiguous runs of positions (into the decimated index list) whose value
/// exceeds `threshold`. Runs are `(start, end)` inclusive; a transition below
/// threshold always ends the current run.
pub fn exceedance_runs(values: &[f64], indices: &[usize], threshold: f64) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (pos, &i) in indices.iter().enumerate() {
        if values[i] > threshold {
            start.get_or_insert(pos);
        } else if let Some(s) = start.take() {
            runs.push((s, pos - 1));
        }
    }
    if let Some(s) = start {
        runs.push((s, indices.len() - 1));
    }
    runs
}

/// Format an axis label: integer precision above magnitude 1000, otherwise
/// two decimals with a trailing `.00` suppressed. Integer rounding is half
/// away from zero, not the formatter's half-to-even.
pub fn format_tick(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{:.0}", v.round())
    } else {
        let s = format!("{v:.2}");
        s.strip_suffix(".00").map(str::to_owned).unwrap_or(s)
    }
}

/// Night-sky backdrop for the whole viewport. Painted by the app before the
/// ambient layer and the chart, so the chart pass itself stays transparent.
pub fn background(painter: &Painter, rect: Rect) {
    painter.add(Shape::mesh(vertical_gradient(rect, BG_TOP, BG_BOTTOM)));
}

fn vertical_gradient(rect: Rect, top: Color32, bottom: Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

fn status_line(painter: &Painter, rect: Rect, text: &str) {
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(14.0),
        STATUS_TEXT,
    );
}

fn draw_grid_and_axes(painter: &Painter, scale: &ChartScale, show_grid: bool) {
    let plot = scale.plot_rect();

    for &tick in scale.ticks() {
        let y = scale.y_of(tick);
        if show_grid {
            painter.line_segment(
                [pos2(plot.left(), y), pos2(plot.right(), y)],
                Stroke::new(1.0, GRID_COLOR),
            );
        }
        painter.text(
            pos2(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format_tick(tick),
            FontId::proportional(10.0),
            TICK_TEXT,
        );
    }

    // Axis lines on top of the gridlines
    painter.line_segment(
        [plot.left_top(), plot.left_bottom()],
        Stroke::new(1.0, AXIS_COLOR),
    );
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        Stroke::new(1.0, AXIS_COLOR),
    );
}

fn draw_threshold(painter: &Painter, stats: &GlareStats, scale: &ChartScale) {
    let (_, y_max) = scale.y_domain();
    if stats.threshold >= y_max {
        return;
    }
    let plot = scale.plot_rect();
    let y = scale.y_of(stats.threshold);
    painter.extend(Shape::dashed_line(
        &[pos2(plot.left(), y), pos2(plot.right(), y)],
        Stroke::new(1.0, THRESHOLD_COLOR),
        6.0,
        4.0,
    ));
    painter.text(
        pos2(plot.right() - 4.0, y - 4.0),
        Align2::RIGHT_BOTTOM,
        format!("alert ≥ {}", format_tick(stats.threshold)),
        FontId::proportional(10.0),
        THRESHOLD_COLOR,
    );
}

fn draw_area_fill(painter: &Painter, points: &[Pos2], scale: &ChartScale) {
    if points.len() < 2 {
        return;
    }
    let plot = scale.plot_rect();
    let span = (plot.bottom() - plot.top()).max(1.0);
    let alpha_at = |y: f32| -> Color32 {
        let t = ((plot.bottom() - y) / span).clamp(0.0, 1.0);
        Color32::from_rgba_unmultiplied(
            CURVE_COLOR.r(),
            CURVE_COLOR.g(),
            CURVE_COLOR.b(),
            (t * AREA_ALPHA as f32) as u8,
        )
    };
    let foot = Color32::from_rgba_unmultiplied(CURVE_COLOR.r(), CURVE_COLOR.g(), CURVE_COLOR.b(), 0);

    let mut mesh = egui::Mesh::default();
    for w in points.windows(2) {
        let base = mesh.vertices.len() as u32;
        mesh.colored_vertex(w[0], alpha_at(w[0].y));
        mesh.colored_vertex(w[1], alpha_at(w[1].y));
        mesh.colored_vertex(pos2(w[1].x, plot.bottom()), foot);
        mesh.colored_vertex(pos2(w[0].x, plot.bottom()), foot);
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
    painter.add(Shape::mesh(mesh));
}

fn draw_exceedance(
    painter: &Painter,
    dataset: &Dataset,
    stats: &GlareStats,
    indices: &[usize],
    points: &[Pos2],
) {
    for (start, end) in exceedance_runs(dataset.values(), indices, stats.threshold) {
        // Anchor the stroke one sample back at the crossing so an isolated
        // spike still draws a visible rising edge.
        let from = start.saturating_sub(1);
        if end > from {
            painter.add(Shape::line(
                points[from..=end].to_vec(),
                Stroke::new(1.8, WARN_COLOR),
            ));
        }
    }
}

fn draw_hover(painter: &Painter, dataset: &Dataset, scale: &ChartScale, index: usize) {
    let Some(value) = dataset.get(index) else {
        return;
    };
    let plot = scale.plot_rect();
    let marker = scale.point(index, value);

    painter.line_segment(
        [pos2(marker.x, plot.top()), pos2(marker.x, plot.bottom())],
        Stroke::new(1.0, Color32::from_rgba_premultiplied(255, 255, 255, 28)),
    );
    painter.circle_filled(marker, 3.5, CURVE_COLOR);
    painter.circle_stroke(marker, 3.5, Stroke::new(1.0, Color32::WHITE));

    let font = FontId::monospace(11.0);
    let text = format!("#{index}  {value:.2}");
    let galley = painter.layout_no_wrap(text.clone(), font.clone(), Color32::WHITE);
    let size = galley.rect.size() + vec2(16.0, 10.0);

    // Keep the tooltip inside the chart bounds
    let mut corner = pos2(marker.x + 10.0, marker.y - size.y - 10.0);
    if corner.x + size.x > plot.right() {
        corner.x = marker.x - size.x - 10.0;
    }
    // A plot shorter than the tooltip must not invert the clamp bounds
    corner.y = corner.y.clamp(plot.top(), (plot.bottom() - size.y).max(plot.top()));

    let tooltip = Rect::from_min_size(corner, size);
    painter.rect_filled(tooltip, 4.0, TOOLTIP_BG);
    painter.rect_stroke(tooltip, 4.0, Stroke::new(1.0, AXIS_COLOR), StrokeKind::Outside);
    painter.text(
        tooltip.left_top() + vec2(8.0, 5.0),
        Align2::LEFT_TOP,
        text,
        font,
        Color32::WHITE,
    );
}
