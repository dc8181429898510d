//! Bottom readout of the capture statistics.

use egui::{RichText, Ui};

use crate::data::{Dataset, GlareStats};

pub fn stats_panel(ui: &mut Ui, dataset: &Dataset, stats: &GlareStats, hover: Option<usize>) {
    ui.horizontal(|ui| {
        metric(ui, "Baseline", format_reading(stats.baseline));
        metric(ui, "Peak", format_reading(stats.peak));
        metric(ui, "Ratio", format_ratio(stats.ratio));
        metric(ui, "Alert ≥", format_reading(stats.threshold));
        metric(ui, "Samples", dataset.len().to_string());

        if let Some(index) = hover {
            if let Some(value) = dataset.get(index) {
                ui.separator();
                metric(ui, &format!("#{index}"), format_reading(value));
            }
        }
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).small().weak());
        ui.label(RichText::new(value).monospace());
    });
    ui.add_space(12.0);
}

fn format_reading(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn format_ratio(r: f64) -> String {
    if r >= 100.0 {
        format!("×{r:.0}")
    } else {
        format!("×{r:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_format() {
        assert_eq!(format_reading(3.14159), "3.14");
        assert_eq!(format_reading(0.0), "0.00");
        assert_eq!(format_reading(12345.6), "12346");
    }

    #[test]
    fn test_ratio_format() {
        assert_eq!(format_ratio(1.0), "×1.0");
        assert_eq!(format_ratio(12.34), "×12.3");
        assert_eq!(format_ratio(250.0), "×250");
    }
}
