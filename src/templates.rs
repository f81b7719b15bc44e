// src/templates.rs
use crate::models::stats::StatsSnapshot;
use askama::Template;
use std::f64::consts::PI;

/// Chart palette, cycled per hostel.
pub const COLORS: [&str; 6] = ["#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#A28FFF", "#FF6B6B"];

const PIE_CENTER: f64 = 100.0;
const PIE_RADIUS: f64 = 80.0;

/// One wedge of the "occupied beds by hostel" pie.
#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub value: i64,
    pub color: &'static str,
    /// SVG path data; empty when `full` is set.
    pub path: String,
    /// The only non-empty slice: drawn as a plain circle.
    pub full: bool,
}

#[derive(Debug, Clone)]
pub struct BarView {
    pub label: String,
    pub value: i64,
    pub width_pct: String,
}

#[derive(Debug, Clone)]
pub struct StackedBarView {
    pub label: String,
    pub occupied: i64,
    pub vacant: i64,
    pub occupied_pct: String,
    pub vacant_pct: String,
}

// Struct for `analytics.html` (templates/ folder)
#[derive(Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsPage {
    pub total_students: i64,
    pub pie: Vec<PieSlice>,
    pub dept_bars: Vec<BarView>,
    pub batch_bars: Vec<BarView>,
    pub hostel_bars: Vec<StackedBarView>,
}

fn pct(value: i64, max: i64) -> String {
    if max <= 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", value as f64 / max as f64 * 100.0)
}

fn point_at(angle: f64) -> (f64, f64) {
    (
        PIE_CENTER + PIE_RADIUS * angle.cos(),
        PIE_CENTER + PIE_RADIUS * angle.sin(),
    )
}

/// Wedges start at twelve o'clock and run clockwise. Zero values are skipped.
pub fn pie_slices(entries: &[(String, i64)]) -> Vec<PieSlice> {
    let total: i64 = entries.iter().map(|(_, v)| (*v).max(0)).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = -PI / 2.0;
    entries
        .iter()
        .enumerate()
        .filter(|(_, (_, value))| *value > 0)
        .map(|(index, (label, value))| {
            let fraction = *value as f64 / total as f64;
            let color = COLORS[index % COLORS.len()];
            if *value == total {
                return PieSlice { label: label.clone(), value: *value, color, path: String::new(), full: true };
            }

            let (x0, y0) = point_at(angle);
            angle += fraction * 2.0 * PI;
            let (x1, y1) = point_at(angle);
            let large_arc = u8::from(fraction > 0.5);
            let path = format!(
                "M {c:.2} {c:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z",
                c = PIE_CENTER,
                r = PIE_RADIUS,
            );
            PieSlice { label: label.clone(), value: *value, color, path, full: false }
        })
        .collect()
}

fn bars(entries: impl Iterator<Item = (String, i64)>) -> Vec<BarView> {
    let entries: Vec<(String, i64)> = entries.collect();
    let max = entries.iter().map(|(_, v)| *v).max().unwrap_or(0);
    entries
        .into_iter()
        .map(|(label, value)| BarView { width_pct: pct(value, max), label, value })
        .collect()
}

impl AnalyticsPage {
    pub fn from_snapshot(stats: &StatsSnapshot) -> Self {
        let pie_entries: Vec<(String, i64)> = stats
            .hostels
            .iter()
            .map(|h| (h.name.clone(), h.occupied))
            .collect();

        let dept_bars = bars(stats.by_dept.iter().map(|d| {
            let label = if d.dept.trim().is_empty() { "Unknown".to_string() } else { d.dept.clone() };
            (label, d.count)
        }));
        let batch_bars = bars(stats.by_batch.iter().map(|b| (b.batch.to_string(), b.count)));

        let widest = stats
            .hostels
            .iter()
            .map(|h| h.occupied + h.vacant)
            .max()
            .unwrap_or(0);
        let hostel_bars = stats
            .hostels
            .iter()
            .map(|h| StackedBarView {
                label: h.name.clone(),
                occupied: h.occupied,
                vacant: h.vacant,
                occupied_pct: pct(h.occupied, widest),
                vacant_pct: pct(h.vacant, widest),
            })
            .collect();

        Self {
            total_students: stats.total_students,
            pie: pie_slices(&pie_entries),
            dept_bars,
            batch_bars,
            hostel_bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stats::{BatchCount, DeptCount, HostelOccupancy};

    fn snapshot() -> StatsSnapshot {
        StatsSnapshot {
            total_students: 3,
            hostels: vec![
                HostelOccupancy { id: "a".into(), name: "A".into(), capacity: 10, occupied: 3, vacant: 7 },
                HostelOccupancy { id: "b".into(), name: "B & C".into(), capacity: 5, occupied: 0, vacant: 5 },
            ],
            by_dept: vec![
                DeptCount { dept: "SEECS".into(), count: 2 },
                DeptCount { dept: "".into(), count: 1 },
            ],
            by_batch: vec![BatchCount { batch: 2022, count: 3 }],
        }
    }

    #[test]
    fn single_occupied_hostel_is_a_full_circle() {
        let page = AnalyticsPage::from_snapshot(&snapshot());
        assert_eq!(page.pie.len(), 1);
        assert!(page.pie[0].full);
        assert_eq!(page.pie[0].color, COLORS[0]);
    }

    #[test]
    fn wedges_use_large_arc_only_past_half() {
        let slices = pie_slices(&[("x".into(), 3), ("y".into(), 1)]);
        assert_eq!(slices.len(), 2);
        assert!(slices[0].path.contains(" 0 1 1 "));
        assert!(slices[1].path.contains(" 0 0 1 "));
    }

    #[test]
    fn empty_pie_when_nobody_lives_anywhere() {
        assert!(pie_slices(&[("x".into(), 0)]).is_empty());
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        let page = AnalyticsPage::from_snapshot(&snapshot());
        assert_eq!(page.dept_bars[0].width_pct, "100.0");
        assert_eq!(page.dept_bars[1].width_pct, "50.0");
        assert_eq!(page.dept_bars[1].label, "Unknown");
        assert_eq!(page.hostel_bars[0].occupied_pct, "30.0");
        assert_eq!(page.hostel_bars[1].vacant_pct, "50.0");
    }

    #[test]
    fn rendered_page_escapes_hostel_names() {
        let html = AnalyticsPage::from_snapshot(&snapshot()).render().unwrap();
        assert!(html.contains("Analytics Dashboard"));
        assert!(!html.contains("B & C"));
        assert!(html.contains("B &#38; C") || html.contains("B &amp; C"));
    }
}
