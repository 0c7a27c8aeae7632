//! 30-day activity heatmap
//!
//! Buckets per-day memo counts into intensity levels 0..=4 and renders
//! the grid with its legend.

use super::escape;
use crate::config::{HEATMAP_COLORS, HEATMAP_DAYS, HEATMAP_MAX_LEVEL};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use std::fmt::Write;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

#[derive(Debug, Clone)]
pub struct Heatmap {
    /// Oldest day first, today last
    pub cells: Vec<HeatmapCell>,
}

/// Intensity for a day: 0 for no memos, else `ceil(count / max * 4)` capped at 4
pub fn level(count: u32, max: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    let max = u64::from(max.max(1));
    let scaled = (u64::from(count) * u64::from(HEATMAP_MAX_LEVEL)).div_ceil(max);
    scaled.min(u64::from(HEATMAP_MAX_LEVEL)) as u8
}

impl Heatmap {
    /// Build the window ending at `today` from an ISO-date → count mapping.
    ///
    /// The maximum is taken over every value in the mapping; keys that are
    /// not `YYYY-MM-DD` dates never match a cell.
    pub fn from_counts(counts: &BTreeMap<String, u32>, today: NaiveDate) -> Self {
        let max = counts.values().copied().max().unwrap_or(0).max(1);

        let by_date: BTreeMap<NaiveDate, u32> = counts
            .iter()
            .filter_map(|(day, count)| {
                NaiveDate::parse_from_str(day, DATE_FORMAT)
                    .ok()
                    .map(|date| (date, *count))
            })
            .collect();

        let cells = (0..HEATMAP_DAYS)
            .rev()
            .map(|days_ago| {
                let date = today - Duration::days(days_ago);
                let count = by_date.get(&date).copied().unwrap_or(0);
                HeatmapCell {
                    date,
                    count,
                    level: level(count, max),
                }
            })
            .collect();

        Self { cells }
    }

    /// First day of the window
    pub fn start(today: NaiveDate) -> NaiveDate {
        today - Duration::days(HEATMAP_DAYS - 1)
    }

    pub fn render(&self) -> String {
        let mut grid = String::new();
        for cell in &self.cells {
            let date = cell.date.format(DATE_FORMAT).to_string();
            let _ = write!(
                grid,
                r#"<div class="heatmap-cell" data-level="{level}" data-date="{date}" data-count="{count}" title="{date}: {count} 条备忘录"></div>"#,
                level = cell.level,
                date = escape(&date),
                count = cell.count,
            );
        }

        let legend: String = HEATMAP_COLORS
            .iter()
            .map(|color| format!(r#"<div class="heatmap-legend-item" style="background: {};"></div>"#, color))
            .collect();

        format!(
            r#"
<div class="heatmap-container">
    <h3 class="heatmap-title">📊 最近30天动态</h3>
    <div id="heatmapGrid" class="heatmap-grid">{grid}</div>
    <div class="heatmap-legend">{legend}</div>
</div>
<div id="heatmapTooltip" class="heatmap-tooltip"></div>"#
        )
    }
}
