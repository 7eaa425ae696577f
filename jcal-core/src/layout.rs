//! Fixed page geometry of the year calendar, in PDF points.

use crate::planner::MONTHS_PER_PAGE;

/// Rows reserved per month column regardless of month length.
pub const MAX_DAYS: u32 = 31;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Font sizes in points.
pub mod font_size {
    pub const HEADER: f32 = 14.0;
    pub const FOOTER: f32 = 6.0;
    pub const MONTH_NAME: f32 = 10.0;
    pub const DAY: f32 = 12.0;
    pub const EVENTS: f32 = 6.0;
    pub const FOOTNOTES: f32 = 6.0;
    pub const WEEK: f32 = 4.0;
    pub const LEGEND: f32 = 6.0;
}

/// A3 landscape with six month columns split into two halves.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_top: f32,
    /// Gap between the left and right half
    pub gutter: f32,
    pub month_width: f32,
    pub day_width: f32,
    pub weekday_width: f32,
    pub footnote_width: f32,
    pub week_width: f32,
    pub text_width: f32,
    pub month_header_height: f32,
    pub day_height: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::a3_landscape()
    }
}

impl Geometry {
    pub fn a3_landscape() -> Self {
        let page_width = mm_to_pt(420.0);
        let page_height = mm_to_pt(297.0);
        let margin_left = mm_to_pt(8.0);
        let margin_right = mm_to_pt(8.0);
        let gutter = mm_to_pt(8.0);

        let printable_width = page_width - margin_left - margin_right;
        let month_width = (printable_width - gutter) / MONTHS_PER_PAGE as f32;
        let day_width = mm_to_pt(6.0);
        let weekday_width = mm_to_pt(6.0);
        let footnote_width = mm_to_pt(4.0);
        let week_width = mm_to_pt(3.0);

        Geometry {
            page_width,
            page_height,
            margin_left,
            margin_right,
            margin_bottom: mm_to_pt(8.0),
            margin_top: mm_to_pt(12.0),
            gutter,
            month_width,
            day_width,
            weekday_width,
            footnote_width,
            week_width,
            text_width: month_width - (day_width + weekday_width + footnote_width + week_width),
            month_header_height: mm_to_pt(6.0),
            day_height: mm_to_pt(8.0),
        }
    }

    pub fn printable_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn printable_height(&self) -> f32 {
        self.page_height - self.margin_bottom - self.margin_top
    }

    /// Width of one half page frame.
    pub fn half_width(&self) -> f32 {
        (self.printable_width() - self.gutter) / 2.0
    }

    /// Left edge of month column 0..6; the right three sit after the gutter.
    pub fn column_x(&self, column: usize) -> f32 {
        let gutter = if column >= MONTHS_PER_PAGE / 2 {
            self.gutter
        } else {
            0.0
        };
        self.margin_left + column as f32 * self.month_width + gutter
    }

    /// Bottom edge of the month header row.
    pub fn month_header_y(&self) -> f32 {
        self.page_height - self.margin_top - self.month_header_height
    }

    /// Bottom edge of the row for `day` (1-based).
    pub fn day_row_y(&self, day: u32) -> f32 {
        self.month_header_y() - day as f32 * self.day_height
    }

    /// Bottom edge of the 31-row grid.
    pub fn grid_bottom_y(&self) -> f32 {
        self.day_row_y(MAX_DAYS)
    }

    /// Baseline of the "Legend:" title under the grid.
    pub fn legend_title_y(&self) -> f32 {
        self.grid_bottom_y() - mm_to_pt(2.5)
    }

    /// Height of the framed legend box below the grid.
    pub fn legend_box_height(&self) -> f32 {
        self.legend_title_y() - self.margin_bottom - mm_to_pt(1.0)
    }

    pub fn header_baseline(&self) -> f32 {
        self.page_height - self.margin_top + 5.0
    }

    pub fn footer_baseline(&self) -> f32 {
        mm_to_pt(6.0)
    }

    /// Baseline that vertically centers text of `size` in a band.
    pub fn centered_baseline(band_bottom: f32, band_height: f32, size: f32) -> f32 {
        band_bottom + (band_height - size) / 2.0 + size * 0.2
    }

    /// Baselines for `count` stacked lines of `line_height`, centered on the
    /// row starting at `row_y`, top line first.
    pub fn stacked_baselines(&self, row_y: f32, count: usize, line_height: f32) -> Vec<f32> {
        let top = row_y + self.day_height / 2.0 + (count as f32 - 1.0) * line_height / 2.0
            - line_height / 2.0
            + 0.75;
        (0..count).map(|i| top - i as f32 * line_height).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_a3_landscape_dimensions() {
        let g = Geometry::a3_landscape();
        assert!(close(g.page_width, 1190.55));
        assert!(close(g.page_height, 841.89));
        assert!(close(g.margin_top, 34.02));
        assert!(close(g.day_height, 22.68));
    }

    #[test]
    fn test_columns_fill_both_halves() {
        let g = Geometry::a3_landscape();
        assert!(close(g.column_x(0), g.margin_left));
        assert!(close(g.column_x(3), g.margin_left + g.half_width() + g.gutter));

        let right_edge = g.column_x(5) + g.month_width;
        assert!(close(right_edge, g.page_width - g.margin_right));
        assert!(close(3.0 * g.month_width, g.half_width()));
    }

    #[test]
    fn test_grid_leaves_room_for_legend() {
        let g = Geometry::a3_landscape();
        assert!(g.grid_bottom_y() > g.margin_bottom);
        assert!(g.legend_box_height() > 0.0);
        assert!(close(g.day_row_y(0), g.month_header_y()));
        assert!(g.text_width > 0.0);
    }

    #[test]
    fn test_stacked_baselines_are_centered() {
        let g = Geometry::a3_landscape();
        let row_y = 100.0;
        let lines = g.stacked_baselines(row_y, 3, 5.5);
        assert_eq!(lines.len(), 3);
        assert!(close(lines[0] - lines[2], 11.0));
        let middle = row_y + g.day_height / 2.0 - 5.5 / 2.0 + 0.75;
        assert!(close(lines[1], middle));
    }
}
