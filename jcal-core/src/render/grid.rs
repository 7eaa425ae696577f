//! Renders one half-year page: six month columns of 31 day rows each, with
//! header, footer and a footnote legend under every month.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use tracing::warn;

use super::surface::{Anchor, Font, Rgb, Surface, palette};
use crate::agenda::{DayRecord, MAX_DISPLAY_LINES, YearAgenda};
use crate::error::JcalResult;
use crate::layout::{Geometry, MAX_DAYS, font_size, mm_to_pt};
use crate::locale::Language;
use crate::planner::{MONTHS_PER_PAGE, MonthSlot, Page, plan_page};

const LINE_WIDTH: f32 = 0.03;
/// Distance between stacked event lines and footnote markers.
const CELL_LINE_HEIGHT: f32 = font_size::EVENTS - 0.5;
/// Horizontal inset of texts from their column edge.
const TEXT_INSET: f32 = 2.5;
const HEADER_INSET: f32 = 10.0;

/// Caller-supplied texts printed around the grid.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Header with the years placeholder already substituted
    pub header: String,
    pub feed_url: String,
    pub generated_at: NaiveDateTime,
    pub language: Language,
}

/// Background of a day row; the first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFill {
    HolidayOrSunday,
    Saturday,
    Vacation,
    Plain,
}

impl RowFill {
    pub fn color(self) -> Rgb {
        match self {
            RowFill::HolidayOrSunday => palette::SUNDAY_OR_HOLIDAY,
            RowFill::Saturday => palette::SATURDAY,
            RowFill::Vacation => palette::VACATION,
            RowFill::Plain => palette::WHITE,
        }
    }
}

pub fn row_fill(date: NaiveDate, record: Option<&DayRecord>) -> RowFill {
    let is_holiday = record.is_some_and(|r| r.is_holiday);
    let is_vacation = record.is_some_and(|r| r.is_vacation_day);

    if is_holiday || date.weekday() == Weekday::Sun {
        RowFill::HolidayOrSunday
    } else if date.weekday() == Weekday::Sat {
        RowFill::Saturday
    } else if is_vacation {
        RowFill::Vacation
    } else {
        RowFill::Plain
    }
}

/// Footnote numbers for one day, one per line, packed with commas once
/// they would need more lines than a day cell holds.
fn marker_rows(footnotes: &[usize]) -> Vec<String> {
    let per_row = footnotes.len().div_ceil(MAX_DISPLAY_LINES).max(1);
    footnotes
        .chunks(per_row)
        .map(|chunk| {
            chunk
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

pub struct GridRenderer<'a> {
    agenda: &'a YearAgenda,
    options: &'a RenderOptions,
    geometry: Geometry,
}

impl<'a> GridRenderer<'a> {
    pub fn new(agenda: &'a YearAgenda, options: &'a RenderOptions) -> Self {
        GridRenderer {
            agenda,
            options,
            geometry: Geometry::a3_landscape(),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Draw one full page and advance the surface to the next.
    pub fn render_page<S: Surface>(&self, surface: &mut S, page: Page) -> JcalResult<()> {
        surface.set_line_width(LINE_WIDTH);
        surface.set_stroke_color(palette::BLACK);
        self.draw_frames(surface);

        for slot in plan_page(self.agenda.window(), page) {
            if slot.column % (MONTHS_PER_PAGE / 2) == 0 {
                self.draw_header(surface, slot.column, page);
                self.draw_footer(surface, slot.column);
            }
            self.draw_month(surface, &slot);
        }

        surface.show_page()
    }

    fn draw_frames<S: Surface>(&self, surface: &mut S) {
        let g = &self.geometry;
        let height = g.printable_height();
        surface.rect(g.margin_left, g.margin_bottom, g.half_width(), height, true, false);
        surface.rect(
            (g.page_width + g.gutter) / 2.0,
            g.margin_bottom,
            g.half_width(),
            height,
            true,
            false,
        );
    }

    fn draw_header<S: Surface>(&self, surface: &mut S, column: usize, page: Page) {
        let g = &self.geometry;
        let x = g.column_x(column);
        let y = g.header_baseline();
        let language = self.options.language;

        surface.set_fill_color(palette::BLACK);
        surface.set_font(Font::Bold, font_size::HEADER);
        surface.text(x + HEADER_INSET, y, &self.options.header, Anchor::Left);
        surface.set_font(Font::Regular, font_size::HEADER);
        surface.text(
            x + 3.0 * g.month_width - HEADER_INSET,
            y,
            &language.half_year_label(page.number()),
            Anchor::Right,
        );
    }

    fn draw_footer<S: Surface>(&self, surface: &mut S, column: usize) {
        let g = &self.geometry;
        let y = g.footer_baseline();
        let language = self.options.language;
        let left = g.column_x(column);
        let right = left + 3.0 * g.month_width;

        surface.set_fill_color(palette::BLACK);
        surface.set_font(Font::Italic, font_size::FOOTER);
        surface.text(left, y, &language.feed_label(&self.options.feed_url), Anchor::Left);
        surface.text(
            right,
            y,
            &language.created_label(self.options.generated_at),
            Anchor::Right,
        );
    }

    fn draw_month<S: Surface>(&self, surface: &mut S, slot: &MonthSlot) {
        let g = &self.geometry;
        let x = g.column_x(slot.column);
        let month = slot.month;

        // heading
        let y = g.month_header_y();
        surface.set_fill_color(palette::MONTH_HEADER);
        surface.rect(x, y, g.month_width, g.month_header_height, true, true);
        surface.set_fill_color(palette::BLACK);
        surface.set_font(Font::Regular, font_size::MONTH_NAME);
        surface.text(
            x + g.month_width / 2.0,
            Geometry::centered_baseline(y, g.month_header_height, font_size::MONTH_NAME),
            &self.options.language.month_heading(month.month, month.year),
            Anchor::Center,
        );

        let days = month.days_in_month();
        for date in month.first_day().iter_days().take(days as usize) {
            self.draw_day(surface, x, date);
        }

        if days < MAX_DAYS {
            surface.set_fill_color(palette::FILLER);
            surface.rect(
                x,
                g.grid_bottom_y(),
                g.month_width,
                (MAX_DAYS - days) as f32 * g.day_height,
                true,
                true,
            );
        }

        self.draw_legend(surface, x, slot);
    }

    fn draw_day<S: Surface>(&self, surface: &mut S, x: f32, date: NaiveDate) {
        let g = &self.geometry;
        let record = self.agenda.day(date);
        let y = g.day_row_y(date.day());

        surface.set_fill_color(row_fill(date, record).color());
        surface.rect(x, y, g.month_width, g.day_height, true, true);

        surface.set_fill_color(palette::BLACK);
        surface.set_font(Font::Regular, font_size::DAY);
        let baseline = Geometry::centered_baseline(y, g.day_height, font_size::DAY);
        surface.text(
            x + g.day_width - TEXT_INSET,
            baseline,
            &date.day().to_string(),
            Anchor::Right,
        );
        surface.text(
            x + g.day_width + g.weekday_width / 2.0,
            baseline,
            self.options.language.weekday_abbrev(date.weekday()),
            Anchor::Center,
        );

        if date.weekday() == Weekday::Mon {
            surface.set_font(Font::Regular, font_size::WEEK);
            let week_y =
                y + (g.day_height - font_size::WEEK) / 2.0 + font_size::WEEK * 0.02;
            surface.text(
                x + g.month_width - 2.0,
                week_y,
                &date.iso_week().week().to_string(),
                Anchor::Right,
            );
        }

        if let Some(record) = record {
            surface.set_font(Font::Regular, font_size::EVENTS);
            let text_x = x + g.day_width + g.weekday_width + TEXT_INSET;
            let lines = &record.display_lines;
            for (line, line_y) in lines
                .iter()
                .zip(g.stacked_baselines(y, lines.len(), CELL_LINE_HEIGHT))
            {
                surface.text(text_x, line_y, line, Anchor::Left);
            }
        }

        let footnotes = self.agenda.footnotes_on(date);
        if !footnotes.is_empty() {
            surface.set_font(Font::Regular, font_size::FOOTNOTES);
            let marker_x =
                x + g.day_width + g.weekday_width + g.text_width + g.footnote_width - 1.0;
            let rows = marker_rows(footnotes);
            for (row, marker_y) in rows
                .iter()
                .zip(g.stacked_baselines(y, rows.len(), CELL_LINE_HEIGHT))
            {
                surface.text(marker_x, marker_y, row, Anchor::Right);
            }
        }
    }

    fn draw_legend<S: Surface>(&self, surface: &mut S, x: f32, slot: &MonthSlot) {
        let g = &self.geometry;
        let title_y = g.legend_title_y();

        surface.set_fill_color(palette::BLACK);
        surface.set_font(Font::Regular, font_size::EVENTS);
        surface.text(
            x + 2.0,
            title_y,
            self.options.language.legend_title(),
            Anchor::Left,
        );
        surface.rect(x, g.margin_bottom, g.month_width, g.legend_box_height(), true, false);

        let entries = self.agenda.legend(slot.month);
        let lowest = g.margin_bottom + mm_to_pt(1.0);
        surface.set_font(Font::Regular, font_size::LEGEND);
        let mut line_y = title_y - 2.0 * font_size::LEGEND;
        for (drawn, entry) in entries.iter().enumerate() {
            if line_y < lowest {
                warn!(
                    year = slot.month.year,
                    month = slot.month.month,
                    suppressed = entries.len() - drawn,
                    "legend does not fit below the month"
                );
                break;
            }
            surface.text(
                x + 2.0,
                line_y,
                &format!("{}: {}", entry.index, entry.text),
                Anchor::Left,
            );
            line_y -= font_size::LEGEND;
        }
    }
}
