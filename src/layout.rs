//! Pure geometry for the widget: no drawing happens here. Every coordinate
//! the renderer paints is computed up front from the canvas size and month
//! shape, so each one is independently testable and holds across all device
//! breakpoints.

use crate::calendar::MonthView;
use crate::habits::ALL_CATEGORIES;

/// Inner padding between the canvas edge and drawn content.
pub const PADDING: i32 = 12;

/// All scaled dimensions are ratios against this design height.
const REFERENCE_HEIGHT: f32 = 345.0;

/// Ordered (min screen width, canvas width, canvas height). First match wins;
/// the final zero entry makes selection total.
pub const BREAKPOINTS: &[(u32, u32, u32)] = &[
    (428, 364, 382),
    (390, 338, 354),
    (375, 329, 345),
    (0, 292, 311),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub padding: i32,
    pub scale: f32,
}

impl CanvasSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: PADDING,
            scale: height as f32 / REFERENCE_HEIGHT,
        }
    }

    /// Canvas size for a device screen width, from the breakpoint table.
    pub fn for_screen_width(screen_width: u32) -> Self {
        let (_, width, height) = BREAKPOINTS
            .iter()
            .copied()
            .find(|&(min, _, _)| screen_width >= min)
            .unwrap_or(BREAKPOINTS[BREAKPOINTS.len() - 1]);
        Self::new(width, height)
    }

    pub fn inner_width(&self) -> i32 {
        self.width as i32 - 2 * self.padding
    }

    /// Round a design-space dimension into canvas pixels.
    pub fn scaled(&self, base: f32) -> i32 {
        (base * self.scale).round() as i32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Shrink by `inset` on all sides (the ring-effect overpaint).
    pub fn inset(&self, inset: i32) -> Self {
        Self {
            x: self.x + inset,
            y: self.y + inset,
            w: self.w - 2 * inset,
            h: self.h - 2 * inset,
        }
    }
}

/// One calendar day cell: grid position plus paint anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub row: u32,
    pub col: u32,
    pub center_x: f32,
    /// Top of the day-number text.
    pub y: i32,
    /// Top of the habit dot row under the number.
    pub dot_y: i32,
}

/// Circle box plus label line for one wins indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorSlot {
    pub circle: Rect,
    pub label_y: i32,
}

#[derive(Clone, Debug)]
pub struct LayoutPlan {
    pub canvas: CanvasSpec,
    pub header_pos: (i32, i32),
    pub header_font: i32,
    pub city_box: Rect,
    pub city_font: i32,
    pub weekday_y: i32,
    pub weekday_font: i32,
    pub column_centers: [f32; 7],
    pub day_font: i32,
    pub row_height: i32,
    pub day_cells: Vec<DayCell>,
    pub highlight_size: i32,
    /// Day number and highlight box, present only when "today" falls inside
    /// the rendered month.
    pub today_highlight: Option<(u32, Rect)>,
    pub dot_size: i32,
    pub dot_spacing: i32,
    pub divider: Rect,
    pub wins_label_pos: (i32, i32),
    pub wins_font: i32,
    pub indicators: [IndicatorSlot; 3],
    pub indicator_stroke: i32,
    pub check_font: i32,
    pub check_inset_y: i32,
    pub label_font: i32,
}

impl LayoutPlan {
    /// Compute the full widget geometry. `today_day` is the day-of-month to
    /// highlight, or None when the rendered month does not contain today.
    pub fn compute(canvas: CanvasSpec, month: &MonthView, today_day: Option<u32>) -> Self {
        let padding = canvas.padding;
        let inner_width = canvas.inner_width();
        let cell_width = inner_width as f32 / 7.0;

        let calendar_top = padding + canvas.scaled(36.0);

        let mut column_centers = [0.0f32; 7];
        for (i, center) in column_centers.iter_mut().enumerate() {
            *center = padding as f32 + i as f32 * cell_width + cell_width / 2.0;
        }

        // Vertical budget for the grid: whatever the header, weekday labels
        // and bottom section leave over, split evenly across the weeks this
        // month spans. Row height shrinks for 6-week months instead of the
        // grid overflowing the canvas.
        let header_space = canvas.scaled(36.0);
        let day_label_space = canvas.scaled(24.0);
        let bottom_section_space = canvas.scaled(105.0);
        let available = canvas.height as i32
            - padding
            - header_space
            - day_label_space
            - bottom_section_space
            - padding;
        let row_height = available / month.weeks_needed as i32;
        let first_row_y = calendar_top + canvas.scaled(24.0);

        let dot_offset = canvas.scaled(26.0);
        let mut day_cells = Vec::with_capacity(month.days_in_month as usize);
        for day in 1..=month.days_in_month {
            let index = month.first_weekday_offset + day - 1;
            let row = index / 7;
            let col = index % 7;
            let y = first_row_y + row as i32 * row_height;
            day_cells.push(DayCell {
                day,
                row,
                col,
                center_x: column_centers[col as usize],
                y,
                dot_y: y + dot_offset,
            });
        }

        let highlight_size = canvas.scaled(28.0);
        let today_highlight = today_day
            .and_then(|day| day_cells.iter().find(|cell| cell.day == day))
            .map(|cell| {
                let rect = Rect::new(
                    (cell.center_x - highlight_size as f32 / 2.0).round() as i32,
                    cell.y - 4,
                    highlight_size,
                    highlight_size,
                );
                (cell.day, rect)
            });

        let calendar_end_y = first_row_y + month.weeks_needed as i32 * row_height;
        let divider_y = calendar_end_y + canvas.scaled(8.0);
        let divider = Rect::new(padding, divider_y, inner_width, 1);

        let wins_y = divider_y + canvas.scaled(12.0);
        let indicator_y = wins_y + canvas.scaled(28.0);
        let circle_size = canvas.scaled(32.0);
        let indicator_spacing = canvas.scaled(70.0);

        let count = ALL_CATEGORIES.len() as i32;
        let total_width = count * circle_size + (count - 1) * indicator_spacing;
        let mut indicator_x = (canvas.width as i32 - total_width) / 2;
        let label_y = indicator_y + circle_size + canvas.scaled(6.0);
        let indicators = std::array::from_fn(|_| {
            let slot = IndicatorSlot {
                circle: Rect::new(indicator_x, indicator_y, circle_size, circle_size),
                label_y,
            };
            indicator_x += circle_size + indicator_spacing;
            slot
        });

        Self {
            canvas,
            header_pos: (padding, padding + 4),
            header_font: canvas.scaled(24.0),
            city_box: Rect::new(canvas.width as i32 - 140 - padding, padding + 8, 140, 20),
            city_font: canvas.scaled(16.0),
            weekday_y: calendar_top,
            weekday_font: canvas.scaled(14.0),
            column_centers,
            day_font: canvas.scaled(18.0),
            row_height,
            day_cells,
            highlight_size,
            today_highlight,
            dot_size: canvas.scaled(5.0),
            dot_spacing: canvas.scaled(6.0),
            divider,
            wins_label_pos: (padding, wins_y),
            wins_font: canvas.scaled(18.0),
            indicators,
            indicator_stroke: canvas.scaled(2.0),
            check_font: canvas.scaled(18.0),
            check_inset_y: canvas.scaled(6.0),
            label_font: canvas.scaled(12.0),
        }
    }

    /// Leftmost x of a row of `n` dots centered on `center_x`.
    pub fn dot_row_start(&self, center_x: f32, n: u32) -> f32 {
        let n = n as i32;
        let total_width = n * self.dot_size + (n - 1).max(0) * self.dot_spacing;
        center_x - total_width as f32 / 2.0
    }
}
