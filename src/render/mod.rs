pub mod surface;
pub mod widget;

pub use surface::{DrawSurface, FontSpec, RasterSurface, SurfaceError};
pub use widget::render_widget;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use image::RgbaImage;

use crate::calendar::{MonthView, date_key};
use crate::habits::HabitLog;
use crate::layout::{CanvasSpec, LayoutPlan};
use crate::theme::ThemeColors;

/// Full render pass: compute the layout for the canvas and paint the widget
/// into a fresh RGBA image of exactly the canvas size.
pub fn render_to_image(
    canvas: CanvasSpec,
    month: &MonthView,
    log: &HabitLog,
    today: NaiveDate,
    city: &str,
    colors: &ThemeColors,
) -> Result<RgbaImage> {
    let today_day = month.contains(today).then(|| today.day());
    let plan = LayoutPlan::compute(canvas, month, today_day);
    let mut surface = RasterSurface::new(canvas.width, canvas.height, colors.background())?;
    render_widget(&mut surface, &plan, month, log, &date_key(today), city, colors);
    Ok(surface.into_image())
}
