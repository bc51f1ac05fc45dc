use crate::calendar::{MonthView, WEEKDAY_LABELS};
use crate::habits::{ALL_CATEGORIES, HabitLog};
use crate::layout::{LayoutPlan, Rect};
use crate::render::surface::{DrawSurface, FontSpec};
use crate::theme::ThemeColors;

/// Paint the whole widget onto `surface` following a precomputed plan.
/// `today_key` selects the record shown in the wins section; it is today's
/// date even when the displayed month is a different one.
pub fn render_widget<S: DrawSurface>(
    surface: &mut S,
    plan: &LayoutPlan,
    month: &MonthView,
    log: &HabitLog,
    today_key: &str,
    city: &str,
    colors: &ThemeColors,
) {
    let text_primary = colors.text_primary();
    let text_secondary = colors.text_secondary();

    // Header: month + year left, city right
    let title = format!("{} {}", month.name(), month.year);
    surface.draw_text(
        plan.header_pos.0,
        plan.header_pos.1,
        &title,
        FontSpec::bold(plan.header_font),
        text_primary,
    );
    surface.draw_text_right(
        plan.city_box,
        city,
        FontSpec::regular(plan.city_font),
        text_secondary,
    );

    // Weekday labels, centered per column
    let weekday_font = FontSpec::regular(plan.weekday_font);
    for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
        let width = surface.text_width(label, weekday_font);
        let x = (plan.column_centers[i] - width / 2.0).round() as i32;
        surface.draw_text(x, plan.weekday_y, label, weekday_font, text_secondary);
    }

    // Day grid
    let day_font = FontSpec::regular(plan.day_font);
    for cell in &plan.day_cells {
        if let Some((day, rect)) = plan.today_highlight {
            if day == cell.day {
                surface.fill_ellipse(rect, colors.highlight());
            }
        }

        let number = cell.day.to_string();
        let width = surface.text_width(&number, day_font);
        let x = (cell.center_x - width / 2.0).round() as i32;
        surface.draw_text(x, cell.y, &number, day_font, text_primary);

        if let Some(record) = log.get(&month.day_key(cell.day)) {
            let active = record.active_categories();
            if !active.is_empty() {
                let mut dot_x = plan.dot_row_start(cell.center_x, active.len() as u32);
                for category in active {
                    surface.fill_ellipse(
                        Rect::new(
                            dot_x.round() as i32,
                            cell.dot_y,
                            plan.dot_size,
                            plan.dot_size,
                        ),
                        colors.habit(category),
                    );
                    dot_x += (plan.dot_size + plan.dot_spacing) as f32;
                }
            }
        }
    }

    // Divider
    surface.fill_rect(plan.divider, colors.divider());

    // Wins section
    surface.draw_text(
        plan.wins_label_pos.0,
        plan.wins_label_pos.1,
        "Today's Wins",
        FontSpec::bold(plan.wins_font),
        text_primary,
    );

    let today_record = log.record_for(today_key);
    let check_font = FontSpec::bold(plan.check_font);
    let label_font = FontSpec::regular(plan.label_font);
    for (slot, category) in plan.indicators.iter().zip(ALL_CATEGORIES) {
        let color = colors.habit(category);
        surface.fill_ellipse(slot.circle, color);

        if today_record.is_done(category) {
            let width = surface.text_width("\u{2713}", check_font);
            let x = (slot.circle.center_x() as f32 - width / 2.0).round() as i32;
            surface.draw_text(
                x,
                slot.circle.y + plan.check_inset_y,
                "\u{2713}",
                check_font,
                colors.background(),
            );
        } else {
            // No stroked-ellipse primitive: overpaint an inset background
            // circle to leave a colored ring
            surface.fill_ellipse(slot.circle.inset(plan.indicator_stroke), colors.background());
        }

        let label = category.label();
        let width = surface.text_width(label, label_font);
        let x = (slot.circle.center_x() as f32 - width / 2.0).round() as i32;
        surface.draw_text(x, slot.label_y, label, label_font, text_primary);
    }
}
