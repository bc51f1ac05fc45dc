use std::io;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::calendar::date_key;
use crate::event::{AppEvent, EventHandler};
use crate::habits::{ALL_CATEGORIES, HabitRecord};
use crate::store::HabitStore;
use crate::theme::Theme;

/// Interactive toggle screen for today's three habits. Stays open for
/// repeated toggles until dismissed; every toggle is saved immediately.
struct ToggleMenu<'a> {
    record: HabitRecord,
    selected: usize,
    done: bool,
    theme: &'a Theme,
}

impl<'a> ToggleMenu<'a> {
    fn new(record: HabitRecord, theme: &'a Theme) -> Self {
        Self {
            record,
            selected: 0,
            done: false,
            theme,
        }
    }

    fn next(&mut self) {
        self.selected = (self.selected + 1) % ALL_CATEGORIES.len();
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = ALL_CATEGORIES.len() - 1;
        }
    }

    /// Returns true when the key flipped a habit flag.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.done = true;
                false
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.prev();
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                false
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.record.toggle(ALL_CATEGORIES[self.selected]);
                true
            }
            KeyCode::Char(ch @ '1'..='3') => {
                let index = ch as usize - '1' as usize;
                self.selected = index;
                self.record.toggle(ALL_CATEGORIES[index]);
                true
            }
            _ => false,
        }
    }
}

impl Widget for &ToggleMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        // Terminal default foreground; the widget palette assumes a white
        // canvas and is only used for the habit glyphs here
        let fg = Color::Reset;

        let block = Block::bordered()
            .title(" Today's Habits ")
            .border_style(Style::default().fg(fg));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(ALL_CATEGORIES.len() as u16 * 2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let hint = Paragraph::new(Line::from(Span::styled(
            "Toggle your completed habits for today",
            Style::default().fg(fg).add_modifier(Modifier::DIM),
        )))
        .alignment(Alignment::Center);
        hint.render(layout[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                ALL_CATEGORIES
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (i, category) in ALL_CATEGORIES.into_iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let glyph = if self.record.is_done(category) {
                "\u{2713}"
            } else {
                "\u{25cb}"
            };

            let line = Line::from(vec![
                Span::styled(
                    format!(" {indicator} "),
                    Style::default().fg(fg).add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format!("{glyph} "),
                    Style::default().fg(colors.habit_terminal(category)),
                ),
                Span::styled(
                    category.label().to_string(),
                    Style::default().fg(fg).add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
            ]);
            Paragraph::new(line).render(rows[i], buf);
        }

        let footer = Paragraph::new(Line::from(Span::styled(
            " [j/k] Move  [Enter] Toggle  [q] Done ",
            Style::default().fg(fg).add_modifier(Modifier::DIM),
        )));
        footer.render(layout[3], buf);
    }
}

pub fn run_toggle_menu(store: &HabitStore, theme: &Theme) -> Result<()> {
    let today_key = date_key(Local::now().date_naive());
    let mut log = store.load_habits();
    let mut menu = ToggleMenu::new(log.record_for(&today_key), theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let events = EventHandler::new(Duration::from_millis(100));

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| {
                let area = centered_rect(40, 12, frame.area());
                frame.render_widget(&menu, area);
            })?;

            match events.next()? {
                AppEvent::Key(key) => {
                    if menu.handle_key(key) {
                        log.upsert(today_key.clone(), menu.record);
                        if let Err(e) = store.save_habits(&log) {
                            log::warn!("failed to save habit log: {e}");
                        }
                    }
                    if menu.done {
                        return Ok(());
                    }
                }
                AppEvent::Tick => {}
            }
        }
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let left = area.x + (area.width - w) / 2;
    let top = area.y + (area.height - h) / 2;
    Rect::new(left, top, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::HabitCategory;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_wraps_both_directions() {
        let theme = Theme::default();
        let mut menu = ToggleMenu::new(HabitRecord::default(), &theme);
        assert_eq!(menu.selected, 0);
        menu.handle_key(press(KeyCode::Up));
        assert_eq!(menu.selected, 2);
        menu.handle_key(press(KeyCode::Down));
        assert_eq!(menu.selected, 0);
        menu.handle_key(press(KeyCode::Char('j')));
        menu.handle_key(press(KeyCode::Char('j')));
        menu.handle_key(press(KeyCode::Char('j')));
        assert_eq!(menu.selected, 0);
    }

    #[test]
    fn test_enter_toggles_selected_habit() {
        let theme = Theme::default();
        let mut menu = ToggleMenu::new(HabitRecord::default(), &theme);
        menu.handle_key(press(KeyCode::Down));
        let changed = menu.handle_key(press(KeyCode::Enter));
        assert!(changed);
        assert!(menu.record.is_done(HabitCategory::Intellectual));
        assert!(!menu.record.is_done(HabitCategory::Physical));

        let changed = menu.handle_key(press(KeyCode::Enter));
        assert!(changed);
        assert!(!menu.record.any());
    }

    #[test]
    fn test_number_keys_jump_and_toggle() {
        let theme = Theme::default();
        let mut menu = ToggleMenu::new(HabitRecord::default(), &theme);
        let changed = menu.handle_key(press(KeyCode::Char('3')));
        assert!(changed);
        assert_eq!(menu.selected, 2);
        assert!(menu.record.is_done(HabitCategory::Spiritual));
    }

    #[test]
    fn test_quit_keys_finish_without_toggling() {
        let theme = Theme::default();
        let mut menu = ToggleMenu::new(HabitRecord::default(), &theme);
        let changed = menu.handle_key(press(KeyCode::Char('q')));
        assert!(!changed);
        assert!(menu.done);
        assert!(!menu.record.any());

        let mut menu = ToggleMenu::new(HabitRecord::default(), &theme);
        menu.handle_key(press(KeyCode::Esc));
        assert!(menu.done);
    }
}
