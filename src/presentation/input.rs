use crate::application::{App, AppMode};
use crate::domain::Field;
use crate::infrastructure::{CsvLoader, LoadRequest};
use crate::presentation::ui::{detail_popup_area, DashboardLayout, TableHit};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

const PAGE_ROWS: usize = 10;
const WHEEL_ROWS: usize = 3;

fn byte_at(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map(|(i, _)| i).unwrap_or(s.len())
}

/// Applies one editing key to a single-line buffer.
///
/// `cursor` counts characters, not bytes.
///
/// # Returns
///
/// `true` when the buffer text changed
fn edit_line(buffer: &mut String, cursor: &mut usize, key: KeyCode) -> bool {
    let len = buffer.chars().count();
    *cursor = (*cursor).min(len);

    match key {
        KeyCode::Backspace => {
            if *cursor > 0 {
                let at = byte_at(buffer.as_str(), *cursor - 1);
                buffer.remove(at);
                *cursor -= 1;
                return true;
            }
        }
        KeyCode::Delete => {
            if *cursor < len {
                let at = byte_at(buffer.as_str(), *cursor);
                buffer.remove(at);
                return true;
            }
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            if *cursor < len {
                *cursor += 1;
            }
        }
        KeyCode::Home => {
            *cursor = 0;
        }
        KeyCode::End => {
            *cursor = len;
        }
        KeyCode::Char(c) => {
            let at = byte_at(buffer.as_str(), *cursor);
            buffer.insert(at, c);
            *cursor += 1;
            return true;
        }
        _ => {}
    }
    false
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, loader: &CsvLoader, key: KeyCode, modifiers: KeyModifiers) {
        if app.detail.is_open() {
            Self::handle_detail_keys(app, key);
            return;
        }

        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, loader, key, modifiers),
            AppMode::Filtering => Self::handle_filtering_mode(app, key),
            AppMode::OpenFile => Self::handle_open_file_mode(app, loader, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn submit(loader: &CsvLoader, request: Option<LoadRequest>) {
        if let Some(request) = request {
            loader.submit(request);
        }
    }

    fn handle_normal_mode(app: &mut App, loader: &CsvLoader, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('o') => app.start_open_file(),
                KeyCode::Char('c') => app.quit(),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(1),
            KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(1),
            KeyCode::PageUp => app.move_cursor_up(PAGE_ROWS),
            KeyCode::PageDown => app.move_cursor_down(PAGE_ROWS),
            KeyCode::Home | KeyCode::Char('g') => app.move_cursor_to_start(),
            KeyCode::End | KeyCode::Char('G') => app.move_cursor_to_end(),
            KeyCode::Left | KeyCode::Char('h') => app.move_column_left(),
            KeyCode::Right | KeyCode::Char('l') => app.move_column_right(),
            KeyCode::Enter => {
                app.open_detail_at_cursor();
            }
            KeyCode::Char('s') if app.has_data() => app.toggle_sort_at_cursor(),
            KeyCode::Char(c @ '1'..='7') if app.has_data() => {
                let index = c as usize - '1' as usize;
                if let Some(field) = Field::TABLE_COLUMNS.get(index).copied() {
                    app.toggle_sort(field);
                }
            }
            KeyCode::Char('/') | KeyCode::Char('f') if app.has_data() => app.start_filtering(),
            KeyCode::Char('c') if app.has_data() => app.clear_filters(),
            KeyCode::Char('o') => app.start_open_file(),
            KeyCode::Char('r') => {
                let source = app.dataset.as_ref().and_then(|dataset| dataset.source.clone());
                if let Some(path) = source {
                    let request = app.begin_load(path);
                    Self::submit(loader, request);
                }
            }
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            _ => {}
        }
    }

    fn handle_detail_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') => app.close_detail(),
            KeyCode::Char('y') => app.copy_selected_record(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_detail(-1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_detail(1),
            KeyCode::PageUp => app.scroll_detail(-(PAGE_ROWS as isize)),
            KeyCode::PageDown => app.scroll_detail(PAGE_ROWS as isize),
            KeyCode::Home => app.detail_scroll = 0,
            _ => {}
        }
    }

    fn handle_filtering_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => app.finish_filtering(),
            KeyCode::Tab => app.next_filter_field(),
            KeyCode::BackTab => app.previous_filter_field(),
            KeyCode::Up => app.move_cursor_up(1),
            KeyCode::Down => app.move_cursor_down(1),
            _ => {
                let field = app.filter_focus;
                let mut value = app.criteria.get(field).to_string();
                let mut cursor = app.cursor_position;
                if edit_line(&mut value, &mut cursor, key) {
                    app.set_filter(field, value);
                }
                app.cursor_position = cursor;
            }
        }
    }

    fn handle_open_file_mode(app: &mut App, loader: &CsvLoader, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let request = app.submit_open_file();
                Self::submit(loader, request);
            }
            KeyCode::Esc => app.cancel_open_file(),
            _ => {
                let mut cursor = app.cursor_position;
                edit_line(&mut app.filename_input, &mut cursor, key);
                app.cursor_position = cursor;
            }
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    /// Routes a mouse event. `area` is the full terminal area the UI was
    /// last drawn into.
    pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, area: Rect) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Self::handle_click(app, mouse.column, mouse.row, area),
            MouseEventKind::ScrollDown => {
                if app.detail.is_open() {
                    app.scroll_detail(WHEEL_ROWS as isize);
                } else {
                    app.move_cursor_down(WHEEL_ROWS);
                }
            }
            MouseEventKind::ScrollUp => {
                if app.detail.is_open() {
                    app.scroll_detail(-(WHEEL_ROWS as isize));
                } else {
                    app.move_cursor_up(WHEEL_ROWS);
                }
            }
            _ => {}
        }
    }

    fn handle_click(app: &mut App, x: u16, y: u16, area: Rect) {
        if app.detail.is_open() {
            if detail_popup_area(area).contains(Position::new(x, y)) {
                app.click_detail_panel();
            } else {
                app.dismiss_overlay();
            }
            return;
        }

        if !matches!(app.mode, AppMode::Normal | AppMode::Filtering) || !app.has_data() {
            return;
        }

        let layout = DashboardLayout::compute(area, true);
        match layout.hit_table(x, y, app.show_row_numbers) {
            Some(TableHit::Header(field)) => app.toggle_sort(field),
            Some(TableHit::Row(offset)) => {
                app.select_displayed(app.scroll_row + offset);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::DetailView;
    use crate::domain::{Dataset, FilterField, Record, SortDirection};
    use crossterm::event::KeyModifiers;

    fn vacancy(position: &str, acceptance: &str) -> Record {
        Record::from_pairs([
            ("Position", position),
            ("Company_Name", "PT Nusantara"),
            ("Job_Description", "Operate the line"),
            ("City", "Bandung"),
            ("Province", "Jawa Barat"),
            ("Acceptance_Percentage", acceptance),
        ])
    }

    fn loaded_app() -> App {
        let mut app = App::default();
        let headers = Field::ALL.iter().map(|f| f.name().to_string()).collect();
        app.set_dataset(Dataset::new(
            headers,
            vec![vacancy("Software Engineer", "50"), vacancy("Data Analyst", "75")],
        ));
        app
    }

    fn press(app: &mut App, loader: &CsvLoader, key: KeyCode) {
        InputHandler::handle_key_event(app, loader, key, KeyModifiers::NONE);
    }

    fn click(app: &mut App, x: u16, y: u16, area: Rect) {
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        };
        InputHandler::handle_mouse_event(app, event, area);
    }

    #[test]
    fn test_edit_line_handles_multibyte_text() {
        let mut buffer = "Café".to_string();
        let mut cursor = 4;

        assert!(edit_line(&mut buffer, &mut cursor, KeyCode::Backspace));
        assert_eq!(buffer, "Caf");
        assert!(edit_line(&mut buffer, &mut cursor, KeyCode::Char('é')));
        assert_eq!(buffer, "Café");

        edit_line(&mut buffer, &mut cursor, KeyCode::Home);
        assert!(edit_line(&mut buffer, &mut cursor, KeyCode::Delete));
        assert_eq!(buffer, "afé");
        assert!(!edit_line(&mut buffer, &mut cursor, KeyCode::Left));
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_typing_in_filter_bar_narrows_table() {
        let loader = CsvLoader::new();
        let mut app = loaded_app();

        press(&mut app, &loader, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Filtering);
        for c in "ENG".chars() {
            press(&mut app, &loader, KeyCode::Char(c));
        }
        assert_eq!(app.criteria.position, "ENG");
        assert_eq!(app.displayed.len(), 1);

        press(&mut app, &loader, KeyCode::Backspace);
        press(&mut app, &loader, KeyCode::Backspace);
        press(&mut app, &loader, KeyCode::Backspace);
        assert_eq!(app.displayed.len(), 2);

        press(&mut app, &loader, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_tab_moves_to_threshold_filter() {
        let loader = CsvLoader::new();
        let mut app = loaded_app();
        press(&mut app, &loader, KeyCode::Char('f'));
        press(&mut app, &loader, KeyCode::BackTab);
        assert_eq!(app.filter_focus, FilterField::MinAcceptance);

        press(&mut app, &loader, KeyCode::Char('6'));
        press(&mut app, &loader, KeyCode::Char('0'));
        assert_eq!(app.criteria.min_acceptance, "60");
        assert_eq!(app.displayed.len(), 1);
    }

    #[test]
    fn test_number_keys_toggle_sort() {
        let loader = CsvLoader::new();
        let mut app = loaded_app();

        press(&mut app, &loader, KeyCode::Char('1'));
        assert_eq!(app.sort.key, Field::Position);
        assert_eq!(app.sort.direction, SortDirection::Ascending);
        assert_eq!(app.displayed[0].field(Field::Position), Some("Data Analyst"));

        press(&mut app, &loader, KeyCode::Char('1'));
        assert_eq!(app.sort.direction, SortDirection::Descending);
        assert_eq!(app.displayed[0].field(Field::Position), Some("Software Engineer"));
    }

    #[test]
    fn test_enter_opens_and_escape_closes_detail() {
        let loader = CsvLoader::new();
        let mut app = loaded_app();

        press(&mut app, &loader, KeyCode::Enter);
        assert!(app.detail.is_open());

        // q closes the detail instead of quitting
        press(&mut app, &loader, KeyCode::Char('q'));
        assert_eq!(app.detail, DetailView::Closed);
        assert!(!app.should_quit);

        press(&mut app, &loader, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_click_row_then_panel_then_backdrop() {
        let mut app = loaded_app();
        let area = Rect::new(0, 0, 200, 40);
        let inner = DashboardLayout::compute(area, true).table_inner();

        click(&mut app, inner.x + 2, inner.y + 2, area);
        let record = app.detail.record().cloned().expect("row click opens detail");
        assert_eq!(record.field(Field::Position), Some("Software Engineer"));
        assert_eq!(record.field(Field::JobDescription), Some("Operate the line"));

        let panel = detail_popup_area(area);
        click(&mut app, panel.x + 3, panel.y + 3, area);
        assert!(app.detail.is_open());

        click(&mut app, 0, 0, area);
        assert_eq!(app.detail, DetailView::Closed);
    }

    #[test]
    fn test_click_header_sorts() {
        let mut app = loaded_app();
        let area = Rect::new(0, 0, 200, 40);
        let inner = DashboardLayout::compute(area, true).table_inner();

        click(&mut app, inner.x + 30, inner.y, area);
        assert_eq!(app.sort.key, Field::CompanyName);
        assert_eq!(app.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_click_header_on_narrow_terminal_sorts_that_column() {
        let mut app = loaded_app();
        let area = Rect::new(0, 0, 100, 30);
        let layout = DashboardLayout::compute(area, true);
        let columns = layout.column_areas(false);

        let city = columns[2];
        click(&mut app, city.x, city.y, area);
        assert_eq!(app.sort.key, Field::City);

        let quota = columns[4];
        click(&mut app, quota.x + quota.width - 1, quota.y, area);
        assert_eq!(app.sort.key, Field::Quota);
    }

    #[test]
    fn test_click_below_last_row_does_nothing() {
        let mut app = loaded_app();
        let area = Rect::new(0, 0, 200, 40);
        let inner = DashboardLayout::compute(area, true).table_inner();

        click(&mut app, inner.x + 2, inner.y + 10, area);
        assert_eq!(app.detail, DetailView::Closed);
    }

    #[test]
    fn test_open_non_csv_from_prompt_is_silent() {
        let loader = CsvLoader::new();
        let mut app = loaded_app();

        InputHandler::handle_key_event(&mut app, &loader, KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert_eq!(app.mode, AppMode::OpenFile);

        app.filename_input.clear();
        app.cursor_position = 0;
        for c in "notes.txt".chars() {
            press(&mut app, &loader, KeyCode::Char(c));
        }
        press(&mut app, &loader, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Normal);
        assert!(!app.is_loading());
        assert!(app.status_message.is_none());
        assert_eq!(app.displayed.len(), 2);
    }

    #[test]
    fn test_help_mode() {
        let loader = CsvLoader::new();
        let mut app = App::default();
        press(&mut app, &loader, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, &loader, KeyCode::Down);
        assert_eq!(app.help_scroll, 1);
        press(&mut app, &loader, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }
}
