use crate::application::{App, AppMode, DetailView};
use crate::domain::{format_date, format_period, Field, FilterField, Record};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

const ROW_NUMBER_WIDTH: u16 = 5;
const COLUMN_SPACING: u16 = 1;

/// Widths of the table columns: the seven sortable columns followed by the
/// registration period.
pub const COLUMN_WIDTHS: [u16; 8] = [26, 22, 14, 16, 7, 11, 14, 25];

const EXPECTED_FORMAT: &str = "Position, Company_Name, Job_Description, City, Province, Quota, Registered, Acceptance_Percentage, Registration_Start, Registration_End";

/// Screen regions of the dashboard. Rendering and mouse hit testing both
/// derive their geometry from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub filters: Rect,
    pub table: Rect,
    pub status: Rect,
}

/// What a click on the table landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    /// A sortable column header
    Header(Field),
    /// A body row, counted from the first visible row
    Row(usize),
}

impl DashboardLayout {
    pub fn compute(area: Rect, has_data: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(if has_data { 3 } else { 0 }),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        Self {
            header: chunks[0],
            filters: chunks[1],
            table: chunks[2],
            status: chunks[3],
        }
    }

    /// The table area inside its border.
    pub fn table_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.table)
    }

    /// Number of body rows that fit under the header row.
    pub fn table_body_rows(&self) -> usize {
        self.table_inner().height.saturating_sub(1) as usize
    }

    /// Screen columns of the table, solved the way `Table` lays them out so
    /// narrow terminals shrink them identically. The `#` column comes first
    /// when shown.
    pub fn column_areas(&self, show_row_numbers: bool) -> Vec<Rect> {
        let inner = self.table_inner();
        Layout::horizontal(column_constraints(show_row_numbers))
            .flex(Flex::Start)
            .spacing(COLUMN_SPACING)
            .split(Rect::new(inner.x, inner.y, inner.width, 1))
            .to_vec()
    }

    pub fn hit_table(&self, x: u16, y: u16, show_row_numbers: bool) -> Option<TableHit> {
        let inner = self.table_inner();
        if !inner.contains(Position::new(x, y)) {
            return None;
        }

        if y == inner.y {
            self.column_areas(show_row_numbers)
                .iter()
                .skip(usize::from(show_row_numbers))
                .position(|column| x >= column.x && x < column.x + column.width)
                .and_then(|index| Field::TABLE_COLUMNS.get(index).copied())
                .map(TableHit::Header)
        } else {
            Some(TableHit::Row((y - inner.y - 1) as usize))
        }
    }
}

fn column_constraints(show_row_numbers: bool) -> Vec<Constraint> {
    let mut widths = Vec::new();
    if show_row_numbers {
        widths.push(Constraint::Length(ROW_NUMBER_WIDTH));
    }
    widths.extend(COLUMN_WIDTHS.iter().map(|width| Constraint::Length(*width)));
    widths
}

/// The detail panel, centred over the dashboard.
pub fn detail_popup_area(area: Rect) -> Rect {
    Rect {
        x: area.x + area.width / 10,
        y: area.y + area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let layout = DashboardLayout::compute(f.area(), app.has_data());

    render_header(f, app, layout.header);
    if app.has_data() {
        render_filters(f, app, layout.filters);
        render_table(f, app, layout.table);
    } else {
        render_empty_state(f, app, layout.table);
    }
    render_status_bar(f, app, layout.status);

    if let DetailView::Open { record, .. } = &app.detail {
        render_detail_popup(f, record, app.detail_scroll);
    }

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(Span::styled(
        "Vacancy Analysis Dashboard",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));

    let mut summary = Vec::new();
    if let Some(dataset) = app.dataset.as_ref().filter(|dataset| !dataset.is_empty()) {
        summary.push(Span::raw(format!("Total Vacancies: {}", app.displayed.len())));
        if app.criteria.is_active() {
            summary.push(Span::styled(
                format!(" (filtered from {})", dataset.len()),
                Style::default().fg(Color::Green),
            ));
        }
        if let Some(source) = &dataset.source {
            summary.push(Span::styled(
                format!(" | {}", source.display()),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    if let Some(path) = &app.pending_path {
        summary.push(Span::styled(
            format!(" | Loading {}…", path.display()),
            Style::default().fg(Color::Yellow),
        ));
    }

    f.render_widget(Paragraph::new(vec![title, Line::from(summary)]), area);
}

fn render_filters(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, FilterField::ALL.len() as u32); 6])
        .split(area);

    let editing = matches!(app.mode, AppMode::Filtering);

    for (field, chunk) in FilterField::ALL.iter().zip(chunks.iter()) {
        let focused = editing && *field == app.filter_focus;
        let value = app.criteria.get(*field);

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else if !value.is_empty() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let content = if value.is_empty() && !focused {
            Paragraph::new(format!("Search {}...", field.label()))
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(value.to_string())
        };

        let input = content.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(field.label()),
        );
        f.render_widget(input, *chunk);

        if focused {
            let inner = Block::default().borders(Borders::ALL).inner(*chunk);
            let cursor_x = inner.x + (app.cursor_position as u16).min(inner.width.saturating_sub(1));
            f.set_cursor_position(Position::new(cursor_x, inner.y));
        }
    }
}

fn header_cell(app: &App, index: usize) -> Cell<'static> {
    let Some(field) = Field::TABLE_COLUMNS.get(index).copied() else {
        return Cell::from("Registration Period").style(Style::default().fg(Color::Yellow));
    };

    let label = if app.sort.key == field {
        format!("{} {}", field.label(), app.sort.direction.arrow())
    } else {
        field.label().to_string()
    };

    let style = if index == app.cursor_col {
        Style::default().bg(Color::LightBlue).fg(Color::Black)
    } else {
        Style::default().fg(Color::Yellow)
    };
    Cell::from(label).style(style)
}

fn record_cells(record: &Record) -> Vec<Cell<'static>> {
    let mut cells: Vec<Cell> = Field::TABLE_COLUMNS
        .iter()
        .map(|field| {
            let value = record.field_or_empty(*field);
            if *field == Field::AcceptancePercentage {
                Cell::from(format!("{}%", value)).style(Style::default().fg(Color::Green))
            } else {
                Cell::from(value.to_string())
            }
        })
        .collect();

    cells.push(Cell::from(format_period(
        record.field_or_empty(Field::RegistrationStart),
        record.field_or_empty(Field::RegistrationEnd),
    )));
    cells
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let visible_rows = area.height.saturating_sub(3) as usize;

    let mut headers = Vec::new();
    if app.show_row_numbers {
        headers.push(Cell::from("#").style(Style::default().fg(Color::Yellow)));
    }
    headers.extend((0..COLUMN_WIDTHS.len()).map(|index| header_cell(app, index)));
    let header_row = Row::new(headers).height(1);

    let end = (app.scroll_row + visible_rows).min(app.displayed.len());
    let rows: Vec<Row> = app.displayed[app.scroll_row.min(end)..end]
        .iter()
        .enumerate()
        .map(|(offset, record)| {
            let index = app.scroll_row + offset;
            let mut cells = Vec::new();
            if app.show_row_numbers {
                cells.push(Cell::from(format!("{}", index + 1)).style(Style::default().fg(Color::Yellow)));
            }
            cells.extend(record_cells(record));

            let style = if index == app.cursor_row {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let widths = column_constraints(app.show_row_numbers);

    let title = if app.displayed.is_empty() {
        "Vacancies (no matches)".to_string()
    } else {
        format!("Vacancies ({}-{} of {})", app.scroll_row + 1, end, app.displayed.len())
    };

    let table = Table::new(rows, widths)
        .header(header_row)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start);

    f.render_widget(table, area);
}

fn render_empty_state(f: &mut Frame, app: &App, area: Rect) {
    let heading = if app.is_loading() { "Loading..." } else { "No Data Available" };
    let lines = vec![
        Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Press o to open a CSV file with vacancy data to get started."),
        Line::from(""),
        Line::from(Span::styled(
            format!("Expected format: {}", EXPECTED_FORMAT),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let empty = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(empty, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = if app.detail.is_open() {
        "Esc/q/x: close | y: copy as JSON | ↑↓: scroll | click outside to dismiss".to_string()
    } else {
        match app.mode {
            AppMode::Normal => {
                if let Some(ref status) = app.status_message {
                    status.clone()
                } else if app.has_data() {
                    "Enter: details | 1-7 or s: sort | /: filter | c: clear filters | o: open | ?: help | q: quit".to_string()
                } else {
                    "o: open CSV | ?: help | q: quit".to_string()
                }
            }
            AppMode::Filtering => format!(
                "Filter {}: Tab/Shift+Tab switch field | Enter/Esc done",
                app.filter_focus.label()
            ),
            AppMode::OpenFile => format!("Open CSV: {} (Enter to open, Esc to cancel)", app.filename_input),
            AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        }
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Filtering => Style::default().fg(Color::Green),
            AppMode::OpenFile => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);

    if matches!(app.mode, AppMode::OpenFile) {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let prefix = "Open CSV: ".chars().count() as u16;
        let x = inner.x + (prefix + app.cursor_position as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

/// Lines shown in the detail panel, description included verbatim.
pub fn detail_lines(record: &Record) -> Vec<Line<'static>> {
    let label = |text: &str| Span::styled(format!("{text}: "), Style::default().add_modifier(Modifier::BOLD));
    let value = |field: Field| record.field_or_empty(field).to_string();

    let mut lines = vec![
        Line::from(vec![label("Company"), Span::raw(value(Field::CompanyName))]),
        Line::from(vec![
            label("Location"),
            Span::raw(format!("{}, {}", value(Field::City), value(Field::Province))),
        ]),
        Line::from(vec![label("Quota"), Span::raw(format!("{} positions", value(Field::Quota)))]),
        Line::from(vec![
            label("Registered"),
            Span::raw(format!("{} applicants", value(Field::Registered))),
        ]),
        Line::from(vec![
            label("Acceptance Rate"),
            Span::styled(
                format!("{}%", value(Field::AcceptancePercentage)),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            label("Registration Period"),
            Span::raw(format!(
                "{} - {}",
                format_date(record.field_or_empty(Field::RegistrationStart)),
                format_date(record.field_or_empty(Field::RegistrationEnd))
            )),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Job Description",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(value(Field::JobDescription).lines().map(|line| Line::from(line.to_string())));

    let extras: Vec<(&str, &str)> = record.extras().collect();
    if !extras.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Other fields",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (name, extra) in extras {
            lines.push(Line::from(vec![label(name), Span::raw(extra.to_string())]));
        }
    }
    lines
}

fn render_detail_popup(f: &mut Frame, record: &Record, scroll: usize) {
    let popup_area = detail_popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let title = format!(" {} ", record.field_or_empty(Field::Position));
    let detail = Paragraph::new(detail_lines(record))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(" × close ").right_aligned())
                .style(Style::default().fg(Color::White)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    f.render_widget(detail, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Vacancy Dashboard Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    format!(
        r#"VACANCY ANALYSIS DASHBOARD

=== LOADING DATA ===
o / Ctrl+O      Open a CSV file (path prompt)
r               Reload the current file
                Only files ending in .csv are read; other files are ignored
                Expected columns:
                {EXPECTED_FORMAT}

=== TABLE ===
↑↓ or j/k       Move the cursor
PgUp/PgDn       Move ten rows
Home/End        First / last row
Enter           Show full details of the highlighted vacancy
Mouse click     Click a row for details, a header to sort

=== SORTING ===
1-7             Sort by Position, Company, City, Province, Quota,
                Registered, Acceptance %
←→ or h/l       Move the column cursor
s               Sort by the column under the column cursor
                Sorting the active column again flips the direction;
                a new column starts ascending
                Non-numeric Quota/Registered/Acceptance values count as 0

=== FILTERING ===
/ or f          Edit filters (all must match)
Tab/Shift+Tab   Next / previous filter input
Enter/Esc       Leave the filter bar
c               Clear every filter
                Text filters ignore case; Min Acceptance % is inclusive

=== DETAILS ===
Esc/q/x         Close the detail panel
Click outside   Close the detail panel
y               Copy the vacancy to the clipboard as JSON
↑↓ or j/k       Scroll a long description

=== GENERAL ===
F1 or ?         Show this help (scroll with ↑↓, PgUp/PgDn, Home)
q               Quit"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dataset;
    use ratatui::{backend::TestBackend, Terminal};

    fn vacancy(position: &str, acceptance: &str) -> Record {
        Record::from_pairs([
            ("Position", position),
            ("Company_Name", "PT Nusantara"),
            ("Job_Description", "Line one\nLine two"),
            ("City", "Bandung"),
            ("Province", "Jawa Barat"),
            ("Quota", "3"),
            ("Registered", "120"),
            ("Acceptance_Percentage", acceptance),
            ("Registration_Start", "2024-01-01"),
            ("Registration_End", "later"),
        ])
    }

    fn loaded_app() -> App {
        let mut app = App::default();
        let headers = Field::ALL.iter().map(|f| f.name().to_string()).collect();
        app.set_dataset(Dataset::new(headers, vec![vacancy("Welder", "40"), vacancy("Clerk", "80")]));
        app
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            text.push_str(cell.symbol());
            if (i + 1) % width as usize == 0 {
                text.push('\n');
            }
        }
        text
    }

    #[test]
    fn test_layout_without_data_hides_filters() {
        let layout = DashboardLayout::compute(Rect::new(0, 0, 100, 30), false);
        assert_eq!(layout.filters.height, 0);
        assert_eq!(layout.table.y, 2);
        assert_eq!(layout.status.height, 3);
    }

    #[test]
    fn test_table_body_rows() {
        let layout = DashboardLayout::compute(Rect::new(0, 0, 100, 30), true);
        // 30 - header 2 - filters 3 - status 3 = 22 table lines, minus borders and header row
        assert_eq!(layout.table_body_rows(), 19);
    }

    #[test]
    fn test_hit_table_header_and_rows() {
        let layout = DashboardLayout::compute(Rect::new(0, 0, 200, 30), true);
        let inner = layout.table_inner();

        assert_eq!(layout.hit_table(inner.x, inner.y, false), Some(TableHit::Header(Field::Position)));
        assert_eq!(layout.hit_table(inner.x + 27, inner.y, false), Some(TableHit::Header(Field::CompanyName)));
        assert_eq!(layout.hit_table(inner.x + 26, inner.y, false), None);
        assert_eq!(layout.hit_table(inner.x + 5, inner.y, true), None);
        assert_eq!(layout.hit_table(inner.x + 6, inner.y, true), Some(TableHit::Header(Field::Position)));
        assert_eq!(layout.hit_table(inner.x + 3, inner.y + 3, false), Some(TableHit::Row(2)));
        assert_eq!(layout.hit_table(0, 0, false), None);
    }

    /// The rendered header row of the table as one char per cell.
    fn rendered_header_row(app: &App, width: u16, height: u16) -> (DashboardLayout, String) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let layout = DashboardLayout::compute(Rect::new(0, 0, width, height), true);
        let inner = layout.table_inner();
        let buffer = terminal.backend().buffer();
        let row = (0..width)
            .map(|x| {
                buffer
                    .cell((x, inner.y))
                    .and_then(|cell| cell.symbol().chars().next())
                    .unwrap_or(' ')
            })
            .collect();
        (layout, row)
    }

    fn assert_header_clicks(app: &App, width: u16) {
        let (layout, row) = rendered_header_row(app, width, 30);
        let y = layout.table_inner().y;
        for field in [Field::Position, Field::CompanyName, Field::City, Field::Province, Field::Quota] {
            let byte = row
                .find(field.label())
                .unwrap_or_else(|| panic!("{} label missing from {row:?}", field.label()));
            let x = row[..byte].chars().count() as u16;
            assert_eq!(
                layout.hit_table(x, y, app.show_row_numbers),
                Some(TableHit::Header(field)),
                "label {} at x={x} on a {width} column terminal",
                field.label()
            );
            let last = x + field.label().len() as u16 - 1;
            assert_eq!(layout.hit_table(last, y, app.show_row_numbers), Some(TableHit::Header(field)));
        }
    }

    #[test]
    fn test_header_clicks_match_rendered_labels_on_narrow_terminals() {
        let app = loaded_app();
        for width in [100, 120] {
            assert_header_clicks(&app, width);
        }
    }

    #[test]
    fn test_header_clicks_with_row_numbers_on_narrow_terminal() {
        let mut app = loaded_app();
        app.show_row_numbers = true;
        assert_header_clicks(&app, 100);
    }

    #[test]
    fn test_column_areas_fit_inside_table() {
        let layout = DashboardLayout::compute(Rect::new(0, 0, 100, 30), true);
        let inner = layout.table_inner();
        let columns = layout.column_areas(false);
        assert_eq!(columns.len(), COLUMN_WIDTHS.len());
        assert!(columns.iter().all(|c| c.x + c.width <= inner.x + inner.width));
    }

    #[test]
    fn test_registration_period_header_is_not_sortable() {
        let layout = DashboardLayout::compute(Rect::new(0, 0, 200, 30), true);
        let inner = layout.table_inner();
        let period_x: u16 = COLUMN_WIDTHS[..7].iter().map(|w| w + COLUMN_SPACING).sum();
        assert_eq!(layout.hit_table(inner.x + period_x, inner.y, false), None);
    }

    #[test]
    fn test_detail_popup_is_inside_screen() {
        let area = Rect::new(0, 0, 120, 40);
        let popup = detail_popup_area(area);
        assert_eq!(popup, Rect::new(12, 4, 96, 32));
        assert!(!popup.contains(Position::new(0, 0)));
    }

    #[test]
    fn test_detail_lines_include_description_verbatim() {
        let lines: Vec<String> = detail_lines(&vacancy("Clerk", "80"))
            .iter()
            .map(|line| line.to_string())
            .collect();

        assert!(lines.contains(&"Line one".to_string()));
        assert!(lines.contains(&"Line two".to_string()));
        assert!(lines.contains(&"Location: Bandung, Jawa Barat".to_string()));
        assert!(lines.contains(&"Registration Period: 1/1/2024 - Invalid Date".to_string()));
        assert!(!lines.iter().any(|line| line == "Other fields"));
    }

    #[test]
    fn test_detail_lines_list_extra_columns() {
        let mut record = vacancy("Clerk", "80");
        record.insert("Contact", "hr@example.com");
        let lines: Vec<String> = detail_lines(&record).iter().map(|l| l.to_string()).collect();
        assert!(lines.contains(&"Contact: hr@example.com".to_string()));
    }

    #[test]
    fn test_render_empty_state() {
        let text = screen_text(&App::default(), 120, 20);
        assert!(text.contains("No Data Available"));
        assert!(!text.contains("Total Vacancies"));
    }

    #[test]
    fn test_render_table_with_sort_marker() {
        let text = screen_text(&loaded_app(), 200, 20);
        assert!(text.contains("Total Vacancies: 2"));
        assert!(text.contains("Acceptance % ↓"));
        assert!(text.contains("80%"));

        let clerk = text.find("Clerk").unwrap();
        let welder = text.find("Welder").unwrap();
        assert!(clerk < welder);
    }

    #[test]
    fn test_header_marks_active_filters() {
        let mut app = loaded_app();
        let text = screen_text(&app, 200, 20);
        assert!(!text.contains("filtered from"));

        app.set_filter(FilterField::Position, "weld");
        let text = screen_text(&app, 200, 20);
        assert!(text.contains("Total Vacancies: 1 (filtered from 2)"));
    }

    #[test]
    fn test_header_only_dataset_shows_empty_state() {
        let mut app = App::default();
        let headers = Field::ALL.iter().map(|f| f.name().to_string()).collect();
        app.set_dataset(Dataset::new(headers, Vec::new()));
        let text = screen_text(&app, 120, 20);
        assert!(text.contains("No Data Available"));
        assert!(!text.contains("Search Position"));
        assert!(!text.contains("Total Vacancies"));
    }

    #[test]
    fn test_render_detail_overlay() {
        let mut app = loaded_app();
        app.select_displayed(1);
        let text = screen_text(&app, 160, 40);
        assert!(text.contains(" Welder "));
        assert!(text.contains("Job Description"));
    }
}
