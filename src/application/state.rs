//! Application state management for the vacancy dashboard.
//!
//! Raw inputs (the ingested dataset, the filter criteria and the sort
//! directive) are the only state that is ever edited. The displayed sequence
//! is derived from them and recomputed wholesale whenever one changes.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::domain::{
    filter_records, sort_records, Dataset, Field, FilterCriteria, FilterField, Record,
    SortDirective,
};
use crate::infrastructure::{copy_record, is_csv_path, Config, LoadOutcome, LoadRequest};

/// Represents the current mode of the application.
///
/// The mode decides how keyboard input is interpreted. The detail view is
/// tracked separately in [`DetailView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Table navigation - arrow keys move the cursor, shortcuts available
    Normal,
    /// The filter bar has focus and keystrokes edit the focused input
    Filtering,
    /// Prompt for the path of a CSV file to open
    OpenFile,
    /// Help screen is displayed
    Help,
}

/// The modal detail overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    /// No record selected
    Closed,
    /// One record from the displayed sequence is shown in full
    Open {
        /// Position of the record in the displayed sequence when it was chosen
        index: usize,
        record: Record,
    },
}

impl DetailView {
    pub fn is_open(&self) -> bool {
        matches!(self, DetailView::Open { .. })
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            DetailView::Open { record, .. } => Some(record),
            DetailView::Closed => None,
        }
    }
}

/// Main application state containing the data pipeline and UI state.
///
/// # Examples
///
/// ```
/// use vacancy_dash::application::App;
///
/// let mut app = App::default();
/// assert!(app.begin_load("notes.txt").is_none());
///
/// let request = app.begin_load("vacancies.csv").unwrap();
/// assert_eq!(app.pending_load, Some(request.ticket));
/// ```
#[derive(Debug)]
pub struct App {
    /// The most recently ingested data, if any
    pub dataset: Option<Dataset>,
    /// Active filter inputs
    pub criteria: FilterCriteria,
    /// Active sort column and direction
    pub sort: SortDirective,
    /// Filtered and sorted records shown in the table
    pub displayed: Vec<Record>,
    /// Detail overlay state
    pub detail: DetailView,
    /// Current application mode
    pub mode: AppMode,
    /// Highlighted row in the displayed sequence
    pub cursor_row: usize,
    /// Highlighted column, an index into [`Field::TABLE_COLUMNS`]
    pub cursor_col: usize,
    /// First displayed row visible in the viewport
    pub scroll_row: usize,
    /// Number of table rows that fit in the viewport
    pub viewport_rows: usize,
    /// Filter input that receives keystrokes in filtering mode
    pub filter_focus: FilterField,
    /// Cursor position (in characters) within the edited input
    pub cursor_position: usize,
    /// Input buffer for the open-file prompt
    pub filename_input: String,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Scroll position in the detail overlay
    pub detail_scroll: usize,
    /// Prefix table rows with their position
    pub show_row_numbers: bool,
    /// Ticket of the load whose completion will be applied
    pub pending_load: Option<u64>,
    /// Path of the pending load
    pub pending_path: Option<PathBuf>,
    /// Set when the user asked to leave
    pub should_quit: bool,
    next_ticket: u64,
}

impl Default for App {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            sort: SortDirective::default(),
            displayed: Vec::new(),
            detail: DetailView::Closed,
            mode: AppMode::Normal,
            cursor_row: 0,
            cursor_col: 0,
            scroll_row: 0,
            viewport_rows: 20,
            filter_focus: FilterField::Position,
            cursor_position: 0,
            filename_input: String::new(),
            status_message: None,
            help_scroll: 0,
            detail_scroll: 0,
            show_row_numbers: false,
            pending_load: None,
            pending_path: None,
            should_quit: false,
            next_ticket: 0,
        }
    }
}

impl App {
    pub fn with_config(config: &Config) -> Self {
        Self {
            sort: config.sort_directive(),
            show_row_numbers: config.display.show_row_numbers,
            ..Self::default()
        }
    }

    /// Whether a loaded file produced at least one record. Empty files keep
    /// the empty-state screen.
    pub fn has_data(&self) -> bool {
        self.dataset.as_ref().is_some_and(|dataset| !dataset.is_empty())
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Recomputes the displayed sequence from the dataset, criteria and sort.
    pub fn refresh_view(&mut self) {
        let records = self
            .dataset
            .as_ref()
            .map(|dataset| dataset.records.as_slice())
            .unwrap_or(&[]);
        let filtered = filter_records(records, &self.criteria);
        self.displayed = sort_records(filtered, &self.sort);

        debug!(
            total = records.len(),
            displayed = self.displayed.len(),
            sort = self.sort.key.name(),
            "recomputed displayed records"
        );

        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        if self.displayed.is_empty() {
            self.cursor_row = 0;
        } else if self.cursor_row >= self.displayed.len() {
            self.cursor_row = self.displayed.len() - 1;
        }
        self.ensure_cursor_visible();
    }

    /// Replaces the record set. Filters and sort are kept; the cursor and
    /// any open detail view are reset.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.detail = DetailView::Closed;
        self.detail_scroll = 0;
        self.cursor_row = 0;
        self.scroll_row = 0;
        if !self.has_data() && self.mode == AppMode::Filtering {
            self.finish_filtering();
        }
        self.refresh_view();
    }

    /// Starts ingesting `path`.
    ///
    /// Files that are not CSV are ignored without any message. Otherwise a
    /// fresh ticket is issued and becomes the only one whose completion
    /// [`App::finish_load`] will accept.
    ///
    /// # Returns
    ///
    /// The request to hand to a loader, or `None` when the file was ignored
    pub fn begin_load(&mut self, path: impl Into<PathBuf>) -> Option<LoadRequest> {
        let path = path.into();
        if !is_csv_path(&path) {
            debug!(path = %path.display(), "ignoring file that is not CSV");
            return None;
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        if let Some(stale) = self.pending_load.replace(ticket) {
            debug!(stale, ticket, "superseding in-flight load");
        }
        self.pending_path = Some(path.clone());
        info!(ticket, path = %path.display(), "loading CSV");
        Some(LoadRequest { ticket, path })
    }

    /// Applies a finished load if it belongs to the most recent request.
    pub fn finish_load(&mut self, outcome: LoadOutcome) {
        if self.pending_load != Some(outcome.ticket) {
            debug!(ticket = outcome.ticket, "discarding stale CSV load");
            return;
        }
        self.pending_load = None;
        self.pending_path = None;

        match outcome.result {
            Ok(dataset) => {
                let rows = dataset.len();
                let coerced = dataset.rows_with_unparsed_numbers();
                let missing = dataset.missing_fields();
                if !missing.is_empty() {
                    let names: Vec<&str> = missing.iter().map(|field| field.name()).collect();
                    warn!(missing = ?names, "CSV is missing expected columns");
                }
                info!(rows, path = %outcome.path.display(), "CSV loaded");

                let mut message = format!(
                    "Loaded {} vacanc{} from {}",
                    rows,
                    if rows == 1 { "y" } else { "ies" },
                    outcome.path.display()
                );
                if coerced > 0 {
                    warn!(rows = coerced, "non-numeric values treated as 0");
                    message.push_str(&format!(
                        " ({} row{} with non-numeric values treated as 0)",
                        coerced,
                        if coerced == 1 { "" } else { "s" }
                    ));
                }

                self.set_dataset(dataset);
                self.status_message = Some(message);
            }
            Err(error) => {
                warn!(%error, path = %outcome.path.display(), "CSV load failed");
                self.status_message = Some(format!("Load failed: {}", error));
            }
        }
    }

    /// Sets one filter input and recomputes the view.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.criteria.set(field, value);
        self.refresh_view();
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.cursor_position = 0;
        self.refresh_view();
        self.status_message = Some("Filters cleared".to_string());
    }

    /// Sorts by `field`, flipping direction if it is already the sort key.
    pub fn toggle_sort(&mut self, field: Field) {
        self.sort.toggle(field);
        if let Some(col) = Field::TABLE_COLUMNS.iter().position(|f| *f == field) {
            self.cursor_col = col;
        }
        self.refresh_view();
    }

    /// Toggles sort on the column under the column cursor.
    pub fn toggle_sort_at_cursor(&mut self) {
        if let Some(field) = Field::TABLE_COLUMNS.get(self.cursor_col).copied() {
            self.toggle_sort(field);
        }
    }

    /// Opens the detail view for the record at `index` in the displayed
    /// sequence. Selecting while a record is already open switches to the
    /// new record.
    ///
    /// # Returns
    ///
    /// `false` when `index` is out of range and nothing changed
    pub fn select_displayed(&mut self, index: usize) -> bool {
        match self.displayed.get(index) {
            Some(record) => {
                self.detail = DetailView::Open {
                    index,
                    record: record.clone(),
                };
                self.cursor_row = index;
                self.detail_scroll = 0;
                self.ensure_cursor_visible();
                true
            }
            None => false,
        }
    }

    pub fn open_detail_at_cursor(&mut self) -> bool {
        self.select_displayed(self.cursor_row)
    }

    /// Explicit close action.
    pub fn close_detail(&mut self) {
        self.detail = DetailView::Closed;
        self.detail_scroll = 0;
    }

    /// A click landed on the backdrop outside the detail panel.
    pub fn dismiss_overlay(&mut self) {
        if self.detail.is_open() {
            debug!("detail overlay dismissed");
        }
        self.close_detail();
    }

    /// A click landed inside the detail panel; it never closes the overlay.
    pub fn click_detail_panel(&mut self) {}

    pub fn copy_selected_record(&mut self) {
        let Some(record) = self.detail.record() else {
            return;
        };
        self.status_message = Some(match copy_record(record) {
            Ok(()) => "Copied record to clipboard".to_string(),
            Err(error) => {
                warn!(%error, "clipboard copy failed");
                format!("Copy failed: {}", error)
            }
        });
    }

    pub fn scroll_detail(&mut self, delta: isize) {
        self.detail_scroll = self.detail_scroll.saturating_add_signed(delta);
    }

    pub fn move_cursor_up(&mut self, rows: usize) {
        self.cursor_row = self.cursor_row.saturating_sub(rows);
        self.ensure_cursor_visible();
    }

    pub fn move_cursor_down(&mut self, rows: usize) {
        if !self.displayed.is_empty() {
            self.cursor_row = (self.cursor_row + rows).min(self.displayed.len() - 1);
        }
        self.ensure_cursor_visible();
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_row = 0;
        self.ensure_cursor_visible();
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_row = self.displayed.len().saturating_sub(1);
        self.ensure_cursor_visible();
    }

    pub fn move_column_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_column_right(&mut self) {
        if self.cursor_col + 1 < Field::TABLE_COLUMNS.len() {
            self.cursor_col += 1;
        }
    }

    /// Updates the viewport size for proper scrolling calculations.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.ensure_cursor_visible();
    }

    /// Ensures the cursor row is visible by adjusting scroll position.
    pub fn ensure_cursor_visible(&mut self) {
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.cursor_row >= self.scroll_row + self.viewport_rows {
            self.scroll_row = self.cursor_row.saturating_sub(self.viewport_rows.saturating_sub(1));
        }
        let max_scroll = self.displayed.len().saturating_sub(self.viewport_rows);
        self.scroll_row = self.scroll_row.min(max_scroll);
    }

    /// Gives the filter bar keyboard focus.
    pub fn start_filtering(&mut self) {
        self.mode = AppMode::Filtering;
        self.cursor_position = self.criteria.get(self.filter_focus).chars().count();
        self.status_message = None;
    }

    pub fn finish_filtering(&mut self) {
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    pub fn focus_filter(&mut self, field: FilterField) {
        self.filter_focus = field;
        self.cursor_position = self.criteria.get(field).chars().count();
    }

    pub fn next_filter_field(&mut self) {
        self.focus_filter(self.filter_focus.next());
    }

    pub fn previous_filter_field(&mut self) {
        self.focus_filter(self.filter_focus.previous());
    }

    /// Switches to the open-file prompt.
    pub fn start_open_file(&mut self) {
        self.mode = AppMode::OpenFile;
        self.filename_input = self
            .dataset
            .as_ref()
            .and_then(|dataset| dataset.source.as_ref())
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "vacancies.csv".to_string());
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    pub fn cancel_open_file(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Leaves the prompt and requests a load of the entered path.
    pub fn submit_open_file(&mut self) -> Option<LoadRequest> {
        let path = self.filename_input.trim().to_string();
        self.cancel_open_file();
        if path.is_empty() {
            return None;
        }
        self.begin_load(path)
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
