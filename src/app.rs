use chrono::NaiveDate;

use crate::controller::{PendingSearch, SearchController, SearchStatus};
use crate::detail::DetailView;
use crate::error::FetchError;
use crate::filter::Filters;
use crate::input::Action;
use crate::model::Article;
use crate::theme::{Theme, ThemeToggle};
use crate::ui::Palette;

/// Rows the selection must pass before the back-to-top hint shows.
pub const BACK_TO_TOP_THRESHOLD: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Query, // editing the search box
    Date,  // editing the date filter
}

/// Work the event loop has to carry out after an action.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Search(PendingSearch),
    Lookup { seq: u64, id: String },
    Open(String),
}

#[derive(Debug)]
pub struct App {
    pub search: SearchController,
    pub detail: DetailView,
    pub theme: ThemeToggle<Palette>,
    pub mode: Mode,
    pub query_input: String,
    pub date_input: String,
    pub selected: usize, // index into the visible list
    pub show_full: bool,
    pub status: String,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            search: SearchController::new(),
            detail: DetailView::default(),
            theme: ThemeToggle::new(theme, Palette::default()),
            mode: Mode::Normal,
            query_input: String::new(),
            date_input: String::new(),
            selected: 0,
            show_full: false,
            status: "Press / to search. q to quit.".to_string(),
        }
    }

    pub fn handle(&mut self, action: Action) -> Command {
        match self.mode {
            Mode::Normal => self.handle_normal(action),
            Mode::Query | Mode::Date => self.handle_editing(action),
        }
    }

    fn handle_normal(&mut self, action: Action) -> Command {
        match action {
            Action::Quit => return Command::Quit,
            Action::Down => self.move_down(),
            Action::Up => self.move_up(),
            Action::ToggleFull => self.show_full = !self.show_full,
            Action::BackToTop => self.back_to_top(),
            Action::StartQuery => {
                self.mode = Mode::Query;
                self.status = "Type a query, Enter to search, Esc to cancel".to_string();
            }
            Action::StartDate | Action::CycleAuthor | Action::ClearFilters
                if !self.filter_bar_visible() => {}
            Action::StartDate => {
                self.mode = Mode::Date;
                self.date_input = self.search.state().filters.date.clone().unwrap_or_default();
                self.status = "Date filter (YYYY-MM-DD), Enter to apply, empty clears".to_string();
            }
            Action::CycleAuthor => self.cycle_author(),
            Action::ClearFilters => {
                self.search.set_filters(Filters::default());
                self.clamp_selection();
                self.status = "Filters cleared.".to_string();
            }
            Action::ToggleTheme => {
                self.theme.toggle();
            }
            Action::ShowDetail => {
                if let Some(id) = self.selected_article().map(|a| a.id.clone()) {
                    let seq = self.detail.open(&id);
                    return Command::Lookup { seq, id };
                }
            }
            Action::Cancel => self.detail.close(),
            Action::OpenInBrowser => {
                if let Some(a) = self.selected_article() {
                    return Command::Open(a.url.clone());
                }
            }
            _ => {}
        }
        Command::None
    }

    fn handle_editing(&mut self, action: Action) -> Command {
        let buf = match self.mode {
            Mode::Date => &mut self.date_input,
            _ => &mut self.query_input,
        };
        match action {
            Action::Char(c) => buf.push(c),
            Action::Backspace => {
                buf.pop();
            }
            Action::ClearInput => buf.clear(),
            Action::Cancel => {
                self.mode = Mode::Normal;
                self.status.clear();
            }
            Action::Submit => {
                let mode = std::mem::take(&mut self.mode);
                return match mode {
                    Mode::Date => {
                        self.apply_date_input();
                        Command::None
                    }
                    _ => self.submit_query().map_or(Command::None, Command::Search),
                };
            }
            _ => {}
        }
        Command::None
    }

    /// Start a search for the current input. Blank input is ignored.
    pub fn submit_query(&mut self) -> Option<PendingSearch> {
        let pending = self.search.begin(&self.query_input)?;
        self.detail.close();
        self.selected = 0;
        self.show_full = false;
        self.status = "Searching...".to_string();
        Some(pending)
    }

    pub fn apply_search(&mut self, seq: u64, result: Result<Vec<Article>, FetchError>) {
        if !self.search.complete(seq, result) {
            return;
        }
        self.clamp_selection();
        self.status = match &self.search.state().status {
            SearchStatus::Error(msg) => msg.clone(),
            _ => format!("Loaded {} articles", self.search.state().results.len()),
        };
    }

    pub fn apply_detail(&mut self, seq: u64, result: Result<Option<Article>, FetchError>) {
        self.detail.complete(seq, result);
    }

    /// All → each known author in turn → All.
    pub fn cycle_author(&mut self) {
        let options = self.search.author_options();
        let mut filters = self.search.state().filters.clone();
        let next = match filters.author.as_ref() {
            None => options.first().cloned(),
            Some(current) => options
                .iter()
                .position(|a| a == current)
                .and_then(|i| options.get(i + 1))
                .cloned(),
        };
        self.status = match &next {
            Some(author) => format!("Author: {author}"),
            None => "Author: All".to_string(),
        };
        filters.author = next;
        self.search.set_filters(filters);
        self.clamp_selection();
    }

    /// Validate and apply the date being edited. Returns whether it applied.
    pub fn apply_date_input(&mut self) -> bool {
        let raw = self.date_input.trim();
        let date = if raw.is_empty() {
            None
        } else if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
            Some(raw.to_string())
        } else {
            self.status = format!("Invalid date {raw:?}, expected YYYY-MM-DD");
            return false;
        };
        self.status = match &date {
            Some(d) => format!("Date: {d}"),
            None => "Date filter cleared.".to_string(),
        };
        let mut filters = self.search.state().filters.clone();
        filters.date = date;
        self.search.set_filters(filters);
        self.clamp_selection();
        true
    }

    /// The filter controls only make sense once there is something to filter.
    pub fn filter_bar_visible(&self) -> bool {
        let state = self.search.state();
        !state.results.is_empty() || state.is_loading()
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.search.visible().get(self.selected).copied()
    }

    pub fn move_down(&mut self) {
        let len = self.search.visible().len();
        if len == 0 { return; }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn back_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.selected > BACK_TO_TOP_THRESHOLD
    }

    fn clamp_selection(&mut self) {
        let len = self.search.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
