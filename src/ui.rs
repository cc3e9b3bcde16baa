use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Mode};
use crate::detail::DetailState;
use crate::model::Article;
use crate::theme::{Theme, ThemeSink};

/// Placeholder rows shown while a search is in flight.
pub const SKELETON_ROWS: usize = 5;
const SKELETON: &str = "░░░░░░░░░░░░░░░░░░░░ ░░░░░░░░░░ ░░░░░░░░";

/// Colours for the current theme. Repainted through [`ThemeSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::DarkGray,
                error: Color::Red,
            },
            Theme::Dark => Self {
                fg: Color::Gray,
                bg: Color::Black,
                accent: Color::LightBlue,
                muted: Color::DarkGray,
                error: Color::LightRed,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

impl ThemeSink for Palette {
    fn apply(&mut self, theme: Theme) {
        *self = Self::for_theme(theme);
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let palette = *app.theme.sink();
    let area = f.size();
    let filter_height = if app.filter_bar_visible() { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(filter_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(Block::default().style(palette.base()), area);
    f.render_widget(Paragraph::new(top_bar(app)).style(palette.base()), chunks[0]);

    if filter_height > 0 {
        let filters = &app.search.state().filters;
        let line = format!(
            "Author: {}   Date: {}   (a:author  f:date  c:clear)",
            filters.author.as_deref().unwrap_or("All"),
            filters.date.as_deref().unwrap_or("Any"),
        );
        f.render_widget(
            Paragraph::new(line).style(Style::default().fg(palette.muted)),
            chunks[1],
        );
    }

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    draw_results(f, app, &palette, panes[0]);
    draw_preview(f, app, &palette, panes[1]);

    let mut status = app.status.clone();
    if app.back_to_top_visible() {
        status.push_str("   ↑ g: back to top");
    }
    f.render_widget(Paragraph::new(status).style(palette.base()), chunks[3]);
}

fn top_bar(app: &App) -> String {
    let button = if app.search.state().is_loading() { "Searching..." } else { "Search" };
    match app.mode {
        Mode::Query => format!("Search: {}▏ [{}]", app.query_input, button),
        Mode::Date => format!("Date (YYYY-MM-DD): {}▏", app.date_input),
        Mode::Normal => format!(
            "[{}] {}  —  /:search  j/k:move  Enter:read  i:detail  o:open  t:{}  q:quit",
            button,
            if app.query_input.is_empty() { "Search for articles..." } else { app.query_input.as_str() },
            app.theme.label(),
        ),
    }
}

fn draw_results(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Articles")
        .border_style(Style::default().fg(palette.accent));
    let state = app.search.state();

    if state.is_loading() {
        let rows: Vec<ListItem> = (0..SKELETON_ROWS)
            .map(|_| ListItem::new(Line::from(SKELETON)).style(Style::default().fg(palette.muted)))
            .collect();
        f.render_widget(List::new(rows).block(block), area);
        return;
    }

    if let Some(msg) = state.error_message() {
        let banner = Paragraph::new(msg.to_string())
            .style(Style::default().fg(palette.error).add_modifier(Modifier::BOLD))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(banner, area);
        return;
    }

    if app.search.shows_empty_notice() {
        let notice = Paragraph::new("No articles found. Try searching!")
            .style(Style::default().fg(palette.muted))
            .block(block);
        f.render_widget(notice, area);
        return;
    }

    let items: Vec<ListItem> = app
        .search
        .visible()
        .into_iter()
        .enumerate()
        .map(|(pos, a)| {
            let prefix = if pos == app.selected { "▶ " } else { "  " };
            ListItem::new(Line::from(format!("{}{:<16} {}", prefix, a.date_line(), a.headline)))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));
    let mut list_state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_preview(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let (title, body) = match app.detail.state() {
        DetailState::Hidden => ("Preview", preview_text(app, palette)),
        DetailState::Loading { .. } => ("Detail", Text::from("Loading...")),
        DetailState::NotFound => ("Detail", Text::from("Article not found.")),
        DetailState::Failed(msg) => (
            "Detail",
            Text::from(Line::from(msg.clone()).style(Style::default().fg(palette.error))),
        ),
        DetailState::Loaded(a) => {
            let mut text = Text::default();
            text.lines.push(Line::from(a.headline.clone()).style(bold));
            text.lines.push(Line::from(a.date_line()).style(Style::default().fg(palette.muted)));
            text.lines.push(Line::from(""));
            text.lines.extend(Text::from(a.detail_body().to_string()).lines);
            text.lines.push(Line::from(""));
            text.lines.push(Line::from(vec![
                Span::raw("Read full article: "),
                Span::styled(a.url.clone(), Style::default().fg(palette.accent)),
            ]));
            text.lines.push(Line::from("Esc: back"));
            ("Detail", text)
        }
    };

    let preview = Paragraph::new(body)
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(preview, area);
}

fn preview_text(app: &App, palette: &Palette) -> Text<'static> {
    let Some(a) = app.selected_article() else {
        return Text::from("Nothing selected.");
    };
    card(a, app.show_full, palette)
}

fn card(a: &Article, full: bool, palette: &Palette) -> Text<'static> {
    let mut text = Text::default();
    text.lines.push(Line::from(a.headline.clone()).style(Style::default().add_modifier(Modifier::BOLD)));
    text.lines.push(Line::from(format!("By: {}", a.author_line())));
    text.lines.push(Line::from(a.date_line()).style(Style::default().fg(palette.muted)));
    text.lines.push(Line::from(format!("Link: {}", a.url)));
    text.lines.push(Line::from(""));
    let summary = if full { a.summary().to_string() } else { truncate(a.summary(), 700) };
    text.lines.extend(Text::from(summary).lines);
    text
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &s[..cut]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn test_article() -> Article {
        Article {
            id: "test-article-id".into(),
            headline: "Test Article".into(),
            byline: Some("By Test Author".into()),
            pub_date: Some("2025-07-19T00:00:00Z".into()),
            snippet: Some("Test snippet".into()),
            lead_paragraph: None,
            url: "https://example.com/article".into(),
        }
    }

    fn searching() -> (App, u64) {
        let mut app = App::new(Theme::Light);
        app.query_input = "test".into();
        let seq = app.submit_query().unwrap().seq;
        (app, seq)
    }

    #[test]
    fn idle_screen_shows_empty_notice() {
        let app = App::new(Theme::Light);
        let screen = render(&app);
        assert!(screen.contains("No articles found. Try searching!"));
        assert!(!screen.contains("Author: All"));
    }

    #[test]
    fn loading_shows_skeletons_and_filter_bar() {
        let (app, _) = searching();
        let screen = render(&app);
        assert!(screen.contains("Searching..."));
        assert!(screen.contains("░░░░"));
        assert!(screen.contains("Author: All"));
        assert!(!screen.contains("No articles found"));
    }

    #[test]
    fn error_banner_replaces_list() {
        let (mut app, seq) = searching();
        app.apply_search(seq, Err(FetchError::Status(500)));
        let screen = render(&app);
        assert!(screen.contains("Failed to fetch articles"));
        assert!(!screen.contains("No articles found"));
    }

    #[test]
    fn results_render_with_card() {
        let (mut app, seq) = searching();
        app.apply_search(seq, Ok(vec![test_article()]));
        let screen = render(&app);
        assert!(screen.contains("Test Article"));
        assert!(screen.contains("By: By Test Author"));
        assert!(screen.contains("Test snippet"));
    }

    #[test]
    fn detail_pane_states() {
        let (mut app, seq) = searching();
        app.apply_search(seq, Ok(vec![test_article()]));

        let lookup = app.detail.open("test-article-id");
        assert!(render(&app).contains("Loading..."));

        app.apply_detail(lookup, Ok(None));
        assert!(render(&app).contains("Article not found."));
    }

    #[test]
    fn palette_follows_theme() {
        let mut palette = Palette::default();
        assert_eq!(palette, Palette::for_theme(Theme::Light));
        palette.apply(Theme::Dark);
        assert_eq!(palette.bg, Color::Black);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé…");
        assert_eq!(truncate("short", 10), "short");
    }
}
