use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Down,
    Up,
    ToggleFull,
    BackToTop,
    StartQuery,
    StartDate,
    CycleAuthor,
    ClearFilters,
    ToggleTheme,
    ShowDetail,
    OpenInBrowser,
    Submit,
    Cancel,
    Backspace,
    ClearInput,
    Char(char),
    None,
}

pub fn poll_action(mode: Mode) -> anyhow::Result<Action> {
    if !event::poll(Duration::from_millis(50))? {
        return Ok(Action::None);
    }

    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(mode, key)),
        _ => Ok(Action::None),
    }
}

pub fn map_key(mode: Mode, KeyEvent { code, modifiers, .. }: KeyEvent) -> Action {
    if mode != Mode::Normal {
        return match (code, modifiers) {
            (KeyCode::Esc, _) => Action::Cancel,
            (KeyCode::Enter, _) => Action::Submit,
            (KeyCode::Backspace, _) => Action::Backspace,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearInput,
            (KeyCode::Char(c), _) => Action::Char(c),
            _ => Action::None,
        };
    }

    match (code, modifiers) {
        (KeyCode::Char('q'), _) => Action::Quit,
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Action::Down,
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Action::Up,
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::BackToTop,
        (KeyCode::Enter, _) => Action::ToggleFull,
        (KeyCode::Char('/'), _) => Action::StartQuery,
        (KeyCode::Char('f'), _) => Action::StartDate,
        (KeyCode::Char('a'), _) => Action::CycleAuthor,
        (KeyCode::Char('c'), _) => Action::ClearFilters,
        (KeyCode::Char('t'), _) => Action::ToggleTheme,
        (KeyCode::Char('i'), _) => Action::ShowDetail,
        (KeyCode::Char('o'), _) => Action::OpenInBrowser,
        (KeyCode::Esc, _) => Action::Cancel,
        _ => Action::None,
    }
}
