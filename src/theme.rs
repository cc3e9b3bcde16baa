//! Light/dark theme state.
//!
//! The toggle owns the current theme and pushes every change into a
//! [`ThemeSink`] it was given, so the decision logic does not depend on
//! whatever actually renders colours.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Receives theme changes.
pub trait ThemeSink {
    fn apply(&mut self, theme: Theme);
}

#[derive(Debug)]
pub struct ThemeToggle<S: ThemeSink> {
    theme: Theme,
    sink: S,
}

impl<S: ThemeSink> ThemeToggle<S> {
    /// Applies `initial` to the sink immediately.
    pub fn new(initial: Theme, mut sink: S) -> Self {
        sink.apply(initial);
        Self { theme: initial, sink }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();
        self.sink.apply(self.theme);
        self.theme
    }

    /// Label describing what the toggle will do next.
    pub fn label(&self) -> &'static str {
        match self.theme {
            Theme::Dark => "Switch to light mode",
            Theme::Light => "Switch to dark mode",
        }
    }
}
