use crate::error::FetchError;
use crate::model::Article;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Hidden,
    Loading { id: String },
    Loaded(Box<Article>),
    NotFound,
    Failed(String),
}

/// Detail pane for one article, fetched fresh by id.
///
/// Uses the same latest-ticket rule as the search controller: opening a
/// second article while the first is still loading discards the first.
#[derive(Debug, Default)]
pub struct DetailView {
    state: DetailState,
    seq: u64,
}

impl DetailView {
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DetailState::Hidden
    }

    pub fn open(&mut self, id: &str) -> u64 {
        self.seq += 1;
        self.state = DetailState::Loading { id: id.to_string() };
        self.seq
    }

    pub fn close(&mut self) {
        // bump so an in-flight lookup cannot reopen the pane
        self.seq += 1;
        self.state = DetailState::Hidden;
    }

    pub fn complete(&mut self, seq: u64, result: Result<Option<Article>, FetchError>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "dropping stale detail response");
            return false;
        }
        self.state = match result {
            Ok(Some(article)) => DetailState::Loaded(Box::new(article)),
            Ok(None) => DetailState::NotFound,
            Err(e) => DetailState::Failed(e.to_string()),
        };
        true
    }
}
