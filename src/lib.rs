//! # nytbox
//!
//! Terminal client for the New York Times Article Search API.
//!
//! The interesting parts live outside the UI: [`nyt`] issues requests,
//! [`filter`] narrows results by author and day, and [`controller`] owns the
//! search state and makes sure only the most recently issued search is
//! applied. [`app`], [`input`] and [`ui`] are the terminal presentation.

pub mod app;
pub mod config;
pub mod controller;
pub mod detail;
pub mod error;
pub mod filter;
pub mod input;
pub mod model;
pub mod nyt;
pub mod theme;
pub mod ui;

pub use config::Config;
pub use controller::{PendingSearch, SearchController, SearchState, SearchStatus};
pub use error::FetchError;
pub use filter::Filters;
pub use model::Article;
pub use nyt::{ArticleSearch, NytClient};
