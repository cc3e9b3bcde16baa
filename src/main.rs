use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use nytbox::app::{App, Command};
use nytbox::nyt::ArticleSearch;
use nytbox::theme::Theme;
use nytbox::{input, ui, Article, Config, FetchError, NytClient};

/// Search New York Times articles from the terminal.
#[derive(Parser)]
#[command(name = "nytbox", version, about)]
struct Cli {
    /// Run this search on startup
    query: Option<String>,

    /// Override the search endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,
}

/// Results coming back from background requests.
enum Reply {
    Search { seq: u64, result: Result<Vec<Article>, FetchError> },
    Detail { seq: u64, result: Result<Option<Article>, FetchError> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.base_url.clone() {
        config.base_url = url;
    }
    if let Some(secs) = cli.timeout.filter(|s| *s > 0) {
        config.timeout_secs = secs;
    }

    let _guard = init_logging(&config)?;
    tracing::info!(?config, "starting nytbox");

    let client = NytClient::new(&config).context("building HTTP client")?;

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, client, cli).await;
    restore_terminal(&mut terminal)?;
    res
}

fn init_logging(config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("creating log dir {}", config.log_dir.display()))?;
    let appender = tracing_appender::rolling::never(&config.log_dir, "nytbox.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nytbox=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    client: NytClient,
    cli: Cli,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Reply>(8);

    let mut app = App::new(if cli.dark { Theme::Dark } else { Theme::Light });

    if let Some(query) = cli.query {
        app.query_input = query;
        if let Some(pending) = app.submit_query() {
            spawn_search(&client, &tx, pending.seq, pending.query);
        }
    }

    loop {
        // Apply whatever the background requests have produced
        while let Ok(reply) = rx.try_recv() {
            match reply {
                Reply::Search { seq, result } => app.apply_search(seq, result),
                Reply::Detail { seq, result } => app.apply_detail(seq, result),
            }
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        let action = input::poll_action(app.mode)?;
        match app.handle(action) {
            Command::None => {}
            Command::Quit => break,
            Command::Search(pending) => spawn_search(&client, &tx, pending.seq, pending.query),
            Command::Lookup { seq, id } => {
                let tx = tx.clone();
                let client = client.clone();
                tokio::spawn(async move {
                    let result = client.lookup(&id).await;
                    let _ = tx.send(Reply::Detail { seq, result }).await;
                });
            }
            Command::Open(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(%url, error = %e, "could not open browser");
                    app.status = format!("Could not open browser: {}", e);
                } else {
                    app.status = "Opened in browser.".to_string();
                }
            }
        }
    }

    Ok(())
}

fn spawn_search(client: &NytClient, tx: &mpsc::Sender<Reply>, seq: u64, query: String) {
    let tx = tx.clone();
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.search(&query).await;
        let _ = tx.send(Reply::Search { seq, result }).await;
    });
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
