use afdview::adapters::{FileViewedStorage, InMemoryViewedStorage, ReqwestHttpClient};
use afdview::app::App;
use afdview::cli::{parse_args, version_string, CliCommand, ViewOptions, USAGE};
use afdview::config::{Config, ConfigManager};
use afdview::error::AfdError;
use afdview::linkify::LinkOptions;
use afdview::logging;
use afdview::source::{FileSource, NwsSource};
use afdview::store::DiscussionStore;
use afdview::terminal::{setup_panic_hook, TerminalManager};
use afdview::traits::{DiscussionSource, ViewedStorage};
use afdview::ui;
use afdview::viewed::ViewedTracker;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

/// Animation tick interval.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Print width when stdout is not a terminal.
const DEFAULT_PRINT_WIDTH: usize = 80;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let options = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("{}", version_string());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            print!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::View(options)) => options,
        Err(err) => {
            eprintln!("afdview: {}\n\n{}", err, USAGE);
            std::process::exit(2);
        }
    };

    logging::init();
    let config = ConfigManager::new()
        .map(|manager| manager.load())
        .unwrap_or_default();

    let mut link_options = config.link_options();
    if options.no_links {
        link_options.hyperlinks = false;
    }

    let source = build_source(&options, &config)?;
    let (storage, viewed) = open_viewed_storage();
    let store = DiscussionStore::with_viewed(viewed);

    if options.print {
        return print_discussion(source, storage, store, &options, &link_options).await;
    }

    run_viewer(source, storage, store, link_options).await
}

/// Pick the discussion source from the command line and config.
fn build_source(options: &ViewOptions, config: &Config) -> Result<Arc<dyn DiscussionSource>> {
    let office = options.office.clone().or_else(|| config.default_office.clone());

    if let Some(path) = &options.file {
        let mut source = FileSource::new(path);
        if let Some(office) = office {
            source = source.with_office(office);
        }
        if let Some(issued) = &options.issued {
            source = source.with_issuance_time(issued.clone());
        }
        return Ok(Arc::new(source));
    }

    let office = office.ok_or_else(|| {
        eyre!("no forecast office given; pass one (e.g. `afdview KPQR`) or set default_office in the config")
    })?;
    let client = ReqwestHttpClient::with_settings(&config.user_agent, config.request_timeout())?;
    Ok(Arc::new(NwsSource::new(
        client,
        config.api_base_url.clone(),
        office,
        config.user_agent.clone(),
    )))
}

/// Open the viewed-state file, falling back to memory without a home directory.
fn open_viewed_storage() -> (Arc<dyn ViewedStorage>, BTreeMap<String, String>) {
    match FileViewedStorage::new() {
        Ok(storage) => {
            let viewed = storage
                .load()
                .map(|state| state.discussions)
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "ignoring unreadable viewed state");
                    BTreeMap::new()
                });
            (Arc::new(storage), viewed)
        }
        Err(err) => {
            tracing::warn!(error = %err, "viewed state will not be persisted");
            (Arc::new(InMemoryViewedStorage::new()), BTreeMap::new())
        }
    }
}

/// `--print`: load once, write the laid out text to stdout.
async fn print_discussion(
    source: Arc<dyn DiscussionSource>,
    storage: Arc<dyn ViewedStorage>,
    store: DiscussionStore,
    options: &ViewOptions,
    link_options: &LinkOptions,
) -> Result<()> {
    let discussion = match source.load().await {
        Ok(discussion) => discussion,
        Err(err) => {
            let err = AfdError::from(err);
            tracing::warn!(error = %err, code = err.error_code(), "load failed");
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let ansi = stdout.is_terminal();
    let width = match options.width {
        Some(width) => width as usize,
        None if ansi => crossterm::terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(DEFAULT_PRINT_WIDTH),
        None => DEFAULT_PRINT_WIDTH,
    };

    println!("{} · {}\n", discussion.issuing_office, ui::issued_label(&discussion));
    print!("{}", ui::render_plain(&discussion, width, link_options, ansi));

    ViewedTracker::new(storage).discussion_rendered(&store, &discussion);
    Ok(())
}

/// Interactive viewer.
async fn run_viewer(
    source: Arc<dyn DiscussionSource>,
    storage: Arc<dyn ViewedStorage>,
    store: DiscussionStore,
    link_options: LinkOptions,
) -> Result<()> {
    setup_panic_hook();
    let mut term_manager = TerminalManager::new()?;

    let mut app = App::new(source, storage, store, link_options);
    app.start_load();

    let result = run_app(term_manager.terminal(), &mut app).await;
    term_manager.restore();
    if let Err(err) = &result {
        tracing::error!(error = ?err, "viewer error");
    }
    result
}

async fn run_app<B: Backend + Write>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;
    let mut store_rx = app.store.subscribe();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            ui::write_hyperlinks(terminal.backend_mut(), &app.hyperlinks())?;
            app.needs_redraw = false;
            app.after_draw();
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            _ = ticker.tick() => app.tick(),

            event_result = event_stream.next() => match event_result {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => return Ok(()),
            },

            Some(message) = message_rx.recv() => app.handle_message(message),

            Ok(()) = store_rx.changed() => app.mark_dirty(),
        }
    }
}
