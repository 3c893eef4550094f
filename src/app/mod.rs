//! Application state for the interactive viewer.
//!
//! `App` ties the pieces together: the [`DiscussionStore`] holding the load
//! state, the [`DiscussionView`] holding scroll and link selection, the
//! [`ViewedTracker`] and the discussion source. Loads run on tokio tasks and
//! report back through an unbounded channel of [`AppMessage`]s.

mod handlers;
mod messages;

pub use messages::AppMessage;

use std::io;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::discussion::{Discussion, DiscussionState};
use crate::error::AfdError;
use crate::linkify::LinkOptions;
use crate::store::{DiscussionStore, StoreAction};
use crate::traits::{DiscussionSource, ViewedStorage};
use crate::ui::{DiscussionView, HyperlinkCell};
use crate::viewed::ViewedTracker;

/// Opens a URL outside the terminal.
pub type LinkOpener = Arc<dyn Fn(&str) -> io::Result<()> + Send + Sync>;

/// Ticks per spinner frame (ticks are 50ms).
const TICKS_PER_SPINNER_FRAME: u64 = 2;

/// Main application state
pub struct App {
    /// Load state and viewed bookkeeping
    pub store: DiscussionStore,
    /// Scroll position and link selection
    pub view: DiscussionView,
    /// Link detection and rendering options
    pub link_options: LinkOptions,
    /// Flag to track if app should quit
    pub should_quit: bool,
    /// Set when something on screen changed
    pub needs_redraw: bool,
    /// Tick counter for animations
    pub tick_count: u64,
    /// Transient notice shown in the status bar
    pub notice: Option<String>,
    /// Whether the loaded discussion had not been viewed before this session
    pub is_new: bool,
    /// Receiver for async messages (taken by the event loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    source: Arc<dyn DiscussionSource>,
    tracker: ViewedTracker,
    opener: LinkOpener,
    /// Generation of the latest load request
    generation: u64,
}

impl App {
    /// Create the app for `source`, remembering views in `storage`.
    pub fn new(
        source: Arc<dyn DiscussionSource>,
        storage: Arc<dyn ViewedStorage>,
        store: DiscussionStore,
        link_options: LinkOptions,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            store,
            view: DiscussionView::new(),
            link_options,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            notice: None,
            is_new: false,
            message_rx: Some(message_rx),
            message_tx,
            source,
            tracker: ViewedTracker::new(storage),
            opener: Arc::new(|url: &str| open::that(url)),
            generation: 0,
        }
    }

    /// Replace the link opener.
    pub fn with_link_opener(mut self, opener: LinkOpener) -> Self {
        self.opener = opener;
        self
    }

    /// What is being viewed, for the title bar.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Mark the UI as needing a redraw.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Signal the app to quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.store.discussion().is_pending() && self.tick_count % TICKS_PER_SPINNER_FRAME == 0 {
            self.mark_dirty();
        }
    }

    /// Current spinner frame.
    pub fn spinner_frame(&self) -> usize {
        (self.tick_count / TICKS_PER_SPINNER_FRAME) as usize
    }

    /// Start loading the discussion in the background.
    ///
    /// Must be called from within a tokio runtime. A newer load supersedes
    /// any load still in flight.
    pub fn start_load(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        tracing::info!(source = %self.source.describe(), generation, "loading discussion");

        self.store.dispatch(StoreAction::LoadStarted);
        self.notice = None;
        self.mark_dirty();

        let source = Arc::clone(&self.source);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = source.load().await;
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(AppMessage::LoadFinished { generation, result });
        });
    }

    /// Apply a message from a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::LoadFinished { generation, result } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "dropping stale load");
                    return;
                }
                self.apply_load_result(result.map_err(AfdError::from));
            }
            AppMessage::LinkOpenFailed { url, error } => {
                tracing::warn!(%url, %error, "failed to open link");
                self.notice = Some(format!("Could not open {}: {}", url, error));
            }
        }
        self.mark_dirty();
    }

    fn apply_load_result(&mut self, result: Result<Discussion, AfdError>) {
        match result {
            Ok(discussion) => {
                let (office, issued) = discussion.key();
                self.is_new = self.store.viewed_issuance(office).as_deref() != Some(issued);
                self.store.dispatch(StoreAction::Loaded(discussion));
            }
            Err(AfdError::Source(err)) if err.is_not_available() => {
                tracing::info!(error = %err, "no discussion available");
                self.store.dispatch(StoreAction::NotAvailable);
            }
            Err(err) => {
                tracing::warn!(error = %err, code = err.error_code(), retryable = err.is_retryable(), "load failed");
                if err.is_retryable() {
                    self.notice = Some("Press r to retry.".to_string());
                }
                self.store.dispatch(StoreAction::LoadFailed);
            }
        }
    }

    /// Current load state.
    pub fn discussion_state(&self) -> DiscussionState {
        self.store.discussion()
    }

    /// Run after every draw: reports the discussion as viewed once it has
    /// been on screen.
    pub fn after_draw(&mut self) {
        if let DiscussionState::Loaded(discussion) = self.store.discussion() {
            self.tracker.discussion_rendered(&self.store, &discussion);
        }
    }

    /// Links to overlay as OSC 8 hyperlinks after a draw.
    ///
    /// Empty when hyperlinks are turned off.
    pub fn hyperlinks(&self) -> Vec<HyperlinkCell> {
        if !self.link_options.hyperlinks {
            return Vec::new();
        }
        self.view.visible_links()
    }

    /// Open the selected link in the browser.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open_selected_link(&mut self) {
        let Some(url) = self.view.selected_url().map(str::to_string) else {
            self.notice = Some("No link selected. Press Tab to select one.".to_string());
            return;
        };

        tracing::info!(%url, "opening link");
        let opener = Arc::clone(&self.opener);
        let tx = self.message_tx.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(err) = opener(&url) {
                let _ = tx.send(AppMessage::LinkOpenFailed {
                    url,
                    error: err.to_string(),
                });
            }
        });
    }
}
