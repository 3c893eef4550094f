//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;

impl App {
    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => self.view.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.view.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.view.page_down(),
            KeyCode::PageUp => self.view.page_up(),
            KeyCode::Char('g') | KeyCode::Home => self.view.scroll_to_top(),
            KeyCode::Char('G') | KeyCode::End => self.view.scroll_to_bottom(),
            KeyCode::Tab => {
                self.notice = None;
                self.view.select_next_link();
            }
            KeyCode::BackTab => {
                self.notice = None;
                self.view.select_prev_link();
            }
            KeyCode::Enter => self.open_selected_link(),
            KeyCode::Char('r') => self.start_load(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryViewedStorage;
    use crate::discussion::Discussion;
    use crate::error::SourceError;
    use crate::linkify::LinkOptions;
    use crate::store::{DiscussionStore, StoreAction};
    use crate::traits::DiscussionSource;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct NeverSource;

    #[async_trait]
    impl DiscussionSource for NeverSource {
        async fn load(&self) -> Result<Discussion, SourceError> {
            Err(SourceError::NotAvailable {
                office: "KPQR".to_string(),
            })
        }

        fn describe(&self) -> String {
            "KPQR".to_string()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_text(text: &str) -> App {
        let mut app = App::new(
            Arc::new(NeverSource),
            Arc::new(InMemoryViewedStorage::new()),
            DiscussionStore::new(),
            LinkOptions {
                hyperlinks: false,
                ..LinkOptions::default()
            },
        );
        let discussion = Discussion::new(text, "KPQR", "t1");
        app.view.prepare(&discussion, 40, &app.link_options);
        app.view.set_viewport_height(4);
        app.store.dispatch(StoreAction::Loaded(discussion));
        app
    }

    fn long_text() -> String {
        (0..20).map(|i| format!("line {}\n\n", i)).collect()
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app_with_text("x");
            app.handle_key(key(code));
            assert!(app.should_quit);
        }

        let mut app = app_with_text("x");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_scroll_keys() {
        let mut app = app_with_text(&long_text());

        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.view.scroll(), 2);

        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.view.scroll(), 1);

        app.handle_key(key(KeyCode::Char('G')));
        assert_eq!(app.view.scroll(), app.view.max_scroll());

        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.view.scroll(), 0);

        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.view.scroll(), 2);
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.view.scroll(), 0);
    }

    #[test]
    fn test_tab_selects_links() {
        let mut app = app_with_text("see weather.gov and noaa.gov");
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view.selected_url(), Some("https://weather.gov"));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view.selected_url(), Some("https://noaa.gov"));
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.view.selected_url(), Some("https://weather.gov"));
    }

    #[tokio::test]
    async fn test_enter_opens_selected_link() {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&opened);
        let mut app = app_with_text("see weather.gov").with_link_opener(Arc::new(move |url: &str| {
            sink.lock().unwrap().push(url.to_string());
            Ok(())
        }));

        app.handle_key(key(KeyCode::Enter));
        assert!(app.notice.is_some());

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        // The opener runs on the blocking pool.
        for _ in 0..50 {
            if !opened.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(*opened.lock().unwrap(), vec!["https://weather.gov".to_string()]);
    }

    #[tokio::test]
    async fn test_reload_key_starts_load() {
        let mut app = app_with_text("x");
        let mut rx = app.message_rx.take().unwrap();

        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.discussion_state().is_pending());

        let message = rx.recv().await.unwrap();
        app.handle_message(message);
        assert_eq!(
            app.discussion_state(),
            crate::discussion::DiscussionState::NotAvailable
        );
    }
}
