//! End-to-end flows through the session and a real worker.
//!
//! Worker messages produced by the session are handed straight to a
//! [`StartpageWorker`] backed by a temporary directory, and its replies are fed
//! back as events, the way the plugin shim does it inside Zellij.

use startpage::app::{LoadState, Mode, NoticeKind, Pending};
use startpage::storage::{JsonStorage, Storage};
use startpage::worker::StartpageWorker;
use startpage::{handle_event, Action, Bookmark, Event, Session, SessionPaths, Theme};
use std::path::PathBuf;
use tempfile::TempDir;

struct Harness {
    dir: TempDir,
    session: Session,
    worker: StartpageWorker,
}

impl Harness {
    /// A harness whose seed file holds `seed` (JSON), loaded and ready.
    fn with_seed(seed: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let seed_file = dir.path().join("data.json");
        std::fs::write(&seed_file, seed).expect("write seed");

        let storage = JsonStorage::new(dir.path().join("store")).expect("storage");
        let paths = SessionPaths {
            seed_file,
            export_dir: dir.path().join("exports"),
        };

        let mut harness = Self {
            session: Session::new(Theme::default(), paths),
            worker: StartpageWorker::with_storage(Box::new(storage)),
            dir,
        };
        let actions = harness.send(Event::Initialize);
        assert!(actions.is_empty());
        assert_eq!(harness.session.load_state, LoadState::Ready);
        harness
    }

    fn seeded() -> Self {
        Self::with_seed(
            r#"{
                "config": {"searchEngine": "https://www.startpage.com/search?q="},
                "bookmarks": [
                    {"name": "GitHub", "url": "https://github.com", "tags": ["code", "git"]},
                    {"name": "Rust Docs", "url": "https://doc.rust-lang.org", "tags": ["rust"]},
                    {"name": "Hacker News", "url": "https://news.ycombinator.com", "tags": []}
                ]
            }"#,
        )
    }

    /// Handles `event`, round-trips worker messages, and returns the other actions.
    fn send(&mut self, event: Event) -> Vec<Action> {
        let (_, actions) = handle_event(&mut self.session, &event).expect("handle event");

        let mut external = Vec::new();
        for action in actions {
            match action {
                Action::PostToWorker(message) => {
                    let response = self.worker.handle_message(message);
                    external.extend(self.send(Event::WorkerResponse(response)));
                }
                other => external.push(other),
            }
        }
        external
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            let actions = self.send(Event::Char(c));
            assert!(actions.is_empty(), "typing {c:?} produced {actions:?}");
        }
    }

    fn store_dir(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    /// Writes both buckets so the next load comes from storage.
    fn replace_stored_bookmarks(&self, bookmarks: &[Bookmark]) {
        let mut storage = JsonStorage::new(self.store_dir()).expect("storage");
        storage.save_settings(&self.session.settings).expect("save settings");
        storage.save_bookmarks(bookmarks).expect("save bookmarks");
    }
}

fn open(url: &str) -> Vec<Action> {
    vec![Action::OpenUrl { url: url.to_string() }]
}

#[test]
fn filter_then_open_bookmark() {
    let mut h = Harness::seeded();
    assert_eq!(h.session.mode, Mode::Empty);

    h.type_text("GIT");
    let Mode::Filter(matches) = &h.session.mode else {
        panic!("expected Filter, got {:?}", h.session.mode);
    };
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "GitHub");

    assert_eq!(h.send(Event::Submit), open("https://github.com"));
    assert!(h.session.raw_query.is_empty());
    assert_eq!(h.session.mode, Mode::Empty);
}

#[test]
fn tag_match_and_cursor_movement() {
    let mut h = Harness::seeded();
    h.type_text("o");

    // GitHub (tag "code"), Rust Docs (url), Hacker News (name and url)
    assert_eq!(h.session.mode.len(), 3);
    h.send(Event::KeyDown);
    h.send(Event::KeyDown);
    h.send(Event::KeyDown);
    assert_eq!(h.session.cursor.index(), 2);

    h.send(Event::KeyUp);
    assert_eq!(h.send(Event::Submit), open("https://doc.rust-lang.org"));
}

#[test]
fn command_prefix_runs_selected_command() {
    let mut h = Harness::seeded();
    h.type_text(":lis");

    let Mode::CommandSuggest(commands) = &h.session.mode else {
        panic!("expected CommandSuggest, got {:?}", h.session.mode);
    };
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].name, ":list");

    assert!(h.send(Event::Submit).is_empty());
    assert!(h.session.sticky_list_all);
    assert!(h.session.raw_query.is_empty());
    assert_eq!(h.session.mode.len(), 3);
}

#[test]
fn bare_domain_navigates_over_https() {
    let mut h = Harness::seeded();
    h.type_text("example.com");
    assert!(h.session.mode.is_empty());
    assert_eq!(h.send(Event::Submit), open("https://example.com"));
}

#[test]
fn free_text_searches_the_web() {
    let mut h = Harness::seeded();
    h.type_text("how to code");
    assert_eq!(
        h.send(Event::Submit),
        open("https://www.startpage.com/search?q=how%20to%20code")
    );
}

#[test]
fn sticky_list_survives_clearing_until_escape() {
    let mut h = Harness::seeded();
    h.type_text(":list");
    h.send(Event::Submit);
    assert!(matches!(h.session.mode, Mode::ListAll(_)));

    h.type_text("ru");
    assert!(matches!(h.session.mode, Mode::Filter(_)));
    h.send(Event::Backspace);
    h.send(Event::Backspace);
    assert!(matches!(h.session.mode, Mode::ListAll(_)));

    h.send(Event::Escape);
    assert!(!h.session.sticky_list_all);
    assert_eq!(h.session.mode, Mode::Empty);
}

#[test]
fn export_then_import_restores_bookmarks() {
    let mut h = Harness::seeded();

    h.type_text(":export");
    assert!(h.send(Event::Submit).is_empty());
    let notice = h.session.notice.clone().expect("export notice");
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(notice.text.starts_with("Exported to "));

    let exported = std::fs::read_dir(h.dir.path().join("exports"))
        .expect("exports dir")
        .next()
        .expect("one export")
        .expect("entry")
        .path();

    h.replace_stored_bookmarks(&[Bookmark::new("Only", "https://only.example", ["misc"])]);
    h.send(Event::Reload);
    assert_eq!(h.session.bookmarks.len(), 1);

    h.send(Event::Escape);
    h.type_text(":import");
    h.send(Event::Submit);
    let Some(Pending::ImportPath(prefill)) = h.session.pending.clone() else {
        panic!("expected import prompt, got {:?}", h.session.pending);
    };
    assert!(exported.to_string_lossy().starts_with(prefill.as_str()));
    let file_name = exported.file_name().expect("file name").to_string_lossy().to_string();
    h.type_text(&file_name);

    assert!(h.send(Event::Submit).is_empty());
    assert_eq!(h.session.pending, None);
    assert_eq!(
        h.session.notice.as_ref().map(|n| n.text.as_str()),
        Some("Import successful")
    );
    assert_eq!(h.session.bookmarks.len(), 3);

    let stored = JsonStorage::new(h.store_dir()).expect("storage").load().expect("load");
    assert_eq!(stored.bookmarks.map(|b| b.len()), Some(3));
}

#[test]
fn reset_falls_back_to_seed() {
    let mut h = Harness::seeded();
    h.replace_stored_bookmarks(&[Bookmark::new("Only", "https://only.example", ["misc"])]);
    h.send(Event::Reload);
    assert_eq!(h.session.bookmarks.len(), 1);

    h.type_text(":reset");
    h.send(Event::Submit);
    assert_eq!(h.session.pending, Some(Pending::ConfirmReset));

    h.send(Event::Char('q'));
    assert_eq!(h.session.pending, Some(Pending::ConfirmReset));
    h.send(Event::Char('y'));

    assert_eq!(h.session.pending, None);
    assert!(h.session.raw_query.is_empty());
    assert_eq!(h.session.bookmarks.len(), 3);
    assert_eq!(
        h.session.notice.as_ref().map(|n| n.text.as_str()),
        Some("All settings and bookmarks were reset")
    );

    let stored = JsonStorage::new(h.store_dir()).expect("storage").load().expect("load");
    assert!(stored.bookmarks.is_none());
    assert!(stored.settings.is_none());
}

#[test]
fn failed_import_reports_error_and_keeps_data() {
    let mut h = Harness::seeded();
    let bad = h.dir.path().join("bad.json");
    std::fs::write(&bad, "{\"config\": 42}").expect("write");

    h.type_text(":import");
    h.send(Event::Submit);
    if let Some(Pending::ImportPath(path)) = &mut h.session.pending {
        path.clear();
    }
    h.type_text(&bad.to_string_lossy());
    h.send(Event::Submit);

    let notice = h.session.notice.clone().expect("error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Failed to import: invalid file format");
    assert_eq!(h.session.bookmarks.len(), 3);
}

#[test]
fn bookmark_command_opens_materialized_bucket() {
    let mut h = Harness::seeded();
    h.type_text(":bookmark");

    let actions = h.send(Event::Submit);
    let [Action::EditFile { path }] = actions.as_slice() else {
        panic!("expected EditFile, got {actions:?}");
    };
    assert!(path.starts_with(h.store_dir()));

    let written: Vec<Bookmark> =
        serde_json::from_str(&std::fs::read_to_string(path).expect("read")).expect("parse");
    assert_eq!(written.len(), 3);
}

#[test]
fn opener_failure_becomes_error_notice() {
    let mut h = Harness::seeded();
    h.type_text("example.com");
    h.send(Event::Submit);

    h.send(Event::OpenerFailed {
        error: "xdg-open: not found".to_string(),
    });
    let notice = h.session.notice.clone().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.contains("xdg-open: not found"));

    h.send(Event::Char('a'));
    assert!(h.session.notice.is_none());
}
