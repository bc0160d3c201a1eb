use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use redline_engine::{
    Decision, DocumentView, Result as RevisionResult, Suggestion, SuggestionId, SuggestionSession,
    SuggestionStatus,
};

/// Something the reviewer can ask for from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    Accept,
    Reject,
    AcceptAll,
    RejectAll,
    Undo,
    Redo,
    Quit,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r') => Some(Action::Redo),
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Next),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Previous),
            KeyCode::Char('a') => Some(Action::Accept),
            KeyCode::Char('r') => Some(Action::Reject),
            KeyCode::Char('A') => Some(Action::AcceptAll),
            KeyCode::Char('R') => Some(Action::RejectAll),
            KeyCode::Char('u') => Some(Action::Undo),
            KeyCode::Char('U') => Some(Action::Redo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Plain,
    Pending,
    Selected,
}

/// A run of the current text rendered with one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
}

impl Segment {
    fn new(text: String, kind: SegmentKind) -> Self {
        Self { text, kind }
    }
}

pub struct App {
    session: SuggestionSession,
    view: DocumentView,
    pub list_state: ListState,
    status: String,
}

impl App {
    pub fn new(session: SuggestionSession) -> Self {
        let view = session.current_view();
        let mut list_state = ListState::default();
        if !view.suggestions.is_empty() {
            list_state.select(Some(0));
        }
        let status = format!("{} suggestions pending", view.pending().count());

        Self {
            session,
            view,
            list_state,
            status,
        }
    }

    pub fn view(&self) -> &DocumentView {
        &self.view
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn final_text(&self) -> &str {
        &self.view.current_text
    }

    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.list_state
            .selected()
            .and_then(|i| self.view.suggestions.get(i))
    }

    /// Apply `action`; returns false once the reviewer asked to quit
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::Next => self.next_suggestion(),
            Action::Previous => self.previous_suggestion(),
            Action::Accept => self.resolve_selected(Decision::Accept),
            Action::Reject => self.resolve_selected(Decision::Reject),
            Action::AcceptAll => self.resolve_all(Decision::Accept),
            Action::RejectAll => self.resolve_all(Decision::Reject),
            Action::Undo => {
                let result = self.session.undo();
                self.refresh(result, || "Undone".to_string());
            }
            Action::Redo => {
                let result = self.session.redo();
                self.refresh(result, || "Redone".to_string());
            }
        }
        true
    }

    fn next_suggestion(&mut self) {
        let len = self.view.suggestions.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_suggestion(&mut self) {
        let len = self.view.suggestions.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn resolve_selected(&mut self, decision: Decision) {
        let Some(id) = self.selected_suggestion().map(|s| s.id) else {
            self.status = "No suggestion selected".to_string();
            return;
        };
        let result = self.session.resolve(id, decision);
        self.refresh(result, || format!("{} {id}", decision.status()));
    }

    fn resolve_all(&mut self, decision: Decision) {
        let pending = self.view.pending().count();
        let result = self.session.resolve_all(decision);
        self.refresh(result, || {
            format!("{} {pending} suggestions", decision.status())
        });
    }

    /// Take the outcome of a session call into the cached view and status line
    fn refresh(&mut self, result: RevisionResult<DocumentView>, message: impl FnOnce() -> String) {
        match result {
            Ok(view) => {
                let selected = self.selected_suggestion().map(|s| s.id);
                self.view = view;
                self.reselect(selected);
                self.status = message();

                let dropped: Vec<String> = self
                    .session
                    .last_patches()
                    .iter()
                    .flat_map(|p| p.dropped.iter().map(SuggestionId::to_string))
                    .collect();
                if !dropped.is_empty() {
                    self.status
                        .push_str(&format!(", dropped overlapping {}", dropped.join(" ")));
                }
            }
            Err(e) => {
                log::warn!("{e}");
                self.status = format!("Error: {e}");
            }
        }
    }

    /// Keep the cursor on the same suggestion when it survived, else clamp
    fn reselect(&mut self, selected: Option<SuggestionId>) {
        let suggestions = &self.view.suggestions;
        if suggestions.is_empty() {
            self.list_state.select(None);
            return;
        }
        let index = selected
            .and_then(|id| suggestions.iter().position(|s| s.id == id))
            .or_else(|| self.list_state.selected().map(|i| i.min(suggestions.len() - 1)))
            .unwrap_or(0);
        self.list_state.select(Some(index));
    }

    pub fn history_hint(&self) -> String {
        let undo = if self.view.can_undo { "undo" } else { "-" };
        let redo = if self.view.can_redo { "redo" } else { "-" };
        format!("[{undo} | {redo}] rev {}", self.view.revision)
    }

    pub fn segments(&self) -> Vec<Segment> {
        segment_text(
            &self.view.current_text,
            self.view.pending(),
            self.selected_suggestion().map(|s| s.id),
        )
    }
}

pub fn status_marker(status: SuggestionStatus) -> &'static str {
    match status {
        SuggestionStatus::Pending => "·",
        SuggestionStatus::Accepted => "✓",
        SuggestionStatus::Rejected => "✗",
    }
}

/// Split `text` into runs so pending spans can be styled apart from plain
/// text. Spans are character ranges in position order and do not overlap.
pub fn segment_text<'a>(
    text: &str,
    pending: impl Iterator<Item = &'a Suggestion>,
    selected: Option<SuggestionId>,
) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let collect = |from: usize, to: usize| chars[from..to].iter().collect::<String>();
    let mut segments = Vec::new();
    let mut cursor = 0;

    for suggestion in pending {
        let start = suggestion.start.clamp(cursor, chars.len());
        let end = suggestion.end.clamp(start, chars.len());
        if start > cursor {
            segments.push(Segment::new(collect(cursor, start), SegmentKind::Plain));
        }
        if end > start {
            let kind = if selected == Some(suggestion.id) {
                SegmentKind::Selected
            } else {
                SegmentKind::Pending
            };
            segments.push(Segment::new(collect(start, end), kind));
        }
        cursor = end;
    }
    if cursor < chars.len() {
        segments.push(Segment::new(collect(cursor, chars.len()), SegmentKind::Plain));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use redline_engine::SuggestionDraft;

    fn app() -> App {
        let session = SuggestionSession::new(
            "one two three",
            vec![
                SuggestionDraft::new(0, 3, "uno"),
                SuggestionDraft::new(4, 7, "dos"),
                SuggestionDraft::new(8, 13, "tres"),
            ],
        )
        .unwrap();
        App::new(session)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key(key(KeyCode::Char('j'))), Some(Action::Next));
        assert_eq!(Action::from_key(key(KeyCode::Up)), Some(Action::Previous));
        assert_eq!(Action::from_key(key(KeyCode::Char('A'))), Some(Action::AcceptAll));
        assert_eq!(Action::from_key(key(KeyCode::Char('r'))), Some(Action::Reject));
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Action::Redo)
        );
        assert_eq!(Action::from_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        assert_eq!(app.selected_suggestion().map(|s| s.id), Some(SuggestionId(1)));

        app.apply(Action::Previous);
        assert_eq!(app.selected_suggestion().map(|s| s.id), Some(SuggestionId(3)));

        app.apply(Action::Next);
        assert_eq!(app.selected_suggestion().map(|s| s.id), Some(SuggestionId(1)));
    }

    #[test]
    fn test_accept_selected_updates_text_and_status() {
        let mut app = app();
        app.apply(Action::Next);

        assert!(app.apply(Action::Accept));

        assert_eq!(app.final_text(), "one dos three");
        assert_eq!(app.status(), "accepted #2");
        assert_eq!(app.selected_suggestion().map(|s| s.id), Some(SuggestionId(2)));
        assert!(app.view().can_undo);
    }

    #[test]
    fn test_resolving_twice_reports_error() {
        let mut app = app();
        app.apply(Action::Reject);

        app.apply(Action::Accept);

        assert!(app.status().starts_with("Error:"));
        assert_eq!(app.final_text(), "one two three");
    }

    #[test]
    fn test_accept_all_then_undo_redo() {
        let mut app = app();

        app.apply(Action::AcceptAll);
        assert_eq!(app.final_text(), "uno dos tres");
        assert_eq!(app.status(), "accepted 3 suggestions");

        app.apply(Action::Undo);
        assert_eq!(app.final_text(), "one two three");

        app.apply(Action::Redo);
        assert_eq!(app.final_text(), "uno dos tres");
        assert!(app.apply(Action::Redo));
        assert!(app.status().starts_with("Error:"));
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut app = app();

        assert!(!app.apply(Action::Quit));
    }

    #[test]
    fn test_segments_mark_pending_and_selected() {
        let app = app();

        let segments = app.segments();

        assert_eq!(
            segments,
            vec![
                Segment::new("one".to_string(), SegmentKind::Selected),
                Segment::new(" ".to_string(), SegmentKind::Plain),
                Segment::new("two".to_string(), SegmentKind::Pending),
                Segment::new(" ".to_string(), SegmentKind::Plain),
                Segment::new("three".to_string(), SegmentKind::Pending),
            ]
        );
    }

    #[test]
    fn test_segments_skip_resolved_spans() {
        let mut app = app();
        app.apply(Action::Accept);
        app.apply(Action::Next);
        app.apply(Action::Next);
        app.apply(Action::Reject);

        let segments = app.segments();

        assert_eq!(
            segments,
            vec![
                Segment::new("uno ".to_string(), SegmentKind::Plain),
                Segment::new("two".to_string(), SegmentKind::Pending),
                Segment::new(" three".to_string(), SegmentKind::Plain),
            ]
        );
    }

    #[test]
    fn test_segment_text_handles_multibyte() {
        let suggestion = Suggestion::new(1, 2..4, "世界", "world");

        let segments = segment_text("a 世界 b", std::iter::once(&suggestion), None);

        assert_eq!(
            segments,
            vec![
                Segment::new("a ".to_string(), SegmentKind::Plain),
                Segment::new("世界".to_string(), SegmentKind::Pending),
                Segment::new(" b".to_string(), SegmentKind::Plain),
            ]
        );
    }

    #[test]
    fn test_history_hint() {
        let mut app = app();
        assert_eq!(app.history_hint(), "[- | -] rev 0");

        app.apply(Action::Accept);

        assert_eq!(app.history_hint(), "[undo | -] rev 1");
    }
}
