pub mod suggestion;
pub mod view;

pub use suggestion::{Decision, Suggestion, SuggestionId, SuggestionStatus};
pub use view::DocumentView;
