// Answer pad input
//
// - `action`: keypad actions and their default key bindings
// - `buffer`: the typed answer shown on the display

pub mod action;
pub mod buffer;

// Re-export commonly used types
#[allow(unused_imports)]
pub use action::{action_for_key, actions_for_text, Action};
pub use buffer::AnswerBuffer;
