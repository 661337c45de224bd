use crate::session::{ResponseType, SessionState};

pub const PLACEHOLDER_MESSAGE: &str = "Your generated content will appear here.";

/// What the result area should show. Produced by [`resolve`], consumed by
/// whatever surface is doing the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display<'a> {
    Loading,
    Error(&'a str),
    /// Generated text, to be shown preformatted with whitespace preserved.
    Text(&'a str),
    /// An image reference for the display surface to load.
    Image(&'a str),
    Placeholder,
}

/// Maps session state to a display description. Strict priority chain:
/// loading, then error, then result, then placeholder.
pub fn resolve(state: &SessionState) -> Display<'_> {
    if state.loading {
        Display::Loading
    } else if let Some(error) = &state.error {
        Display::Error(error)
    } else if let Some(result) = &state.result {
        match state.response_type {
            ResponseType::Text => Display::Text(result),
            ResponseType::Image => Display::Image(result),
        }
    } else {
        Display::Placeholder
    }
}
