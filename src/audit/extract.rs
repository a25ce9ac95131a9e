// ABOUTME: Final-answer extraction - a priority-ordered, depth-first search
// ABOUTME: for the most plausible human-readable text in a Response.

use super::Response;
use super::response::lookup;

/// Text of this many characters or more is treated as a raw tool dump.
pub const MAX_CANDIDATE_CHARS: usize = 8000;

/// Record keys probed before any other value, in order.
pub const PRIORITY_KEYS: [&str; 6] = ["content", "text", "message", "output", "messages", "result"];

/// Attributes of a top-level object probed before the generic search.
pub const WRAPPER_ATTRS: [&str; 4] = ["result", "output", "content", "messages"];

/// Extract the final answer from a subagent response.
pub fn extract_final_text(response: &Response) -> Option<String> {
    if let Response::Object(object) = response {
        let found = WRAPPER_ATTRS
            .iter()
            .filter_map(|attr| object.attr(attr))
            .find_map(find_text);
        if found.is_some() {
            return found;
        }
    }
    find_text(response)
}

/// Depth-first search for candidate text.
///
/// Records try [`PRIORITY_KEYS`] first and then every value in order;
/// sequences are searched from the last element backwards.
pub fn find_text(value: &Response) -> Option<String> {
    match value {
        Response::Null => None,
        Response::Text(text) => candidate(text),
        Response::Message(message) => candidate(&message.text()),
        Response::Record(entries) => PRIORITY_KEYS
            .iter()
            .filter_map(|key| lookup(entries, key))
            .find_map(find_text)
            .or_else(|| entries.iter().find_map(|(_, v)| find_text(v))),
        Response::Sequence(items) => items.iter().rev().find_map(find_text),
        Response::Object(_) | Response::Other(_) => {
            // Opaque ids and codes have no whitespace; prose does.
            let rendered = value.to_string();
            let rendered = rendered.trim();
            if rendered.contains([' ', '\n']) {
                candidate(rendered)
            } else {
                None
            }
        }
    }
}

fn candidate(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text.chars().count() >= MAX_CANDIDATE_CHARS {
        return None;
    }
    Some(text.to_string())
}
