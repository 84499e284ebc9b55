//! Short plain-text previews of idea definitions.

use crate::words::text::clean_text;

/// Preview length in characters.
pub const PREVIEW_LENGTH: usize = 120;

/// The definition with markup removed, cut to [`PREVIEW_LENGTH`] characters
/// on a word boundary. Truncated previews end with a single space.
pub fn definition_preview(definition: &str) -> String {
    let text = clean_text(definition);
    if text.chars().count() <= PREVIEW_LENGTH {
        return text;
    }
    let head: String = text.chars().take(PREVIEW_LENGTH).collect();
    let cut = match head.rsplit_once(' ') {
        Some((before, _)) if !before.trim_end().is_empty() => before.trim_end(),
        _ => head.as_str(),
    };
    format!("{cut} ")
}
