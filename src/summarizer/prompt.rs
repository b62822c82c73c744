use crate::summarizer::DetailLevel;

/// System message sent with every summarization request
pub const SYSTEM_PROMPT: &str = "You are a professional documentation summarization assistant.";

/// Returns at most `max_chars` characters of `text`, cut on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Builds the user prompt for a page
///
/// The page text is truncated to `max_input_chars` characters first.
pub fn build_prompt(text: &str, level: DetailLevel, max_input_chars: usize) -> String {
    format!(
        "Based on the following text, {}:\n\n{}",
        level.instruction(),
        truncate_chars(text, max_input_chars)
    )
}
