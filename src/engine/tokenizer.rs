/// Normalize raw text into comparable word tokens.
///
/// Lowercases the input, replaces every character that is not a letter,
/// digit, whitespace, apostrophe, or hyphen with whitespace, collapses
/// whitespace runs, strips leading/trailing apostrophes and hyphens per
/// word, and drops empties. Total and idempotent for any input, including
/// the empty string.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '\'' || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(|word| word.trim_matches(|c| c == '\'' || c == '-'))
        .filter(|word| !word.is_empty())
        .map(|word| word.to_string())
        .collect()
}
