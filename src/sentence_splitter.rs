/*!
 * Sentence splitting for primary-language captions.
 *
 * Sentences are delimited by the full-width terminal marks `。`, `！` and `？`.
 * A run of consecutive marks (for example `？！`) is a single boundary and stays
 * attached to the sentence it closes.
 */

// @const: Terminal punctuation marks
pub const TERMINAL_MARKS: [char; 3] = ['。', '！', '？'];

// @const: Mark appended to fragments that end without one
pub const DEFAULT_TERMINAL_MARK: char = '。';

/// Returns true when `c` closes a sentence
pub fn is_terminal_mark(c: char) -> bool {
    TERMINAL_MARKS.contains(&c)
}

/// Split a caption into sentences.
///
/// Blank text yields no sentences. Text without any terminal mark is returned
/// trimmed as a single sentence, untouched. Otherwise every fragment is trimmed,
/// empty fragments are dropped, and a fragment that does not end in a terminal
/// mark gets a single `。` appended.
pub fn split_sentences(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if !trimmed.chars().any(is_terminal_mark) {
        return vec![trimmed.to_string()];
    }

    fragments(text)
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            let mut sentence = fragment.to_string();
            if !sentence.ends_with(is_terminal_mark) {
                sentence.push(DEFAULT_TERMINAL_MARK);
            }
            sentence
        })
        .collect()
}

// @scans: Byte ranges between boundaries, left to right
fn fragments(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last_boundary = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !is_terminal_mark(c) {
            continue;
        }

        let followed_by_mark = chars.peek().is_some_and(|&(_, next)| is_terminal_mark(next));
        if !followed_by_mark {
            let boundary = index + c.len_utf8();
            pieces.push(&text[last_boundary..boundary]);
            last_boundary = boundary;
        }
    }

    if last_boundary < text.len() {
        pieces.push(&text[last_boundary..]);
    }

    pieces
}
