/*!
 * Word-count partitioning for secondary-language captions.
 *
 * The secondary caption is cut into a fixed number of slots so that it can be
 * paired with the sentences of the primary caption. Words are whitespace runs;
 * no attempt is made to respect sentence or character boundaries.
 */

use log::debug;

/// Split `text` into exactly `count` slots of roughly equal word count.
///
/// Every slot receives `ceil(words / count)` consecutive words, so trailing
/// slots may be empty. Blank text yields `count` empty strings and a `count` of
/// zero yields no slots.
pub fn split_by_count(text: &str, count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new(); count];
    }

    let per_slot = words.len().div_ceil(count);
    let mut slots: Vec<String> = words
        .chunks(per_slot)
        .map(|chunk| chunk.join(" "))
        .collect();

    if slots.len() > count {
        // Fold the overflow into the final slot.
        let overflow = slots.split_off(count).join(" ");
        if let Some(last) = slots.last_mut() {
            if !last.is_empty() {
                last.push(' ');
            }
            last.push_str(&overflow);
        }
    }

    slots.resize(count, String::new());

    debug!(
        "Partitioned {} words into {} slots of up to {} words",
        words.len(),
        count,
        per_slot
    );

    slots
}
