//! Pure line-splitting for the text area. Widths count characters.

/// Greedy word wrap on single spaces, hard-splitting words wider than the
/// area. Earlier lines are never re-flowed.
///
/// Splitting an empty string yields one empty line.
pub fn word_break(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut words = text.split(' ');
    let mut lines = Vec::new();
    push_chunks(&mut lines, words.next().unwrap_or_default(), width);

    for word in words {
        let word_len = word.chars().count();
        let last_len = lines.last().map_or(0, |line| line.chars().count());

        if last_len + 1 + word_len <= width {
            append(&mut lines, " ", word);
        } else if word_len > width {
            // Fill what is left of the current line, then chunk the rest.
            let prefix = usize::from(last_len > 0);
            let room = width.saturating_sub(last_len + prefix);
            let rest = if room > 0 {
                let (head, rest) = split_chars(word, room);
                append(&mut lines, if prefix == 1 { " " } else { "" }, head);
                rest
            } else {
                word
            };
            push_chunks(&mut lines, rest, width);
        } else {
            lines.push(word.to_string());
        }
    }
    lines
}

/// Fixed-width slicing: `ceil(len / width)` rows, all full except maybe
/// the last. An empty string yields no rows.
pub fn char_break(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// The last `n` characters of `text`.
pub fn tail(text: &str, n: usize) -> &str {
    let len = text.chars().count();
    let skip = len.saturating_sub(n);
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

fn split_chars(text: &str, at: usize) -> (&str, &str) {
    match text.char_indices().nth(at) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}

fn append(lines: &mut Vec<String>, separator: &str, text: &str) {
    match lines.last_mut() {
        Some(last) => {
            last.push_str(separator);
            last.push_str(text);
        }
        None => lines.push(text.to_string()),
    }
}

fn push_chunks(lines: &mut Vec<String>, word: &str, width: usize) {
    if word.chars().count() <= width {
        lines.push(word.to_string());
        return;
    }
    lines.extend(char_break(word, width));
}
