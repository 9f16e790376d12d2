//! Field post-processing

/// Separators seen between skills in the wild
const SKILL_SEPARATORS: &[char] = &['•', '·', '●', '▪', ',', ';', '|', '\n'];

const ELLIPSIS: &str = "...";

/// Split a skills blob on bullet-style separators and rejoin as "a, b, c"
pub fn normalize_skills(raw: &str) -> String {
    raw.split(SKILL_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collapse whitespace to single spaces
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace and cap the length at `cap` characters.
///
/// A capped summary ends at the last sentence end within the cap, or the
/// last period of any kind, or the last space, or exactly at the cap, and
/// gets an ellipsis appended.
pub fn summarize(raw: &str, cap: usize) -> String {
    let text = collapse_whitespace(raw);
    if text.chars().count() <= cap {
        return text;
    }

    let head: String = text.chars().take(cap).collect();
    let cut = if let Some(dot) = last_sentence_end(&head) {
        &head[..dot + 1]
    } else if let Some(dot) = head.rfind('.') {
        &head[..dot + 1]
    } else if let Some(space) = head.rfind(' ') {
        head[..space].trim_end()
    } else {
        head.as_str()
    };

    format!("{}{}", cut, ELLIPSIS)
}

/// Byte index of the last '.' that is followed by whitespace or ends `head`.
/// Periods inside "Node.js", "3.5" or URLs are not sentence ends.
fn last_sentence_end(head: &str) -> Option<usize> {
    head.match_indices('.')
        .map(|(i, _)| i)
        .filter(|&i| head[i + 1..].chars().next().map_or(true, char::is_whitespace))
        .last()
}
