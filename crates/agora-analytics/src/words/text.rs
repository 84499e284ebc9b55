//! HTML stripping and tokenization.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAG_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

static ENTITY_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").ok());

static WORD_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\p{L}+").ok());

fn decode_entity(caps: &Captures<'_>) -> String {
    let name = &caps[1];
    let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ => None,
        }
    };
    match decoded {
        Some(c) => c.to_string(),
        None => caps[0].to_string(),
    }
}

/// Markup removed, entities decoded, whitespace collapsed and trimmed.
pub fn clean_text(html: &str) -> String {
    let stripped = match TAG_RE.as_ref() {
        Some(re) => re.replace_all(html, " "),
        None => Cow::Borrowed(html),
    };
    let decoded = match ENTITY_RE.as_ref() {
        Some(re) => re.replace_all(&stripped, decode_entity).into_owned(),
        None => stripped.into_owned(),
    };
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercased letter runs of at least `min_len` characters.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    let Some(re) = WORD_RE.as_ref() else {
        return Vec::new();
    };
    re.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.chars().count() >= min_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_become_word_breaks() {
        assert_eq!(clean_text("<p>one</p><p>two</p>"), "one two");
        assert_eq!(clean_text("a <b>bold</b> move"), "a bold move");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(clean_text("fish &amp; chips&nbsp;&#233;t&#xE9;"), "fish & chips été");
        assert_eq!(clean_text("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn tokenize_lowercases_and_filters_short_words() {
        let words = tokenize("Wind power, at NIGHT: l'énergie!", 3);
        assert_eq!(words, vec!["wind", "power", "night", "énergie"]);
    }

    #[test]
    fn digits_and_punctuation_split_words() {
        let words = tokenize("co2-free grid2030", 1);
        assert_eq!(words, vec!["co", "free", "grid"]);
    }
}
