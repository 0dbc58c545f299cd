//! Sentence and word tokenization for scientific English.
//!
//! Sentence splitting is rule based: a sentence ends at `.`, `!` or `?`
//! (plus any closing quotes or brackets) followed by whitespace and a
//! character that can open a sentence. Known abbreviations and
//! single-letter initials never end a sentence, and a line break always
//! does. Callers are expected to run [`normalize_figure_abbreviations`]
//! first so that `Fig.` does not split a sentence in two.

use std::borrow::Cow;

/// Abbreviations (lowercase, without the final period) that do not end a
/// sentence.
const ABBREVIATIONS: &[&str] = &[
    "al", "approx", "ca", "cf", "ch", "dr", "eq", "eqs", "etc", "fig", "figs", "inc", "jr",
    "ltd", "mr", "mrs", "ms", "prof", "ref", "refs", "resp", "sec", "sr", "st", "suppl", "tab",
    "vol", "vs",
];

/// Replace `Fig.` with `Fig` and `FIG.` with `FIG`.
pub fn normalize_figure_abbreviations(text: &str) -> Cow<'_, str> {
    if text.contains("Fig.") || text.contains("FIG.") {
        Cow::Owned(text.replace("Fig.", "Fig").replace("FIG.", "FIG"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Split text into trimmed, non-empty sentences in reading order.
pub fn tokenize_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for line in text.lines() {
        split_line(line, &mut sentences);
    }
    sentences
}

fn split_line(line: &str, out: &mut Vec<String>) {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        if !is_terminator(c) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && (is_terminator(chars[j].1) || is_closer(chars[j].1)) {
            j += 1;
        }

        if j < chars.len() && chars[j].1.is_whitespace() {
            let mut k = j;
            while k < chars.len() && chars[k].1.is_whitespace() {
                k += 1;
            }
            let breaks = k < chars.len()
                && can_open_sentence(chars[k].1)
                && !(c == '.' && ends_with_abbreviation(&line[start..offset]));
            if breaks {
                push_trimmed(out, &line[start..chars[j].0]);
                start = chars[k].0;
                i = k;
                continue;
            }
        }
        i = j;
    }

    push_trimmed(out, &line[start..]);
}

fn push_trimmed(out: &mut Vec<String>, sentence: &str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        out.push(sentence.to_string());
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '"' | '\'' | '\u{201d}' | '\u{2019}')
}

fn can_open_sentence(c: char) -> bool {
    c.is_uppercase()
        || c.is_ascii_digit()
        || matches!(c, '(' | '[' | '"' | '\'' | '\u{201c}' | '\u{2018}')
}

/// Whether the word right before a period is an abbreviation or an initial.
fn ends_with_abbreviation(prefix: &str) -> bool {
    let Some(word) = prefix.split_whitespace().last() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        return false;
    }

    let mut chars = word.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        return first.is_alphabetic();
    }

    // e.g. / i.e. / U.S.
    if word.contains('.') && word.chars().all(|c| c.is_alphabetic() || c == '.') {
        return true;
    }

    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Split a sentence into word and punctuation tokens.
///
/// A word is a run of alphanumerics; `-`, `'` and `.` are kept inside a word
/// when both neighbours are alphanumeric (`x-axis`, `3.5`). Every other
/// non-whitespace character becomes its own token.
pub fn tokenize_words(sentence: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = sentence.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if !c.is_alphanumeric() {
            tokens.push(&sentence[offset..offset + c.len_utf8()]);
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() {
            let cj = chars[j].1;
            if cj.is_alphanumeric() {
                j += 1;
            } else if matches!(cj, '-' | '\'' | '.')
                && chars.get(j + 1).is_some_and(|(_, next)| next.is_alphanumeric())
            {
                j += 2;
            } else {
                break;
            }
        }
        let end = chars.get(j).map_or(sentence.len(), |(o, _)| *o);
        tokens.push(&sentence[offset..end]);
        i = j;
    }

    tokens
}
