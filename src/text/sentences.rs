// Sentence splitting for topic excerpts.
//
// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
// when followed by whitespace or the end of the text. A period after a
// common abbreviation or a single initial does not end a sentence.

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "fig", "no", "vol", "pp",
    "e.g", "i.e", "inc", "ltd", "co", "corp", "approx", "dept", "est",
];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}'];

/// Split text into trimmed, non-empty sentences in document order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        current.push(c);
        i += 1;

        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        // Swallow repeated terminators and closing punctuation ("?!", '."').
        while i < chars.len() && (matches!(chars[i], '.' | '!' | '?') || CLOSERS.contains(&chars[i])) {
            current.push(chars[i]);
            i += 1;
        }

        let at_boundary = i >= chars.len() || chars[i].is_whitespace();
        if !at_boundary || (c == '.' && ends_with_abbreviation(&current)) {
            continue;
        }

        push_trimmed(&mut sentences, &current);
        current.clear();
    }

    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Whether the word before the final period is an abbreviation or initial.
fn ends_with_abbreviation(current: &str) -> bool {
    let last_word = current
        .trim_end_matches(|c: char| c == '.' || CLOSERS.contains(&c))
        .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
        .next()
        .unwrap_or("");
    let lower = last_word.to_lowercase();
    if lower.is_empty() {
        return false;
    }
    let single_initial = lower.chars().count() == 1 && lower.chars().all(char::is_alphabetic);
    single_initial || ABBREVIATIONS.contains(&lower.as_str())
}
