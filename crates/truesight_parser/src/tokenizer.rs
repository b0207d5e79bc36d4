//! Question tokenization.
//!
//! Converts question text into whole words for word-level matching.

/// Characters stripped from both ends of every word.
const TRIMMED: &[char] = &['?', '.', ',', '!', ';', ':', '"', '(', ')'];

/// A word from a question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    /// The word without surrounding punctuation or possessive suffix
    pub text: String,
    /// Byte offset of the word in the tokenized text
    pub offset: usize,
}

/// Tokenizes question text.
pub struct QuestionTokenizer;

impl QuestionTokenizer {
    /// Tokenizes text into words.
    ///
    /// - Splits on whitespace
    /// - Strips terminal punctuation (`?`, `.`, `,`, `!` and friends)
    /// - Drops a possessive `'s` so "disruptor's" matches "disruptor"
    /// - Records each word's byte offset, so positions can be compared with
    ///   substring offsets in the same text
    ///
    /// The caller is expected to pass already lowercased text.
    #[must_use]
    pub fn tokenize(text: &str) -> Vec<Word> {
        let mut words = Vec::new();
        let mut start: Option<usize> = None;

        for (i, ch) in text.char_indices() {
            if ch.is_whitespace() {
                if let Some(s) = start.take() {
                    Self::push_word(&mut words, &text[s..i], s);
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }

        // Flush final word
        if let Some(s) = start {
            Self::push_word(&mut words, &text[s..], s);
        }

        words
    }

    fn push_word(words: &mut Vec<Word>, raw: &str, offset: usize) {
        let leading = raw.len() - raw.trim_start_matches(TRIMMED).len();
        let mut word = raw.trim_matches(TRIMMED);
        for suffix in ["'s", "\u{2019}s"] {
            if let Some(stripped) = word.strip_suffix(suffix) {
                word = stripped;
                break;
            }
        }
        if !word.is_empty() {
            words.push(Word {
                text: word.to_string(),
                offset: offset + leading,
            });
        }
    }
}
