//! Tokenizer integration tests

use truesight_parser::{QuestionTokenizer, Word};

fn texts(words: &[Word]) -> Vec<&str> {
    words.iter().map(|w| w.text.as_str()).collect()
}

#[test]
fn punctuation_and_possessives_stripped() {
    let words = QuestionTokenizer::tokenize("what is disruptor's glimpse cooldown?");
    assert_eq!(
        texts(&words),
        vec!["what", "is", "disruptor", "glimpse", "cooldown"]
    );
}

#[test]
fn curly_apostrophe_possessive() {
    let words = QuestionTokenizer::tokenize("lion\u{2019}s hex");
    assert_eq!(texts(&words), vec!["lion", "hex"]);
}

#[test]
fn offsets_point_into_text() {
    let text = "  who   counters (meepo)?";
    for word in QuestionTokenizer::tokenize(text) {
        assert!(text[word.offset..].starts_with(&word.text));
    }
}

#[test]
fn hyphenated_names_stay_whole() {
    let words = QuestionTokenizer::tokenize("is anti-mage good");
    assert_eq!(texts(&words), vec!["is", "anti-mage", "good"]);
}

#[test]
fn blank_text_has_no_words() {
    assert!(QuestionTokenizer::tokenize(" \t ").is_empty());
    assert!(QuestionTokenizer::tokenize("").is_empty());
}
