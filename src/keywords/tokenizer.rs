// Term tokenization shared by both TF-IDF fits (corpus- and phrase-level).
//
// Follows the common vectorizer contract: lowercase word tokens of at
// least two word characters, stopwords dropped first, then unigrams and
// bigrams formed over the surviving token sequence. Dropping stopwords
// before forming bigrams means "climate and energy" yields the bigram
// "climate energy".

use std::collections::HashSet;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

pub struct TermTokenizer {
    token_re: Regex,
    stopwords: HashSet<String>,
}

impl TermTokenizer {
    /// Tokenizer with the standard English stopword list.
    pub fn english() -> Self {
        Self {
            // Pattern is a literal; compilation cannot fail.
            token_re: Regex::new(r"\b\w\w+\b").unwrap(),
            stopwords: get(LANGUAGE::English).into_iter().collect(),
        }
    }

    /// Lowercase word tokens (two or more word characters) with
    /// stopwords removed, in text order.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_re
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .filter(|t| !self.stopwords.contains(t))
            .collect()
    }

    /// Unigrams plus bigrams over the surviving tokens. Bigrams join
    /// consecutive tokens with a single space.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokens(text);
        let mut terms = tokens.clone();
        terms.extend(tokens.windows(2).map(|w| w.join(" ")));
        terms
    }
}
