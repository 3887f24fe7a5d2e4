// Keyword extraction — corpus-wide TF-IDF and per-document YAKE,
// merged into one ranked table with corpus usage statistics.

pub mod aggregate;
pub mod tfidf;
pub mod tokenizer;
pub mod yake;
