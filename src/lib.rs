// Prism: keyword, theme, and sentiment signal extraction for text corpora
//
// This is the library root. Each module corresponds to a stage of the
// signal-extraction pipeline, plus the shared math and output layers.

pub mod config;
pub mod corpus;
pub mod keywords;
pub mod math;
pub mod output;
pub mod phrases;
pub mod pipeline;
pub mod records;
pub mod sentiment;
pub mod themes;
