// CSV corpus loading.
//
// Reads a headered CSV into column/row form. The only hard requirement is
// a `full_text` column; every other column is carried through untouched so
// the documents artifact can re-emit the original table.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

use super::TEXT_COLUMN;

/// An input corpus exactly as loaded: ordered headers plus string cells.
///
/// Row and column order are preserved end to end so reruns on the same
/// file produce identical artifacts.
#[derive(Debug, Clone)]
pub struct RawCorpus {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawCorpus {
    /// Index of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load a corpus from a headered CSV file.
///
/// Fatal on an unreadable file, malformed CSV, or a missing `full_text`
/// column. Rows shorter than the header pad with empty cells rather than
/// failing; extra cells beyond the header are dropped.
pub fn load_corpus(path: &Path) -> Result<RawCorpus> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open corpus file {}", path.display()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers from {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if !columns.iter().any(|c| c == TEXT_COLUMN) {
        anyhow::bail!(
            "Corpus {} has no '{}' column — found: {}",
            path.display(),
            TEXT_COLUMN,
            columns.join(", ")
        );
    }

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!(
                "Malformed CSV record at data row {} in {}",
                line + 1,
                path.display()
            )
        })?;
        let mut cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        cells.resize(columns.len(), String::new());
        rows.push(cells);
    }

    info!(
        rows = rows.len(),
        columns = columns.len(),
        path = %path.display(),
        "Loaded corpus"
    );

    Ok(RawCorpus { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_basic_corpus() {
        let path = write_temp_csv(
            "prism_loader_basic.csv",
            "title,full_text,Source\nA,hello world,feed\nB,second doc,\n",
        );
        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.columns, vec!["title", "full_text", "Source"]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.rows[0][1], "hello world");
        assert_eq!(corpus.rows[1][2], "");
        assert_eq!(corpus.column_index("full_text"), Some(1));
    }

    #[test]
    fn test_short_rows_pad_as_empty() {
        let path = write_temp_csv(
            "prism_loader_short.csv",
            "title,full_text,Source\nonly title\n",
        );
        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.rows[0], vec!["only title", "", ""]);
    }

    #[test]
    fn test_missing_text_column_fails() {
        let path = write_temp_csv("prism_loader_no_text.csv", "title,body\nA,hello\n");
        let err = load_corpus(&path).unwrap_err();
        assert!(err.to_string().contains("full_text"));
    }

    #[test]
    fn test_missing_file_fails() {
        let path = std::env::temp_dir().join("prism_loader_does_not_exist.csv");
        assert!(load_corpus(&path).is_err());
    }
}
