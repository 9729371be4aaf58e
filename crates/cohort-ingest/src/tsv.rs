//! Tab-delimited table input/output.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};

use crate::error::{IngestError, Result};

/// Reads a tab-delimited file with a header row into a DataFrame.
///
/// Empty cells become nulls. The schema is inferred from every row so that a
/// late non-numeric value does not abort the read.
pub fn read_tsv_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|options| options.with_separator(b'\t'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Writes a DataFrame as a tab-delimited file with a header row.
pub fn write_tsv_table(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b'\t')
        .finish(df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_tsv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_tsv_table_empty_cells_are_null() {
        let file = create_temp_tsv("eid\tp30780_i0\n1\t3.5\n2\t\n");
        let df = read_tsv_table(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        assert_eq!(df.column("p30780_i0").unwrap().null_count(), 1);
    }

    #[test]
    fn test_read_tsv_table_missing_file() {
        let result = read_tsv_table(Path::new("/nonexistent/participants.tsv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_write_then_read_keeps_header() {
        let file = create_temp_tsv("s\tLDL\n10\t2.5\n11\t3\n");
        let mut df = read_tsv_table(file.path()).unwrap();
        let out = NamedTempFile::new().unwrap();
        write_tsv_table(out.path(), &mut df).unwrap();

        let text = std::fs::read_to_string(out.path()).unwrap();
        assert!(text.starts_with("s\tLDL\n"));
        assert_eq!(read_tsv_table(out.path()).unwrap().height(), 2);
    }
}
