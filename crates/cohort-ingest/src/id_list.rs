//! Participant identifier lists: one identifier per line, no header.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use cohort_model::{ExclusionSet, ParticipantId};

use crate::error::{IngestError, Result};

/// Reads the first tab-delimited column of every non-blank line.
pub fn read_id_list(path: &Path) -> Result<Vec<ParticipantId>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let mut ids = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let Some(raw) = record.get(0) else {
            continue;
        };
        let trimmed = raw.trim().trim_matches('\u{feff}');
        if trimmed.is_empty() {
            continue;
        }
        let id = trimmed
            .parse::<ParticipantId>()
            .map_err(|_| IngestError::InvalidValue {
                field: "participant identifier".to_string(),
                value: raw.to_string(),
                path: path.to_path_buf(),
                line: idx + 1,
            })?;
        ids.push(id);
    }
    debug!(path = %path.display(), count = ids.len(), "identifier list read");
    Ok(ids)
}

/// Reads an exclusion-list file into an [`ExclusionSet`].
pub fn read_exclusion_set(path: &Path) -> Result<ExclusionSet> {
    Ok(read_id_list(path)?.into_iter().collect())
}

/// Writes identifiers one per line, in the given order, without a header.
pub fn write_id_list<I>(path: &Path, ids: I) -> Result<()>
where
    I: IntoIterator<Item = ParticipantId>,
{
    let csv_error = |e: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;
    for id in ids {
        writer.write_record([id.to_string()]).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
