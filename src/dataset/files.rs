//! CSV reading and atomic writing of headline datasets.
//!
//! Both datasets share one schema:
//!
//! ```text
//! headline,source,collection_date
//! Storm hits coast,FoxNews,initial
//! New bill passes,NBC,2024-06-01
//! ```
//!
//! Columns are located by header name and extra columns are ignored. The
//! historical file is always rewritten with exactly these three columns.

use crate::error::DatasetError;
use crate::models::{CollectionDate, HeadlineRecord};
use crate::normalize::clean_text;
use crate::utils::ensure_parent_dir;
use csv::{ReaderBuilder, StringRecord, Writer};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

pub const HEADER: [&str; 3] = ["headline", "source", "collection_date"];

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
}

/// Parse dataset rows from any reader.
///
/// `default_date` is used when the file has no `collection_date` column.
/// Headlines are whitespace-collapsed on the way in; rows left blank are
/// skipped.
pub fn read_records<R: Read>(
    reader: R,
    path: &Path,
    default_date: CollectionDate,
) -> Result<Vec<HeadlineRecord>, DatasetError> {
    let invalid = |line: u64, reason: String| DatasetError::InvalidRow {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers().map_err(|e| invalid(1, e.to_string()))?.clone();

    let missing = |column: &'static str| DatasetError::MissingColumns {
        path: path.to_path_buf(),
        column,
    };
    let headline_idx = column_index(&headers, HEADER[0]).ok_or_else(|| missing(HEADER[0]))?;
    let source_idx = column_index(&headers, HEADER[1]).ok_or_else(|| missing(HEADER[1]))?;
    let date_idx = column_index(&headers, HEADER[2]);

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            invalid(line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let headline = clean_text(record.get(headline_idx).unwrap_or(""));
        if headline.is_empty() {
            warn!(path = %path.display(), line, "Skipping row with blank headline");
            continue;
        }
        let source = record
            .get(source_idx)
            .ok_or_else(|| invalid(line, "missing source field".to_string()))?
            .parse()
            .map_err(|e| invalid(line, e))?;
        let collection_date = match date_idx.and_then(|idx| record.get(idx)) {
            Some(raw) if !raw.trim().is_empty() => raw.parse().map_err(|e| invalid(line, e))?,
            _ => default_date,
        };

        records.push(HeadlineRecord::new(headline, source, collection_date));
    }
    Ok(records)
}

/// Load the read-only seed dataset.
///
/// Any failure (absent file, bad header, bad row) is [`DatasetError::SeedMissing`].
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_seed(path: &Path) -> Result<Vec<HeadlineRecord>, DatasetError> {
    let seed_missing = |reason: String| DatasetError::SeedMissing {
        path: path.to_path_buf(),
        reason,
    };
    let file = File::open(path).map_err(|e| seed_missing(e.to_string()))?;
    let records = read_records(file, path, CollectionDate::Initial)
        .map_err(|e| seed_missing(e.to_string()))?;
    info!(rows = records.len(), "Loaded seed dataset (read-only)");
    Ok(records)
}

/// Load the historical dataset, `None` if it does not exist yet.
///
/// An existing file with no content at all reads as an empty history.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_historical(path: &Path) -> Result<Option<Vec<HeadlineRecord>>, DatasetError> {
    let unreadable = |reason: String| DatasetError::HistoricalUnreadable {
        path: path.to_path_buf(),
        reason,
    };
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No historical dataset yet; starting from the seed");
            return Ok(None);
        }
        Err(e) => return Err(unreadable(e.to_string())),
    };
    if text.trim().is_empty() {
        warn!("Historical dataset is empty; starting from the seed");
        return Ok(Some(Vec::new()));
    }
    let records = read_records(text.as_bytes(), path, CollectionDate::Unknown)
        .map_err(|e| unreadable(e.to_string()))?;
    info!(rows = records.len(), "Loaded historical dataset");
    Ok(Some(records))
}

/// Serialize records with the standard header.
pub fn write_records<W: Write>(writer: W, records: &[HeadlineRecord]) -> io::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for record in records {
        let date = record.collection_date.to_string();
        wtr.write_record([record.headline.as_str(), record.source.label(), date.as_str()])?;
    }
    wtr.flush()
}

/// Replace the dataset at `path` with `records`.
///
/// The rows go to a temporary file next to `path`, which is then renamed over
/// it, so readers see either the old or the new content and never a partial
/// file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = records.len()))]
pub fn write_atomic(path: &Path, records: &[HeadlineRecord]) -> Result<(), DatasetError> {
    replace_file(path, |file| write_records(file, records)).map_err(|source| {
        DatasetError::WriteFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!("Wrote historical dataset");
    Ok(())
}

/// Fill a temporary sibling of `path` with `fill`, then rename it into place.
///
/// If `fill` fails the temporary file is dropped and `path` is not touched.
fn replace_file<F>(path: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&File) -> io::Result<()>,
{
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    fill(tmp.as_file())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
