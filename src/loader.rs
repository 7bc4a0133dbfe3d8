//! CSV loader for benchmark result files.
//!
//! Produces raw string records only; numeric interpretation happens later in
//! the aggregation pass.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::FileAccessError;

/// One benchmark trial as read from disk: field name to raw string value.
pub type RawRecord = HashMap<String, String>;

/// Reads all records from a CSV source with a header row.
///
/// Field names and values are whitespace-trimmed. Rows shorter than the
/// header simply lack entries for the trailing fields; extra fields beyond
/// the header are ignored.
pub fn read_records<R: Read>(rdr: R) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(rdr);

    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// Loads an entire benchmark CSV file into memory.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, FileAccessError> {
    let file = File::open(path).map_err(|e| FileAccessError::new(path, e))?;

    let records = read_records(file).map_err(|e| {
        FileAccessError::new(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    debug!(path = %path.display(), records = records.len(), "CSV loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_read_records_basic() {
        let csv = "problem_name,wall_ns,solved\nA,1000000,1\nB,2000000,0\n";
        let records = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["problem_name"], "A");
        assert_eq!(records[0]["wall_ns"], "1000000");
        assert_eq!(records[1]["solved"], "0");
    }

    #[test]
    fn test_read_records_trims_whitespace() {
        let csv = " problem_name , wall_ns \n  A  ,  1000000  \n";
        let records = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0]["problem_name"], "A");
        assert_eq!(records[0]["wall_ns"], "1000000");
    }

    #[test]
    fn test_read_records_short_row_lacks_trailing_fields() {
        let csv = "problem_name,wall_ns,cost\nA,1000000\n";
        let records = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["wall_ns"], "1000000");
        assert!(!records[0].contains_key("cost"));
    }

    #[test]
    fn test_read_records_extra_fields_ignored() {
        let csv = "problem_name,wall_ns\nA,1000000,stray,junk\n";
        let records = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn test_read_records_keeps_values_as_strings() {
        let csv = "problem_name,cost\nA,not_a_number\n";
        let records = read_records(csv.as_bytes()).unwrap();

        assert_eq!(records[0]["cost"], "not_a_number");
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("not/here.csv"));
    }

    #[test]
    fn test_load_records_roundtrip() {
        let path = temp_path("prrtc_analyzer_loader_roundtrip.csv");
        fs::write(&path, "problem_name,wall_ns\nA,1\nB,2\nC,3\n").unwrap();

        let records = load_records(Path::new(&path)).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2]["problem_name"], "C");

        fs::remove_file(&path).unwrap();
    }
}
