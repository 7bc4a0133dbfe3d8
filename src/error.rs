use std::path::PathBuf;
use thiserror::Error;

/// The input file is missing or unreadable. Fatal: aborts the whole run.
#[derive(Debug, Error)]
#[error("cannot read {}: {source}", .path.display())]
pub struct FileAccessError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl FileAccessError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// A single field of a single record failed numeric coercion.
///
/// Contained at the smallest scope: the value is dropped from that one
/// metric's series and nothing else. The record itself survives, as does
/// every other field in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldCoercionError {
    #[error("field `{0}` is absent")]
    Missing(String),
    #[error("field `{field}` value {value:?} is not a valid {expected}")]
    Invalid {
        field: String,
        value: String,
        expected: &'static str,
    },
}

/// A scope (one problem group, or the whole run) yielded zero usable samples
/// for a mandatory metric. The scope is omitted from output with a note.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no usable {metric} samples for {scope}")]
pub struct NoDataError {
    pub scope: String,
    pub metric: String,
}

impl NoDataError {
    pub fn new(scope: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            metric: metric.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_coercion_error_display() {
        let err = FieldCoercionError::Invalid {
            field: "cost".to_string(),
            value: "abc".to_string(),
            expected: "float",
        };
        assert_eq!(err.to_string(), "field `cost` value \"abc\" is not a valid float");

        let err = FieldCoercionError::Missing("wall_ns".to_string());
        assert_eq!(err.to_string(), "field `wall_ns` is absent");
    }

    #[test]
    fn test_no_data_error_display() {
        let err = NoDataError::new("overall", "wall_time_ms");
        assert_eq!(err.to_string(), "no usable wall_time_ms samples for overall");
    }

    #[test]
    fn test_file_access_error_mentions_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = FileAccessError::new("results/run1.csv", io);
        assert!(err.to_string().contains("results/run1.csv"));
    }
}
