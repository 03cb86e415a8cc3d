use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StubError>;

#[derive(Error, Debug)]
pub enum StubError {
    // Filesystem errors keep the path that failed
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read schedule input from {origin}: {source}")]
    Input {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    // Strict mode errors
    #[error("Line {line_number}: {month}-{day} is not a valid date in {year}")]
    InvalidDate {
        line_number: usize,
        year: i32,
        month: u32,
        day: String,
    },

    #[error("Line {line_number}: {date} is a {actual}, but the schedule says {expected}")]
    WeekdayMismatch {
        line_number: usize,
        date: chrono::NaiveDate,
        expected: String,
        actual: String,
    },
}

impl StubError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StubError::Io {
            path: path.into(),
            source,
        }
    }
}
