use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Result, StubError};

/// Content written to every stub, regardless of the schedule line.
pub const FRONT_MATTER: &str = "---\nlayout: post\n---\n";

/// One matched line of the schedule text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleLine {
    pub line_number: usize,
    pub weekday: String,
    pub month: u32,
    /// Month as it appeared in the text, e.g. `"1"` or `"01"`
    pub month_text: String,
    /// Day as it appeared in the text; never re-padded
    pub day: String,
    pub title: Option<String>,
}

impl ScheduleLine {
    /// `<month> <day> <title>` with `None` standing in for a missing title.
    pub fn diagnostic(&self) -> String {
        format!(
            "{} {} {}",
            self.month_text,
            self.day,
            self.title.as_deref().unwrap_or("None")
        )
    }

    /// Month is zero-padded to two digits, day is kept verbatim.
    pub fn stub_file_name(&self, year: i32) -> String {
        format!("{}-{:02}-{}.md", year, self.month, self.day)
    }

    /// Check the line against the calendar: the date must exist in `year`
    /// and the weekday token must match it.
    pub fn validate(&self, year: i32) -> Result<NaiveDate> {
        let date = self
            .day
            .parse::<u32>()
            .ok()
            .and_then(|day| NaiveDate::from_ymd_opt(year, self.month, day))
            .ok_or_else(|| StubError::InvalidDate {
                line_number: self.line_number,
                year,
                month: self.month,
                day: self.day.clone(),
            })?;

        let actual = date.weekday().to_string();
        if !actual.eq_ignore_ascii_case(&self.weekday) {
            return Err(StubError::WeekdayMismatch {
                line_number: self.line_number,
                date,
                expected: self.weekday.clone(),
                actual,
            });
        }

        Ok(date)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StubFile {
    pub path: PathBuf,
    pub content: String,
}

impl StubFile {
    pub fn for_line(posts_dir: &Path, year: i32, line: &ScheduleLine) -> Self {
        Self {
            path: posts_dir.join(line.stub_file_name(year)),
            content: FRONT_MATTER.to_string(),
        }
    }
}

/// A line that matched but could not be turned into a stub.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StubFailure {
    pub line_number: usize,
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Outcome of one generator pass.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GenerateReport {
    pub written: Vec<PathBuf>,
    pub skipped_lines: usize,
    pub failures: Vec<StubFailure>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
