use crate::models::ScheduleLine;
use regex::Regex;
use tracing::trace;

/// Matches `<3-char token> <month>-<day>` at the start of a line, with an
/// optional `: <title>` suffix. Anything else after the date is ignored.
/// Month and day are ASCII digits only; other Unicode digits do not match.
const LINE_PATTERN: &str = r"^(\w{3}) ([0-9]{1,2})-([0-9]{1,2})(: (.*))?";

/// Line boundaries: `\r\n` counts once, and a lone `\r`, vertical tab, form
/// feed, file/group/record separators, NEL and the Unicode line and paragraph
/// separators each end a line too.
const LINE_BREAK_PATTERN: &str = "\r\n|[\n\r\x0B\x0C\x1C\x1D\x1E\u{85}\u{2028}\u{2029}]";

#[derive(Debug, Clone)]
pub struct ScheduleParser {
    line_regex: Regex,
    line_break: Regex,
}

impl Default for ScheduleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleParser {
    pub fn new() -> Self {
        Self {
            line_regex: Regex::new(LINE_PATTERN).expect("schedule line pattern is valid"),
            line_break: Regex::new(LINE_BREAK_PATTERN).expect("line break pattern is valid"),
        }
    }

    /// Parse a single line. Returns `None` when the line does not have the
    /// schedule shape; that is not an error.
    pub fn parse_line(&self, line_number: usize, line: &str) -> Option<ScheduleLine> {
        let captures = self.line_regex.captures(line)?;

        let month_text = captures.get(2)?.as_str();
        // At most two ASCII digits, so this cannot overflow
        let month = month_text.parse::<u32>().ok()?;

        Some(ScheduleLine {
            line_number,
            weekday: captures.get(1)?.as_str().to_string(),
            month,
            month_text: month_text.to_string(),
            day: captures.get(3)?.as_str().to_string(),
            title: captures.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Split `text` into lines. A trailing line break does not start an
    /// extra empty line, and empty text has no lines.
    pub fn split_lines<'t>(&self, text: &'t str) -> Vec<&'t str> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut lines: Vec<&str> = self.line_break.split(text).collect();
        // Only a final line break leaves an empty last piece
        if lines.last() == Some(&"") {
            lines.pop();
        }
        lines
    }

    /// Parse every matching line of `text`. Line numbers are 1-based.
    pub fn parse(&self, text: &str) -> Vec<ScheduleLine> {
        self.split_lines(text)
            .into_iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let parsed = self.parse_line(index + 1, line);
                if parsed.is_none() {
                    trace!("Skipping line {}: {:?}", index + 1, line);
                }
                parsed
            })
            .collect()
    }
}
