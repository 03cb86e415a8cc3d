use crate::config::GeneratorConfig;
use crate::models::{GenerateReport, ScheduleLine, StubFailure, StubFile};
use crate::schedule::ScheduleParser;
use crate::{Result, StubError};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What to do when a matched line cannot be turned into a stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure and return it
    #[default]
    Abort,
    /// Record the failure in the report and move on to the next line
    Continue,
}

/// Turns schedule text into front-matter stubs, one per matching line.
#[derive(Debug, Clone)]
pub struct StubGenerator {
    parser: ScheduleParser,
    posts_dir: PathBuf,
    year: i32,
    strict: bool,
    policy: FailurePolicy,
    create_posts_dir: bool,
    dry_run: bool,
}

impl StubGenerator {
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            parser: ScheduleParser::new(),
            posts_dir: posts_dir.into(),
            year: defaults.year,
            strict: defaults.strict,
            policy: FailurePolicy::Abort,
            create_posts_dir: defaults.create_posts_dir,
            dry_run: false,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.posts_dir.clone())
            .with_year(config.year)
            .with_strict(config.strict)
            .with_create_posts_dir(config.create_posts_dir)
            .with_policy(if config.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            })
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_create_posts_dir(mut self, create: bool) -> Self {
        self.create_posts_dir = create;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn stub_for(&self, line: &ScheduleLine) -> StubFile {
        StubFile::for_line(&self.posts_dir, self.year, line)
    }

    /// Process every line of `input`.
    ///
    /// For each matching line the diagnostic (`<month> <day> <title>`) is
    /// written to `out` and the stub is written to the posts directory.
    /// Non-matching lines are counted in `skipped_lines` and otherwise
    /// ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(report)` - all lines processed; under `FailurePolicy::Continue`
    ///   the report may still carry failures
    /// * `Err(error)` - first failure under `FailurePolicy::Abort`; stubs
    ///   written before it are left in place
    pub fn generate<W: Write>(&self, input: &str, out: &mut W) -> Result<GenerateReport> {
        let total_lines = self.parser.split_lines(input).len();
        let lines = self.parser.parse(input);

        let mut report = GenerateReport {
            skipped_lines: total_lines - lines.len(),
            ..GenerateReport::default()
        };

        debug!(
            "Parsed {} schedule lines, skipped {}",
            lines.len(),
            report.skipped_lines
        );

        if self.create_posts_dir && !self.dry_run {
            fs::create_dir_all(&self.posts_dir)
                .map_err(|e| StubError::io(&self.posts_dir, e))?;
        }

        for line in &lines {
            writeln!(out, "{}", line.diagnostic()).map_err(|e| StubError::io("<stdout>", e))?;

            match self.process_line(line) {
                Ok(Some(path)) => report.written.push(path),
                Ok(None) => {}
                Err(e) => match self.policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => {
                        warn!("Skipping line {}: {}", line.line_number, e);
                        let path = match &e {
                            StubError::Io { path, .. } => Some(path.clone()),
                            _ => None,
                        };
                        report.failures.push(StubFailure {
                            line_number: line.line_number,
                            path,
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(report)
    }

    fn process_line(&self, line: &ScheduleLine) -> Result<Option<PathBuf>> {
        if self.strict {
            line.validate(self.year)?;
        }

        let stub = self.stub_for(line);
        if self.dry_run {
            debug!("Dry run, not writing {}", stub.path.display());
            return Ok(None);
        }

        write_stub(&stub)?;
        info!("Wrote {}", stub.path.display());
        Ok(Some(stub.path))
    }
}

/// Create or truncate the stub's file and write its content. The parent
/// directory is expected to exist.
pub fn write_stub(stub: &StubFile) -> Result<()> {
    fs::write(&stub.path, &stub.content).map_err(|e| StubError::io(&stub.path, e))
}
