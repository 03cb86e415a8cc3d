pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod schedule;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::{Config, GeneratorConfig, LoggingConfig};
pub use error::{Result, StubError};
pub use generator::{FailurePolicy, StubGenerator, write_stub};
pub use models::{FRONT_MATTER, GenerateReport, ScheduleLine, StubFailure, StubFile};
pub use schedule::{BUILTIN_SCHEDULE, ScheduleParser, ScheduleSource};
