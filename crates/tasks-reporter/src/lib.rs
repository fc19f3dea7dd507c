#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`TasksReporterError`, `ScanError`)
//! - [`config`]: Reporter configuration (`TasksReporterConfig`, builder)
//! - [`extractor`]: Spy log document and execution event extraction (`SpyLog`)
//! - [`record`]: Build record parsing (`BuildRecord`, `ProjectIdentity`, `SkipReason`)
//! - [`resolver`]: Cross-environment path resolution (`Resolution`, `MatchStrategy`)
//! - [`pattern`]: Glob pattern aggregation (`PatternSet`)
//! - [`dispatch`]: External scanner boundary (`TaskScanner`, `DispatchOutcome`)
//! - [`reporter`]: Main orchestrator (`TasksReporter`, `ProcessReport`)
//!
//! # Architecture
//!
//! ```text
//! spy log XML --> SpyLog --> execution_events --> parse_build_record
//!                                                        |
//!                                                     resolve --> Workspace::exists
//!                                                                        |
//!                                                                   PatternSet
//!                                                                        |
//!                                                          dispatch --> TaskScanner
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod extractor;
pub mod pattern;
pub mod record;
pub mod reporter;
pub mod resolver;

// --- Public API Re-exports ---

// Reporter (main orchestrator)
pub use reporter::{CollectedDirectory, Collection, ProcessReport, TasksReporter};

// Configuration
pub use config::{TasksReporterConfig, TasksReporterConfigBuilder};

// Error
pub use error::{ScanError, TasksReporterError};

// Extraction and parsing
pub use extractor::{SpyLog, execution_events};
pub use record::{BuildDescriptor, BuildRecord, ProjectIdentity, SkipReason, parse_build_record};

// Resolution and aggregation
pub use pattern::{PatternSet, aggregate};
pub use resolver::{MatchStrategy, Resolution, ResolvedSourcePath, resolve, resolve_relative_path};

// Dispatch
pub use dispatch::{DispatchOutcome, TaskScanRequest, TaskScanner, dispatch};
