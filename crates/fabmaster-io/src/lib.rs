//! # Fabmaster I/O
//!
//! Reader for the `!`-delimited FABMASTER extract format. Lines are split
//! into records, section headers bind the ten known section schemas, and
//! each data row is converted into a typed record and fed to the
//! `fabmaster-core` assemblers. Non-fatal problems are collected as
//! diagnostics instead of aborting the read.

pub mod diagnostic;
pub mod error;
pub mod reader;
pub mod section;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::{FabmasterError, RecordError};
pub use reader::{read_str, FabmasterReader};
pub use section::{Row, SectionKind, SectionRecord};
