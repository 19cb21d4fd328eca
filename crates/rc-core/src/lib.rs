//! Redirect Compactor Core Library
//!
//! This crate provides the consolidation engine for Redirect Compactor. It turns a
//! flat list of single-path redirects into a smaller, behavior-preserving table of
//! exact and prefix rules, and verifies the result against the original list.
//!
//! # Architecture
//!
//! Every stage is a pure function over immutable redirect values:
//!
//! ```text
//! raw list -> partition -> {absolute, relative}
//!          -> consolidate -> {exact, prefix}
//!          -> ordered table -> verify (against the raw list)
//! ```
//!
//! # Modules
//!
//! - `types`: The `Redirect` record shared by every stage and the `SourceRedirect` input record
//! - `path`: Segment helpers for slash-delimited paths
//! - `partition`: Absolute / relative split
//! - `validate`: Input checks run before consolidation
//! - `consolidate`: Iterative (shortest prefix first) consolidation and rule ordering
//! - `legacy`: Longest-path-first consolidation kept as an alternate strategy
//! - `verify`: Rule application and round-trip verification
//! - `table`: Ordered redirect table as consumed by the hosting layer

pub mod consolidate;
pub mod legacy;
pub mod partition;
pub mod path;
pub mod table;
pub mod types;
pub mod validate;
pub mod verify;

// Re-export commonly used types
pub use consolidate::{consolidate, ConsolidateError, Consolidated, Strategy};
pub use partition::{partition, Partition};
pub use table::RedirectTable;
pub use types::{Redirect, SourceRedirect};
pub use validate::{check_source_redirects, check_unique_sources, InputError};
pub use verify::{applied_rule, verify_conversion, ConversionError};
