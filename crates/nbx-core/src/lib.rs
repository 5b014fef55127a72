//! # nbx-core
//!
//! Cross references for Jupyter notebooks, rewritten directly in the
//! notebook's JSON text.
//!
//! Two passes run over the file's lines:
//! - footnotes: Markdown `[^name]` / `[^name]:` become numbered HTML anchors
//!   (see [`footnote`]);
//! - equations: `\tag{name}` is renumbered and `\eqref{name}` becomes a
//!   literal `(n)` (see [`equation`]).
//!
//! Both passes parse their own previous output, so rewriting is idempotent
//! and numbering follows edits. Inconsistencies are returned as
//! [`Diagnostic`]s rather than errors.

pub mod diagnostic;
pub mod equation;
pub mod error;
pub mod footnote;
pub mod markup;
pub mod notebook;
pub mod rewrite;
pub mod rule;
pub mod sequence;
pub mod summary;

pub use diagnostic::Diagnostic;
pub use error::CoreError;
pub use notebook::{FileOutcome, WriteMode, process_file};
pub use rewrite::{Rewrite, Rewriter};
pub use summary::{FileFailure, Problem, RunSummary, describe_count};
