//! # Propscan Analysis
//!
//! The component-analysis engine: given a source unit seen through the
//! type-system facade, it decides which exported declarations are UI
//! components, locates each component's props type, and resolves that type
//! into a depth-bounded, cycle-safe structural shape.
//!
//! ## Features
//!
//! - **Ordered classification**: ref-forwarding wrapper calls are detected
//!   before the direct patterns (class, props-bag function/arrow)
//! - **Path-scoped cycle detection**: self- and mutually-recursive types
//!   resolve to an explicit circular marker without suppressing repeated
//!   sibling types
//! - **Localized failure**: a broken subtree becomes an error leaf; its
//!   siblings, its declaration and the rest of the run are unaffected
//! - **Facade-generic**: the engine consumes a capability trait and never
//!   reads source text, so any type-system backend (or test fixture) plugs
//!   in
//!
//! ## Example
//!
//! ```rust
//! use propscan_analysis::{AnalyzeOptions, ResolvedShape};
//!
//! let options = AnalyzeOptions::default();
//! assert_eq!(options.max_depth, 2);
//! assert_eq!(options.ui_module, "react");
//!
//! let shape = ResolvedShape::ObjectOf(vec![(
//!     "title".to_string(),
//!     ResolvedShape::Leaf("string".to_string()),
//! )]);
//! assert_eq!(
//!     serde_json::to_string(&shape).unwrap(),
//!     r#"{"title":"string"}"#
//! );
//! ```

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod extract;
pub mod facade;
pub mod options;
pub mod progress;
pub mod resolve;
pub mod types;

#[cfg(test)]
pub(crate) mod fixture;

// Re-export main types for convenience
pub use aggregate::{analyze_file, analyze_files, analyze_unit};
pub use classify::classify;
pub use error::{FacadeError, FacadeResult, LoadError};
pub use extract::extract_props_type;
pub use facade::{DeclarationKind, SourceFacade, UnitLoader};
pub use options::AnalyzeOptions;
pub use progress::{NullProgress, Progress, ProgressEvent};
pub use resolve::resolve;
pub use types::{Classification, FileReport, ReportMap, ResolvedShape};
