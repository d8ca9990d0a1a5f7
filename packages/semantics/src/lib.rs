//! # Propscan Semantics
//!
//! The production type-system facade: parsed source units with symbol and
//! import tables, implementing the capability surface the analysis engine
//! consumes. Named type references resolve through the unit's interfaces
//! and type-alias chains; everything the subset cannot decompose (unions,
//! generic instantiations, function types, ambient names) stays textual
//! and surfaces as a leaf.

mod error;
mod loader;
mod types;
mod unit;

pub use error::SemanticError;
pub use loader::FileLoader;
pub use types::render_type;
pub use unit::SourceUnit;
