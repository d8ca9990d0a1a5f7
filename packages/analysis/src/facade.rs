use crate::error::{FacadeResult, LoadError};
use std::path::Path;

/// Syntactic kind of an exported declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Function,
    Variable,
    Class,
}

/// Capability surface of the type-system facade
///
/// The analysis engine consumes this surface and nothing else; it never
/// inspects source text itself. Handles are opaque to the engine and cheap
/// to clone. Every type-level query is fallible so that incomplete static
/// information (unresolvable symbols, ambient types) degrades instead of
/// aborting.
pub trait SourceFacade {
    type Decl: Clone;
    type Expr: Clone;
    type Type: Clone;

    /// Exported declarations of the unit, in source order
    fn exported_declarations(&self) -> Vec<Self::Decl>;

    fn declaration_name(&self, decl: &Self::Decl) -> String;

    fn declaration_kind(&self, decl: &Self::Decl) -> DeclarationKind;

    /// Initializer expression of a variable declaration
    fn initializer(&self, decl: &Self::Decl) -> Option<Self::Expr>;

    /// Resolved types of a function declaration's parameters
    fn parameter_types(&self, decl: &Self::Decl) -> FacadeResult<Vec<Self::Type>>;

    /// Textual form of an expression
    fn expr_text(&self, expr: &Self::Expr) -> String;

    /// Callee text if the expression is a call, qualification included
    fn call_callee_text(&self, expr: &Self::Expr) -> Option<String>;

    /// Explicit type arguments if the expression is a call
    fn call_type_arguments(&self, expr: &Self::Expr) -> FacadeResult<Vec<Self::Type>>;

    /// Module specifier of the import that introduced the expression's
    /// leftmost identifier, if any
    fn import_source(&self, expr: &Self::Expr) -> FacadeResult<Option<String>>;

    /// Whether the expression is a function expression
    fn is_function_expr(&self, expr: &Self::Expr) -> bool;

    /// Resolved parameter types of a function expression
    fn function_parameter_types(&self, expr: &Self::Expr) -> FacadeResult<Vec<Self::Type>>;

    /// Textual form of a type
    fn type_text(&self, ty: &Self::Type) -> String;

    fn is_array_type(&self, ty: &Self::Type) -> FacadeResult<bool>;

    fn is_object_type(&self, ty: &Self::Type) -> FacadeResult<bool>;

    /// Element type of an array type
    fn element_type(&self, ty: &Self::Type) -> FacadeResult<Self::Type>;

    /// Named properties of an object type with their types, in declaration
    /// order
    fn properties(&self, ty: &Self::Type) -> FacadeResult<Vec<(String, Self::Type)>>;
}

/// Loads source units from paths
///
/// The seam between the engine and whatever supplies parsed units:
/// production code plugs in a file-reading loader, tests plug in fixtures.
pub trait UnitLoader {
    type Unit: SourceFacade;

    fn load(&self, path: &Path) -> Result<Self::Unit, LoadError>;
}
