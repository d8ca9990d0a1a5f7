use serde::{Deserialize, Serialize};

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Root node for a parsed source unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub imports: Vec<Import>,
    /// Function, variable and class declarations in source order
    pub declarations: Vec<Declaration>,
    pub interfaces: Vec<InterfaceDecl>,
    pub type_aliases: Vec<TypeAliasDecl>,
}

/// Import statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    /// Module specifier, e.g. "react" or "./card"
    pub specifier: String,
    /// `import X from "..."`
    pub default: Option<String>,
    /// `import * as X from "..."`
    pub namespace: Option<String>,
    /// `import { a, b as c } from "..."`
    pub named: Vec<ImportedName>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedName {
    pub imported: String,
    pub local: String,
}

/// Syntactic kind of a value-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    Function,
    Variable,
    Class,
}

/// A top-level function, variable or class declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub exported: bool,
    pub name: String,
    pub kind: DeclKind,
    /// Parameters, for function declarations
    pub params: Vec<Param>,
    /// Explicit type annotation, for variable declarations
    pub type_ann: Option<TypeExpr>,
    /// Initializer expression, for variable declarations
    pub initializer: Option<Initializer>,
    pub span: Span,
}

/// A function or arrow parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub optional: bool,
    pub type_ann: Option<TypeExpr>,
    pub span: Span,
}

/// Shallow view of a variable initializer. Propscan only needs the
/// outermost shape; call arguments and function bodies are not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Initializer {
    /// Arrow function expression
    Arrow { params: Vec<Param>, span: Span },

    /// Call expression with a possibly-qualified callee
    Call {
        callee: String,
        type_args: Vec<TypeExpr>,
        span: Span,
    },

    /// Anything else, retained textually
    Other { text: String, span: Span },
}

impl Initializer {
    pub fn span(&self) -> Span {
        match self {
            Initializer::Arrow { span, .. } => *span,
            Initializer::Call { span, .. } => *span,
            Initializer::Other { span, .. } => *span,
        }
    }
}

/// Interface declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub exported: bool,
    pub name: String,
    pub type_params: Vec<String>,
    /// Base references from the extends clause
    pub extends: Vec<TypeExpr>,
    pub members: Vec<Member>,
    pub span: Span,
}

/// A named member of an interface or object literal type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub optional: bool,
    pub readonly: bool,
    pub type_ann: TypeExpr,
    pub span: Span,
}

/// Type alias declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasDecl {
    pub exported: bool,
    pub name: String,
    pub type_params: Vec<String>,
    pub value: TypeExpr,
    pub span: Span,
}

/// Type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TypeExpr {
    /// Possibly-qualified named reference, e.g. `CardProps`, `React.ReactNode`,
    /// `Array<string>`
    Named {
        name: String,
        type_args: Vec<TypeExpr>,
        span: Span,
    },

    /// Object literal type, e.g. `{ title: string; tags: string[] }`
    Object { members: Vec<Member>, span: Span },

    /// Postfix array type `T[]`
    Array { element: Box<TypeExpr>, span: Span },

    /// Union `A | B`
    Union { arms: Vec<TypeExpr>, span: Span },

    /// Intersection `A & B`
    Intersection { arms: Vec<TypeExpr>, span: Span },

    /// Tuple `[A, B]`
    Tuple { elements: Vec<TypeExpr>, span: Span },

    /// Function type, retained textually, e.g. `(id: string) => void`
    Function { text: String, span: Span },

    /// Literal type, e.g. `"primary"`, `42`, `true`
    Literal { text: String, span: Span },
}

impl TypeExpr {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Named { span, .. } => *span,
            TypeExpr::Object { span, .. } => *span,
            TypeExpr::Array { span, .. } => *span,
            TypeExpr::Union { span, .. } => *span,
            TypeExpr::Intersection { span, .. } => *span,
            TypeExpr::Tuple { span, .. } => *span,
            TypeExpr::Function { span, .. } => *span,
            TypeExpr::Literal { span, .. } => *span,
        }
    }
}

impl Module {
    pub fn new() -> Self {
        Self {
            imports: Vec::new(),
            declarations: Vec::new(),
            interfaces: Vec::new(),
            type_aliases: Vec::new(),
        }
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}
