//! Hand-built facade over an explicit type table, for engine tests

use crate::error::{FacadeError, FacadeResult, LoadError};
use crate::facade::{DeclarationKind, SourceFacade, UnitLoader};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum MockType {
    /// A type with only a textual form
    Scalar(&'static str),

    Array(Box<MockType>),

    /// An object whose textual key is its name
    Object {
        name: &'static str,
        props: Vec<(&'static str, MockType)>,
    },

    /// A named reference resolved through the facade's type table;
    /// unresolvable references fail like a broken symbol would
    Ref(&'static str),

    /// A type whose structural queries fail with the given message
    Fail(&'static str),
}

#[derive(Debug, Clone)]
pub struct MockDecl {
    pub name: &'static str,
    pub kind: DeclarationKind,
    pub params: Vec<MockType>,
    pub init: Option<MockExpr>,
}

impl MockDecl {
    pub fn function(name: &'static str, params: Vec<MockType>) -> Self {
        Self {
            name,
            kind: DeclarationKind::Function,
            params,
            init: None,
        }
    }

    pub fn variable(name: &'static str) -> Self {
        Self {
            name,
            kind: DeclarationKind::Variable,
            params: Vec::new(),
            init: None,
        }
    }

    pub fn class(name: &'static str) -> Self {
        Self {
            name,
            kind: DeclarationKind::Class,
            params: Vec::new(),
            init: None,
        }
    }

    pub fn with_init(mut self, init: MockExpr) -> Self {
        self.init = Some(init);
        self
    }
}

#[derive(Debug, Clone)]
pub enum MockExpr {
    Call {
        callee: &'static str,
        source: Option<&'static str>,
        type_args: Vec<MockType>,
    },
    Arrow {
        params: Vec<MockType>,
    },
    Other(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct MockFacade {
    decls: Vec<MockDecl>,
    types: HashMap<&'static str, MockType>,
}

impl MockFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &'static str, ty: MockType) {
        self.types.insert(name, ty);
    }

    pub fn declare(&mut self, decl: MockDecl) {
        self.decls.push(decl);
    }

    /// Follow references through the type table
    fn deref(&self, ty: &MockType) -> FacadeResult<MockType> {
        match ty {
            MockType::Ref(name) => match self.types.get(name) {
                Some(target) => self.deref(target),
                None => Err(FacadeError::new(format!("Cannot resolve type '{}'", name))),
            },
            other => Ok(other.clone()),
        }
    }
}

impl SourceFacade for MockFacade {
    type Decl = MockDecl;
    type Expr = MockExpr;
    type Type = MockType;

    fn exported_declarations(&self) -> Vec<MockDecl> {
        self.decls.clone()
    }

    fn declaration_name(&self, decl: &MockDecl) -> String {
        decl.name.to_string()
    }

    fn declaration_kind(&self, decl: &MockDecl) -> DeclarationKind {
        decl.kind
    }

    fn initializer(&self, decl: &MockDecl) -> Option<MockExpr> {
        decl.init.clone()
    }

    fn parameter_types(&self, decl: &MockDecl) -> FacadeResult<Vec<MockType>> {
        Ok(decl.params.clone())
    }

    fn expr_text(&self, expr: &MockExpr) -> String {
        match expr {
            MockExpr::Call { callee, .. } => format!("{}(...)", callee),
            MockExpr::Arrow { .. } => "(...) => ...".to_string(),
            MockExpr::Other(text) => text.to_string(),
        }
    }

    fn call_callee_text(&self, expr: &MockExpr) -> Option<String> {
        match expr {
            MockExpr::Call { callee, .. } => Some(callee.to_string()),
            _ => None,
        }
    }

    fn call_type_arguments(&self, expr: &MockExpr) -> FacadeResult<Vec<MockType>> {
        match expr {
            MockExpr::Call { type_args, .. } => Ok(type_args.clone()),
            _ => Ok(Vec::new()),
        }
    }

    fn import_source(&self, expr: &MockExpr) -> FacadeResult<Option<String>> {
        match expr {
            MockExpr::Call { source, .. } => Ok(source.map(str::to_string)),
            _ => Ok(None),
        }
    }

    fn is_function_expr(&self, expr: &MockExpr) -> bool {
        matches!(expr, MockExpr::Arrow { .. })
    }

    fn function_parameter_types(&self, expr: &MockExpr) -> FacadeResult<Vec<MockType>> {
        match expr {
            MockExpr::Arrow { params } => Ok(params.clone()),
            _ => Err(FacadeError::new("Not a function expression")),
        }
    }

    fn type_text(&self, ty: &MockType) -> String {
        match ty {
            MockType::Scalar(text) => text.to_string(),
            MockType::Array(element) => format!("{}[]", self.type_text(element)),
            MockType::Object { name, .. } => name.to_string(),
            MockType::Ref(name) => name.to_string(),
            MockType::Fail(_) => "<broken>".to_string(),
        }
    }

    fn is_array_type(&self, ty: &MockType) -> FacadeResult<bool> {
        if let MockType::Fail(message) = ty {
            return Err(FacadeError::new(*message));
        }
        Ok(matches!(self.deref(ty)?, MockType::Array(_)))
    }

    fn is_object_type(&self, ty: &MockType) -> FacadeResult<bool> {
        if let MockType::Fail(message) = ty {
            return Err(FacadeError::new(*message));
        }
        Ok(matches!(self.deref(ty)?, MockType::Object { .. }))
    }

    fn element_type(&self, ty: &MockType) -> FacadeResult<MockType> {
        match self.deref(ty)? {
            MockType::Array(element) => Ok(*element),
            other => Err(FacadeError::new(format!(
                "'{}' is not an array type",
                self.type_text(&other)
            ))),
        }
    }

    fn properties(&self, ty: &MockType) -> FacadeResult<Vec<(String, MockType)>> {
        match self.deref(ty)? {
            MockType::Object { props, .. } => Ok(props
                .into_iter()
                .map(|(name, prop)| (name.to_string(), prop))
                .collect()),
            other => Err(FacadeError::new(format!(
                "'{}' is not an object type",
                self.type_text(&other)
            ))),
        }
    }
}

/// Loader over an in-memory set of fixture units
#[derive(Debug, Default)]
pub struct MockLoader {
    units: Vec<(String, MockFacade)>,
}

impl MockLoader {
    pub fn add(&mut self, path: &str, unit: MockFacade) {
        self.units.push((path.to_string(), unit));
    }
}

impl UnitLoader for MockLoader {
    type Unit = MockFacade;

    fn load(&self, path: &Path) -> Result<MockFacade, LoadError> {
        let key = path.display().to_string();
        self.units
            .iter()
            .find(|(p, _)| *p == key)
            .map(|(_, unit)| unit.clone())
            .ok_or_else(|| LoadError::new(format!("No fixture unit for '{}'", key)))
    }
}
