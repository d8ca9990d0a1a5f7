use crate::error::SemanticError;
use crate::types::render_type;
use propscan_analysis::{DeclarationKind, FacadeError, FacadeResult, SourceFacade};
use propscan_parser::ast::{
    DeclKind, Declaration, Initializer, InterfaceDecl, Module, TypeAliasDecl, TypeExpr,
};
use propscan_parser::parse;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A parsed source unit with its symbol and import tables
///
/// This is the production implementation of the type-system facade: type
/// queries resolve named references through the unit's interfaces and type
/// aliases, and identifier queries resolve through its imports.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    module: Module,
    interfaces: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
    /// Local identifier -> module specifier of the import that bound it
    imports: HashMap<String, String>,
}

impl SourceUnit {
    pub fn new(module: Module) -> Self {
        let mut interfaces = HashMap::new();
        for (index, decl) in module.interfaces.iter().enumerate() {
            interfaces.insert(decl.name.clone(), index);
        }

        let mut aliases = HashMap::new();
        for (index, decl) in module.type_aliases.iter().enumerate() {
            aliases.insert(decl.name.clone(), index);
        }

        let mut imports = HashMap::new();
        for import in &module.imports {
            if let Some(default) = &import.default {
                imports.insert(default.clone(), import.specifier.clone());
            }
            if let Some(namespace) = &import.namespace {
                imports.insert(namespace.clone(), import.specifier.clone());
            }
            for named in &import.named {
                imports.insert(named.local.clone(), import.specifier.clone());
            }
        }

        Self {
            module,
            interfaces,
            aliases,
            imports,
        }
    }

    /// Parse source text into a unit
    pub fn from_source(source: &str) -> Result<Self, SemanticError> {
        Ok(Self::new(parse(source)?))
    }

    /// Read and parse a file into a unit
    pub fn from_path(path: &Path) -> Result<Self, SemanticError> {
        let source = fs::read_to_string(path)?;
        Self::from_source(&source)
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    fn lookup_interface(&self, name: &str) -> Option<&InterfaceDecl> {
        self.interfaces
            .get(name)
            .map(|&index| &self.module.interfaces[index])
    }

    fn lookup_alias(&self, name: &str) -> Option<&TypeAliasDecl> {
        self.aliases
            .get(name)
            .map(|&index| &self.module.type_aliases[index])
    }

    /// Module specifier of the import that bound an identifier
    pub fn import_source_of(&self, ident: &str) -> Option<&str> {
        self.imports.get(ident).map(String::as_str)
    }

    /// Follow parameterless named references through type-alias chains
    fn dealias(&self, ty: &TypeExpr) -> FacadeResult<TypeExpr> {
        let mut current = ty.clone();
        let mut seen: Vec<String> = Vec::new();

        loop {
            let next = match &current {
                TypeExpr::Named {
                    name, type_args, ..
                } if type_args.is_empty() => {
                    if seen.contains(name) {
                        return Err(FacadeError::new(format!(
                            "Cyclic type alias chain through '{}'",
                            name
                        )));
                    }
                    match self.lookup_alias(name) {
                        Some(alias) => {
                            seen.push(name.clone());
                            alias.value.clone()
                        }
                        None => break,
                    }
                }
                _ => break,
            };
            current = next;
        }

        Ok(current)
    }

    /// Own properties of an interface followed by inherited ones,
    /// shadowed names skipped, in declaration order
    fn interface_properties(&self, name: &str, seen: &mut Vec<String>) -> Vec<(String, TypeExpr)> {
        if seen.iter().any(|s| s == name) {
            return Vec::new();
        }
        seen.push(name.to_string());

        let Some(decl) = self.lookup_interface(name) else {
            return Vec::new();
        };

        let mut props: Vec<(String, TypeExpr)> = decl
            .members
            .iter()
            .map(|member| (member.name.clone(), member.type_ann.clone()))
            .collect();

        for base in &decl.extends {
            for (prop_name, prop_ty) in self.base_properties(base, seen) {
                if !props.iter().any(|(existing, _)| *existing == prop_name) {
                    props.push((prop_name, prop_ty));
                }
            }
        }

        props
    }

    /// Properties contributed by one extends-clause base
    fn base_properties(&self, base: &TypeExpr, seen: &mut Vec<String>) -> Vec<(String, TypeExpr)> {
        let TypeExpr::Named {
            name, type_args, ..
        } = base
        else {
            return Vec::new();
        };
        if !type_args.is_empty() {
            // Generic instantiation; no substitution is attempted
            return Vec::new();
        }

        if self.lookup_interface(name).is_some() {
            return self.interface_properties(name, seen);
        }

        // A base may also name an alias of an object literal
        match self.dealias(base) {
            Ok(TypeExpr::Object { members, .. }) => members
                .into_iter()
                .map(|member| (member.name, member.type_ann))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn param_type(param: &propscan_parser::ast::Param) -> TypeExpr {
        match &param.type_ann {
            Some(ty) => ty.clone(),
            // An unannotated parameter resolves to the implicit `any`
            None => TypeExpr::Named {
                name: "any".to_string(),
                type_args: Vec::new(),
                span: param.span,
            },
        }
    }

    fn leading_identifier(text: &str) -> &str {
        let end = text
            .find(|c: char| !c.is_alphanumeric() && c != '_' && c != '$')
            .unwrap_or(text.len());
        &text[..end]
    }
}

impl SourceFacade for SourceUnit {
    type Decl = Declaration;
    type Expr = Initializer;
    type Type = TypeExpr;

    fn exported_declarations(&self) -> Vec<Declaration> {
        self.module
            .declarations
            .iter()
            .filter(|decl| decl.exported)
            .cloned()
            .collect()
    }

    fn declaration_name(&self, decl: &Declaration) -> String {
        decl.name.clone()
    }

    fn declaration_kind(&self, decl: &Declaration) -> DeclarationKind {
        match decl.kind {
            DeclKind::Function => DeclarationKind::Function,
            DeclKind::Variable => DeclarationKind::Variable,
            DeclKind::Class => DeclarationKind::Class,
        }
    }

    fn initializer(&self, decl: &Declaration) -> Option<Initializer> {
        decl.initializer.clone()
    }

    fn parameter_types(&self, decl: &Declaration) -> FacadeResult<Vec<TypeExpr>> {
        Ok(decl.params.iter().map(Self::param_type).collect())
    }

    fn expr_text(&self, expr: &Initializer) -> String {
        match expr {
            Initializer::Arrow { params, .. } => {
                let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
                format!("({}) => ...", names.join(", "))
            }
            Initializer::Call { callee, .. } => format!("{}(...)", callee),
            Initializer::Other { text, .. } => text.clone(),
        }
    }

    fn call_callee_text(&self, expr: &Initializer) -> Option<String> {
        match expr {
            Initializer::Call { callee, .. } => Some(callee.clone()),
            _ => None,
        }
    }

    fn call_type_arguments(&self, expr: &Initializer) -> FacadeResult<Vec<TypeExpr>> {
        match expr {
            Initializer::Call { type_args, .. } => Ok(type_args.clone()),
            _ => Ok(Vec::new()),
        }
    }

    fn import_source(&self, expr: &Initializer) -> FacadeResult<Option<String>> {
        let root = match expr {
            Initializer::Call { callee, .. } => {
                callee.split('.').next().unwrap_or(callee.as_str())
            }
            Initializer::Other { text, .. } => Self::leading_identifier(text),
            Initializer::Arrow { .. } => return Ok(None),
        };
        Ok(self.import_source_of(root).map(str::to_string))
    }

    fn is_function_expr(&self, expr: &Initializer) -> bool {
        matches!(expr, Initializer::Arrow { .. })
    }

    fn function_parameter_types(&self, expr: &Initializer) -> FacadeResult<Vec<TypeExpr>> {
        match expr {
            Initializer::Arrow { params, .. } => {
                Ok(params.iter().map(Self::param_type).collect())
            }
            _ => Err(FacadeError::new("Not a function expression")),
        }
    }

    fn type_text(&self, ty: &TypeExpr) -> String {
        render_type(ty)
    }

    fn is_array_type(&self, ty: &TypeExpr) -> FacadeResult<bool> {
        Ok(match self.dealias(ty)? {
            TypeExpr::Array { .. } => true,
            TypeExpr::Named {
                name, type_args, ..
            } => is_array_constructor(&name) && type_args.len() == 1,
            _ => false,
        })
    }

    fn is_object_type(&self, ty: &TypeExpr) -> FacadeResult<bool> {
        Ok(match self.dealias(ty)? {
            TypeExpr::Object { .. } => true,
            TypeExpr::Named {
                name, type_args, ..
            } => type_args.is_empty() && self.lookup_interface(&name).is_some(),
            _ => false,
        })
    }

    fn element_type(&self, ty: &TypeExpr) -> FacadeResult<TypeExpr> {
        match self.dealias(ty)? {
            TypeExpr::Array { element, .. } => Ok(*element),
            TypeExpr::Named {
                name, mut type_args, ..
            } if is_array_constructor(&name) && type_args.len() == 1 => Ok(type_args.remove(0)),
            other => Err(FacadeError::new(format!(
                "'{}' is not an array type",
                render_type(&other)
            ))),
        }
    }

    fn properties(&self, ty: &TypeExpr) -> FacadeResult<Vec<(String, TypeExpr)>> {
        match self.dealias(ty)? {
            TypeExpr::Object { members, .. } => Ok(members
                .into_iter()
                .map(|member| (member.name, member.type_ann))
                .collect()),
            TypeExpr::Named {
                name, type_args, ..
            } if type_args.is_empty() && self.lookup_interface(&name).is_some() => {
                let mut seen = Vec::new();
                Ok(self.interface_properties(&name, &mut seen))
            }
            other => Err(FacadeError::new(format!(
                "'{}' is not an object type",
                render_type(&other)
            ))),
        }
    }
}

fn is_array_constructor(name: &str) -> bool {
    name == "Array" || name == "ReadonlyArray"
}
