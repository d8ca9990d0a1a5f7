use crate::error::FacadeResult;
use crate::facade::{DeclarationKind, SourceFacade};
use crate::options::AnalyzeOptions;
use crate::types::Classification;

/// Classify an exported declaration
///
/// Rules apply in order: the ref-forwarding wrapper pattern first, then the
/// direct patterns (class, or function/arrow taking a props bag). Facade
/// query failures classify as `NotAComponent` rather than propagating.
pub fn classify<F: SourceFacade>(
    facade: &F,
    decl: &F::Decl,
    options: &AnalyzeOptions,
) -> Classification {
    if is_forward_ref(facade, decl, options) {
        return Classification::ForwardRefComponent;
    }
    if is_direct_component(facade, decl) {
        return Classification::DirectComponent;
    }
    Classification::NotAComponent
}

fn is_forward_ref<F: SourceFacade>(facade: &F, decl: &F::Decl, options: &AnalyzeOptions) -> bool {
    if facade.declaration_kind(decl) != DeclarationKind::Variable {
        return false;
    }
    let Some(init) = facade.initializer(decl) else {
        return false;
    };
    let Some(callee) = facade.call_callee_text(&init) else {
        return false;
    };
    // The callee may be namespace-qualified (`React.forwardRef`); match the
    // trailing identifier textually, then verify the import source strictly
    if !callee.ends_with(&options.wrapper_ident) {
        return false;
    }
    matches!(
        facade.import_source(&init),
        Ok(Some(source)) if source == options.ui_module
    )
}

fn is_direct_component<F: SourceFacade>(facade: &F, decl: &F::Decl) -> bool {
    match facade.declaration_kind(decl) {
        DeclarationKind::Class => true,
        DeclarationKind::Function => first_param_is_object(facade, facade.parameter_types(decl)),
        DeclarationKind::Variable => {
            let Some(init) = facade.initializer(decl) else {
                return false;
            };
            if !facade.is_function_expr(&init) {
                return false;
            }
            first_param_is_object(facade, facade.function_parameter_types(&init))
        }
    }
}

/// The props-bag heuristic: a first parameter whose resolved type is an
/// object type
fn first_param_is_object<F: SourceFacade>(
    facade: &F,
    params: FacadeResult<Vec<F::Type>>,
) -> bool {
    let Ok(params) = params else {
        return false;
    };
    let Some(first) = params.first() else {
        return false;
    };
    facade.is_object_type(first).unwrap_or(false)
}
