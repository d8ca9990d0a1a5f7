use crate::facade::{DeclarationKind, SourceFacade};
use crate::types::Classification;

/// Locate the props type of a classified declaration
///
/// `None` is the quiet outcome - the declaration is counted as skipped by
/// the aggregator, not treated as an error.
pub fn extract_props_type<F: SourceFacade>(
    facade: &F,
    decl: &F::Decl,
    classification: Classification,
) -> Option<F::Type> {
    match classification {
        Classification::ForwardRefComponent => {
            // The wrapper call carries `<RefType, PropsType>`; props are the
            // second type argument
            let init = facade.initializer(decl)?;
            let type_args = facade.call_type_arguments(&init).ok()?;
            if type_args.len() < 2 {
                return None;
            }
            type_args.into_iter().nth(1)
        }

        Classification::DirectComponent => match facade.declaration_kind(decl) {
            DeclarationKind::Function => {
                facade.parameter_types(decl).ok()?.into_iter().next()
            }
            DeclarationKind::Variable => {
                let init = facade.initializer(decl)?;
                facade
                    .function_parameter_types(&init)
                    .ok()?
                    .into_iter()
                    .next()
            }
            // Classes have no parameter to read a props type from
            DeclarationKind::Class => None,
        },

        Classification::NotAComponent => None,
    }
}
