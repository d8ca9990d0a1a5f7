use crate::facade::SourceFacade;
use crate::types::ResolvedShape;

/// Resolve a type into its structural shape
///
/// The walk is depth-first with two guards applied before any structural
/// query: the depth budget, then path-scoped cycle detection on the type's
/// textual key. `on_path` holds only the keys between the root and the
/// current node (push on entry, pop on exit), so an ancestor occurring
/// again reports `Circular` while repeated-but-unrelated occurrences across
/// sibling subtrees resolve independently.
pub fn resolve<F: SourceFacade>(facade: &F, ty: &F::Type, max_depth: usize) -> ResolvedShape {
    let mut on_path = Vec::new();
    resolve_at(facade, ty, max_depth, 0, &mut on_path)
}

fn resolve_at<F: SourceFacade>(
    facade: &F,
    ty: &F::Type,
    max_depth: usize,
    depth: usize,
    on_path: &mut Vec<String>,
) -> ResolvedShape {
    if depth > max_depth {
        return ResolvedShape::MaxDepth;
    }

    let key = facade.type_text(ty);
    if on_path.iter().any(|seen| *seen == key) {
        return ResolvedShape::Circular;
    }

    on_path.push(key);
    let shape = resolve_structure(facade, ty, max_depth, depth, on_path);
    on_path.pop();
    shape
}

fn resolve_structure<F: SourceFacade>(
    facade: &F,
    ty: &F::Type,
    max_depth: usize,
    depth: usize,
    on_path: &mut Vec<String>,
) -> ResolvedShape {
    match facade.is_array_type(ty) {
        Ok(true) => {
            return match facade.element_type(ty) {
                Ok(element) => ResolvedShape::ArrayOf(Box::new(resolve_at(
                    facade,
                    &element,
                    max_depth,
                    depth + 1,
                    on_path,
                ))),
                Err(err) => ResolvedShape::Error(err.to_string()),
            };
        }
        Ok(false) => {}
        Err(err) => return ResolvedShape::Error(err.to_string()),
    }

    match facade.is_object_type(ty) {
        Ok(true) => match facade.properties(ty) {
            Ok(props) => {
                // A property whose own queries fail becomes an Error leaf;
                // its siblings resolve unaffected
                let resolved = props
                    .into_iter()
                    .map(|(name, prop_ty)| {
                        let shape = resolve_at(facade, &prop_ty, max_depth, depth + 1, on_path);
                        (name, shape)
                    })
                    .collect();
                ResolvedShape::ObjectOf(resolved)
            }
            Err(err) => ResolvedShape::Error(err.to_string()),
        },
        Ok(false) => ResolvedShape::Leaf(facade.type_text(ty)),
        Err(err) => ResolvedShape::Error(err.to_string()),
    }
}
