use propscan_parser::ast::{Member, TypeExpr};

/// Render a type expression back to source-like text
///
/// This is the canonical textual form: the resolver uses it both for leaf
/// output and as the cycle-detection key, so rendering must be stable for
/// a given expression.
pub fn render_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Named {
            name, type_args, ..
        } => {
            if type_args.is_empty() {
                name.clone()
            } else {
                let args: Vec<String> = type_args.iter().map(render_type).collect();
                format!("{}<{}>", name, args.join(", "))
            }
        }

        TypeExpr::Object { members, .. } => {
            if members.is_empty() {
                return "{}".to_string();
            }
            let rendered: Vec<String> = members.iter().map(render_member).collect();
            format!("{{ {} }}", rendered.join("; "))
        }

        TypeExpr::Array { element, .. } => {
            let inner = render_type(element);
            if needs_parens_in_array(element) {
                format!("({})[]", inner)
            } else {
                format!("{}[]", inner)
            }
        }

        TypeExpr::Union { arms, .. } => {
            let rendered: Vec<String> = arms.iter().map(render_type).collect();
            rendered.join(" | ")
        }

        TypeExpr::Intersection { arms, .. } => {
            let rendered: Vec<String> = arms.iter().map(render_type).collect();
            rendered.join(" & ")
        }

        TypeExpr::Tuple { elements, .. } => {
            let rendered: Vec<String> = elements.iter().map(render_type).collect();
            format!("[{}]", rendered.join(", "))
        }

        TypeExpr::Function { text, .. } => text.clone(),

        TypeExpr::Literal { text, .. } => text.clone(),
    }
}

fn render_member(member: &Member) -> String {
    let readonly = if member.readonly { "readonly " } else { "" };
    let optional = if member.optional { "?" } else { "" };
    format!(
        "{}{}{}: {}",
        readonly,
        member.name,
        optional,
        render_type(&member.type_ann)
    )
}

fn needs_parens_in_array(ty: &TypeExpr) -> bool {
    matches!(
        ty,
        TypeExpr::Union { .. } | TypeExpr::Intersection { .. } | TypeExpr::Function { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use propscan_parser::parse;

    fn alias_type(source: &str) -> TypeExpr {
        let module = parse(source).unwrap();
        module.type_aliases[0].value.clone()
    }

    #[test]
    fn test_render_named_and_generic() {
        assert_eq!(render_type(&alias_type("type A = CardProps;")), "CardProps");
        assert_eq!(
            render_type(&alias_type("type A = Map<string, number>;")),
            "Map<string, number>"
        );
    }

    #[test]
    fn test_render_object() {
        assert_eq!(
            render_type(&alias_type(
                "type A = { title: string; tags?: string[]; readonly id: number };"
            )),
            "{ title: string; tags?: string[]; readonly id: number }"
        );
    }

    #[test]
    fn test_render_union_array_needs_parens() {
        assert_eq!(
            render_type(&alias_type("type A = (string | number)[];")),
            "(string | number)[]"
        );
    }

    #[test]
    fn test_render_tuple_and_literal() {
        assert_eq!(
            render_type(&alias_type("type A = [string, 42];")),
            "[string, 42]"
        );
        assert_eq!(
            render_type(&alias_type(r#"type A = "small" | "large";"#)),
            r#""small" | "large""#
        );
    }

    #[test]
    fn test_render_is_stable() {
        let ty = alias_type("type A = { a: string; b: { c: number[] } };");
        assert_eq!(render_type(&ty), render_type(&ty));
    }
}
