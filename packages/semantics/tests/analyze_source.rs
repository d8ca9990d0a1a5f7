use propscan_analysis::{
    analyze_unit, AnalyzeOptions, NullProgress, ResolvedShape,
};
use propscan_semantics::SourceUnit;

fn analyze(source: &str, max_depth: usize) -> propscan_analysis::FileReport {
    let unit = SourceUnit::from_source(source).unwrap();
    let options = AnalyzeOptions::with_max_depth(max_depth);
    analyze_unit(&unit, "test.tsx", &options, &mut NullProgress)
}

fn leaf(text: &str) -> ResolvedShape {
    ResolvedShape::Leaf(text.to_string())
}

#[test]
fn test_card_end_to_end() {
    let report = analyze(
        r#"
        export function Card(props: { title: string; tags: string[] }) {
            return null;
        }
        "#,
        2,
    );

    assert_eq!(report.skipped, 0);
    let shape = report.get("Card").unwrap();
    assert_eq!(
        serde_json::to_string(shape).unwrap(),
        r#"{"title":"string","tags":["string"]}"#
    );
}

#[test]
fn test_only_non_components() {
    let report = analyze(
        r#"
        export const VERSION = "1.0.0";
        export function formatDate(date: Date): string { return ""; }
        export function nothing() { return 1; }
        "#,
        2,
    );

    assert!(report.is_empty());
    assert_eq!(report.skipped, 3);
}

#[test]
fn test_forward_ref_props_from_interface() {
    let report = analyze(
        r#"
        import { forwardRef } from "react";

        interface InputProps {
            value: string;
            disabled: boolean;
        }

        export const Input = forwardRef<HTMLInputElement, InputProps>(
            (props, ref) => null
        );
        "#,
        2,
    );

    assert_eq!(report.skipped, 0);
    let shape = report.get("Input").unwrap();
    assert_eq!(
        *shape,
        ResolvedShape::ObjectOf(vec![
            ("value".to_string(), leaf("string")),
            ("disabled".to_string(), leaf("boolean")),
        ])
    );
}

#[test]
fn test_forward_ref_from_unrelated_module_is_skipped() {
    let report = analyze(
        r#"
        import { forwardRef } from "not-react";

        export const Input = forwardRef<HTMLInputElement, { value: string }>(
            (props, ref) => null
        );
        "#,
        2,
    );

    assert!(report.is_empty());
    assert_eq!(report.skipped, 1);
}

#[test]
fn test_forward_ref_with_one_type_argument_is_skipped() {
    let report = analyze(
        r#"
        import { forwardRef } from "react";
        export const Input = forwardRef<HTMLInputElement>((props, ref) => null);
        "#,
        2,
    );

    assert!(report.is_empty());
    assert_eq!(report.skipped, 1);
}

#[test]
fn test_namespace_qualified_forward_ref() {
    let report = analyze(
        r#"
        import * as React from "react";
        export const Input = React.forwardRef<HTMLInputElement, { value: string }>(
            (props, ref) => null
        );
        "#,
        2,
    );

    assert_eq!(report.skipped, 0);
    assert!(report.get("Input").is_some());
}

#[test]
fn test_self_referential_props_report_circular() {
    let report = analyze(
        r#"
        interface NodeProps {
            label: string;
            next: NodeProps;
        }

        export function Node(props: NodeProps) {
            return null;
        }
        "#,
        4,
    );

    let shape = report.get("Node").unwrap();
    assert_eq!(shape.property("label"), Some(&leaf("string")));
    assert_eq!(shape.property("next"), Some(&ResolvedShape::Circular));
}

#[test]
fn test_depth_cutoff_in_real_source() {
    let report = analyze(
        r#"
        export function Tree(props: {
            root: { child: { grandchild: { leaf: string } } };
        }) {
            return null;
        }
        "#,
        2,
    );

    let shape = report.get("Tree").unwrap();
    let grandchild = shape
        .property("root")
        .and_then(|s| s.property("child"))
        .and_then(|s| s.property("grandchild"))
        .unwrap();
    assert_eq!(*grandchild, ResolvedShape::MaxDepth);
}

#[test]
fn test_union_and_function_props_stay_textual() {
    let report = analyze(
        r#"
        export function Button(props: {
            size: "small" | "large";
            onClick: (id: string) => void;
            meta: unknown;
        }) {
            return null;
        }
        "#,
        2,
    );

    let shape = report.get("Button").unwrap();
    assert_eq!(shape.property("size"), Some(&leaf(r#""small" | "large""#)));
    assert_eq!(
        shape.property("onClick"),
        Some(&leaf("(id: string) => void"))
    );
    assert_eq!(shape.property("meta"), Some(&leaf("unknown")));
}

#[test]
fn test_arrow_component_with_alias_props() {
    let report = analyze(
        r#"
        type BadgeProps = { label: string; count: number };
        export const Badge = (props: BadgeProps) => null;
        "#,
        2,
    );

    let shape = report.get("Badge").unwrap();
    assert_eq!(shape.property("label"), Some(&leaf("string")));
    assert_eq!(shape.property("count"), Some(&leaf("number")));
}

#[test]
fn test_class_component_is_classified_but_skipped() {
    let report = analyze(
        r#"
        import * as React from "react";
        export class Panel extends React.Component<{ open: boolean }> {
            render() { return null; }
        }
        "#,
        2,
    );

    // Classes match the component pattern but carry no extractable props
    // parameter, so they land in the skip count
    assert!(report.is_empty());
    assert_eq!(report.skipped, 1);
}

#[test]
fn test_inherited_interface_props_are_included() {
    let report = analyze(
        r#"
        interface BaseProps { id: string }
        interface CardProps extends BaseProps { title: string }

        export function Card(props: CardProps) { return null; }
        "#,
        2,
    );

    let shape = report.get("Card").unwrap();
    assert_eq!(shape.property("title"), Some(&leaf("string")));
    assert_eq!(shape.property("id"), Some(&leaf("string")));
}

#[test]
fn test_array_of_interfaces_resolves_structurally() {
    let report = analyze(
        r#"
        interface Item { id: string; label: string }

        export function List(props: { items: Item[] }) { return null; }
        "#,
        3,
    );

    let shape = report.get("List").unwrap();
    assert_eq!(
        serde_json::to_string(shape).unwrap(),
        r#"{"items":[{"id":"string","label":"string"}]}"#
    );
}

#[test]
fn test_mixed_file_counts_components_and_skips() {
    let report = analyze(
        r#"
        import { forwardRef } from "react";

        export const API_URL = "https://example.test";

        export function Card(props: { title: string }) { return null; }

        export const Input = forwardRef<HTMLInputElement, { value: string }>(
            (props, ref) => null
        );

        export function useThing() { return 1; }
        "#,
        2,
    );

    assert_eq!(report.len(), 2);
    assert_eq!(report.skipped, 2);
}

#[test]
fn test_unresolvable_named_props_type_is_a_leaf() {
    let report = analyze(
        r#"
        import { forwardRef } from "react";
        import type { RemoteProps } from "./remote";

        export const Widget = forwardRef<HTMLDivElement, RemoteProps>(
            (props, ref) => null
        );
        "#,
        2,
    );

    // The props type lives in another unit; it does not decompose, but it
    // is still reported textually
    assert_eq!(report.get("Widget"), Some(&leaf("RemoteProps")));
}

#[test]
fn test_resolution_depth_is_configurable() {
    let source = r#"
        export function Deep(props: { a: { b: { c: { d: string } } } }) {
            return null;
        }
    "#;

    let shallow = analyze(source, 1);
    let deep = analyze(source, 4);

    let cut = shallow
        .get("Deep")
        .and_then(|s| s.property("a"))
        .and_then(|s| s.property("b"))
        .unwrap();
    assert_eq!(*cut, ResolvedShape::MaxDepth);

    let full = deep
        .get("Deep")
        .and_then(|s| s.property("a"))
        .and_then(|s| s.property("b"))
        .and_then(|s| s.property("c"))
        .and_then(|s| s.property("d"))
        .unwrap();
    assert_eq!(*full, leaf("string"));
}
