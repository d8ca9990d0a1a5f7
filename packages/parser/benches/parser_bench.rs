use criterion::{black_box, criterion_group, criterion_main, Criterion};
use propscan_parser::parse;

fn parse_simple_component(c: &mut Criterion) {
    let source = r#"
        import { forwardRef } from "react";

        export function Card(props: { title: string; tags: string[] }) {
            return null;
        }
    "#;

    c.bench_function("parse_simple_component", |b| {
        b.iter(|| parse(black_box(source)))
    });
}

fn parse_medium_module(c: &mut Criterion) {
    let source = r#"
        import * as React from "react";
        import { forwardRef, useState } from "react";
        import type { ReactNode } from "react";

        export type Size = "small" | "medium" | "large";

        export interface BaseProps {
            id: string;
            className?: string;
        }

        export interface CardProps extends BaseProps {
            title: string;
            size: Size;
            tags: string[];
            meta: { author: { name: string; email: string }; updatedAt: number };
            children?: ReactNode;
            onSelect?(id: string): void;
        }

        export const Card = (props: CardProps) => {
            const [open, setOpen] = useState(false);
            return null;
        };

        export const FancyInput = forwardRef<HTMLInputElement, CardProps>(
            (props, ref) => null
        );

        export class Legacy extends React.Component<CardProps> {
            render() {
                return null;
            }
        }
    "#;

    c.bench_function("parse_medium_module", |b| {
        b.iter(|| parse(black_box(source)))
    });
}

criterion_group!(benches, parse_simple_component, parse_medium_module);
criterion_main!(benches);
