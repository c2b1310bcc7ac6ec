// Dweve MRC - Markup Record Compiler
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Property-based tests for the dispatcher and the style layer.

use mrc_core::{MarkupNode, NodeKind, TypeTable};
use mrc_stream::{Compiler, Inspection};
use mrc_test::fixtures::builders::NodeStreamBuilder;
use mrc_test::{presentation_types, RecordingSink};
use proptest::prelude::*;

/// Setter target properties of `Button` and their converter types.
const SETTER_TARGETS: [(&str, &str); 5] = [
    ("Background", "Brush"),
    ("Width", "Double"),
    ("IsEnabled", "Boolean"),
    ("Content", "Object"),
    ("Margin", "Thickness"),
];

fn style_with_setters(types: &TypeTable, setters: &[(usize, bool)]) -> Vec<MarkupNode> {
    let mut builder = NodeStreamBuilder::new(types)
        .document_start()
        .element("Style")
        .property("TargetType", "Button")
        .end_attributes()
        .list("Setters");
    for &(target, property_first) in setters {
        let name = SETTER_TARGETS[target].0;
        builder = builder.element("Setter");
        builder = if property_first {
            builder.property("Property", name).property("Value", "x")
        } else {
            builder.property("Value", "x").property("Property", name)
        };
        builder = builder.end_attributes().end_element();
    }
    builder.end_list().end_element().document_end().build()
}

/// A setter whose value is a chain of `levels` nested borders.
fn nested_setter_value(types: &TypeTable, levels: usize) -> Vec<MarkupNode> {
    let mut builder = NodeStreamBuilder::new(types)
        .document_start()
        .element("Style")
        .property("TargetType", "Button")
        .end_attributes()
        .list("Setters")
        .element("Setter")
        .property("Property", "Content")
        .end_attributes()
        .complex("Value");
    for _ in 0..levels {
        builder = builder
            .element("Border")
            .property("Width", "1")
            .end_attributes()
            .complex("Child");
    }
    for _ in 0..levels {
        builder = builder.end_complex().end_element();
    }
    builder
        .end_complex()
        .end_element()
        .end_list()
        .end_element()
        .document_end()
        .build()
}

fn element_chain(types: &TypeTable, names: &[(usize, bool)]) -> Vec<MarkupNode> {
    const ELEMENTS: [&str; 4] = ["StackPanel", "Border", "Button", "TextBlock"];
    let mut builder = NodeStreamBuilder::new(types).document_start();
    for &(idx, with_width) in names {
        builder = builder.element(ELEMENTS[idx]);
        if with_width {
            builder = builder.property("Width", "10");
        }
        builder = builder.end_attributes();
    }
    for _ in names {
        builder = builder.end_element();
    }
    builder.document_end().build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: a setter's value converter depends only on its target
    /// property, never on attribute order.
    #[test]
    fn prop_setter_converter_independent_of_order(
        setters in prop::collection::vec((0..SETTER_TARGETS.len(), any::<bool>()), 1..8)
    ) {
        let types = presentation_types();
        let mut compiler = Compiler::new(RecordingSink::new(), &types);
        compiler.run(style_with_setters(&types, &setters)).unwrap();

        let converters: Vec<String> = compiler
            .sink()
            .properties()
            .iter()
            .filter(|r| matches!(&r.node, MarkupNode::Property(p) if p.name() == "Value"))
            .filter_map(|r| r.converter.as_ref().map(|t| t.local_name().to_string()))
            .collect();
        let expected: Vec<String> = setters
            .iter()
            .map(|&(target, _)| SETTER_TARGETS[target].1.to_string())
            .collect();
        prop_assert_eq!(converters, expected);
    }

    /// Property: inside a block the mode stack holds one entry per open scope.
    #[test]
    fn prop_mode_stack_tracks_nesting(levels in 1usize..8) {
        let types = presentation_types();
        let nodes = nested_setter_value(&types, levels);
        let mut compiler = Compiler::new(RecordingSink::new(), &types);

        let mut open = 0usize;
        let mut deepest = 0usize;
        for node in nodes {
            let kind = node.kind();
            let depth = node.depth();
            compiler.dispatch(node).unwrap();
            if kind.is_scope_start() {
                open = depth + 1;
            } else if kind.is_scope_end() {
                open = depth;
            }
            // The document scope sits outside the block.
            let expected = open.saturating_sub(1);
            prop_assert_eq!(compiler.active_modes().len(), expected);
            deepest = deepest.max(expected);
        }
        prop_assert!(deepest >= 5 + 2 * (levels - 1));
        prop_assert!(compiler.active_modes().is_empty());
    }

    /// Property: outside any block every node becomes exactly one record.
    #[test]
    fn prop_base_grammar_forwards_every_node(
        chain in prop::collection::vec((0usize..4, any::<bool>()), 1..12)
    ) {
        let types = presentation_types();
        let nodes = element_chain(&types, &chain);
        let expected: Vec<NodeKind> = nodes.iter().map(MarkupNode::kind).collect();

        let mut compiler = Compiler::new(RecordingSink::new(), &types);
        let stats = compiler.run(nodes).unwrap();
        prop_assert_eq!(compiler.sink().kinds(), expected);
        prop_assert_eq!(stats.records_written, stats.nodes_seen);
    }

    /// Property: skipping an element start drops exactly the nodes through
    /// its matching end and nothing else.
    #[test]
    fn prop_skip_hook_drops_whole_subtree(
        chain in prop::collection::vec((0usize..4, any::<bool>()), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let types = presentation_types();
        let nodes = element_chain(&types, &chain);
        let target = pick.index(chain.len()) + 1;

        let is_target = |n: &MarkupNode, kind: NodeKind| n.kind() == kind && n.depth() == target;
        let first = nodes.iter().position(|n| is_target(n, NodeKind::ElementStart)).unwrap();
        let last = nodes.iter().rposition(|n| is_target(n, NodeKind::ElementEnd)).unwrap();
        let expected: Vec<NodeKind> = nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i < first || *i > last)
            .map(|(_, n)| n.kind())
            .collect();

        let mut compiler = Compiler::new(RecordingSink::new(), &types).with_inspector(
            move |node: &MarkupNode| {
                if node.kind() == NodeKind::ElementStart && node.depth() == target {
                    Inspection::Skip
                } else {
                    Inspection::Normal
                }
            },
        );
        let stats = compiler.run(nodes).unwrap();
        prop_assert_eq!(compiler.sink().kinds(), expected);
        prop_assert_eq!(stats.nodes_skipped, (last - first + 1) as u64);
    }
}
