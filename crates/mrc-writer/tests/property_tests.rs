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

//! Property-based tests for the writer's structural guarantees.

use mrc_core::{CompileError, NodeKind};
use mrc_test::{presentation_types, RecordingSink};
use mrc_writer::MarkupWriter;
use proptest::prelude::*;

const ATTRIBUTES: [(&str, &str); 4] = [
    ("Width", "10"),
    ("Height", "20"),
    ("Tag", "t"),
    ("Opacity", "0.5"),
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: each element with at least one attribute gets exactly one
    /// `EndAttributes`; elements without attributes get none. Once a child
    /// is written, further attributes are refused without side effects.
    #[test]
    fn prop_end_attributes_per_element(
        elements in prop::collection::vec((0usize..5, any::<bool>()), 1..10)
    ) {
        let types = presentation_types();
        let mut w = MarkupWriter::new(RecordingSink::new(), &types);
        w.start_document().unwrap();
        w.start_element("StackPanel").unwrap();
        for &(count, child) in &elements {
            w.start_element("Border").unwrap();
            for i in 0..count {
                let (name, value) = ATTRIBUTES[i % ATTRIBUTES.len()];
                w.write_property(name, value).unwrap();
            }
            if child {
                w.start_element("TextBlock").unwrap();
                w.end_element().unwrap();
                let records = w.sink().records.len();
                let err = w.write_property("Width", "1").unwrap_err();
                prop_assert!(
                    matches!(err, CompileError::Protocol { .. }),
                    "unexpected error: {:?}",
                    err
                );
                prop_assert!(!w.is_closed());
                prop_assert_eq!(w.sink().records.len(), records);
            }
            w.end_element().unwrap();
        }
        w.end_element().unwrap();
        w.end_document().unwrap();

        let kinds = w.sink().kinds();
        let expected = elements.iter().filter(|(c, _)| *c > 0).count();
        let actual = kinds.iter().filter(|k| **k == NodeKind::EndAttributes).count();
        prop_assert_eq!(actual, expected);

        let written: usize = elements.iter().map(|(c, _)| c).sum();
        let properties = kinds.iter().filter(|k| **k == NodeKind::Property).count();
        prop_assert_eq!(properties, written);
    }

    /// Property: a mismatched end call reports both kinds and leaves the
    /// writer where it was.
    #[test]
    fn prop_mismatch_leaves_depth(depth in 1usize..8, wrong in 0usize..3) {
        let types = presentation_types();
        let mut w = MarkupWriter::new(RecordingSink::new(), &types);
        w.start_document().unwrap();
        for _ in 0..depth {
            w.start_element("Border").unwrap();
            w.start_complex_property("Child").unwrap();
        }
        let before = w.depth();
        let records = w.sink().records.len();

        let err = match wrong {
            0 => w.end_element(),
            1 => w.end_list_property(),
            _ => w.end_document(),
        }
        .unwrap_err();
        prop_assert!(
            matches!(err, CompileError::ScopeMismatch { .. }),
            "unexpected error: {:?}",
            err
        );
        prop_assert_eq!(w.depth(), before);
        prop_assert_eq!(w.sink().records.len(), records);

        for _ in 0..depth {
            w.end_complex_property().unwrap();
            w.end_element().unwrap();
        }
        w.end_document().unwrap();
        prop_assert_eq!(w.sink().close_count, 1);
    }
}
