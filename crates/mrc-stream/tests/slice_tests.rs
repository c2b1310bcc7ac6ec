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

//! Cooperative slicing, cancellation and timeout tests

use mrc_core::{CompileError, ErrorCategory, MarkupNode};
use mrc_stream::{CancelFlag, Compiler, CompilerConfig, SliceOutcome};
use mrc_test::fixtures::builders::NodeStreamBuilder;
use mrc_test::{fixtures, presentation_types, RecordingSink};
use std::time::Duration;

fn panel(types: &mrc_core::TypeTable, directive: Option<&str>) -> Vec<MarkupNode> {
    let builder = NodeStreamBuilder::new(types)
        .document_start()
        .element("StackPanel");
    let builder = match directive {
        Some(mode) => builder.def_attribute("SynchronousMode", mode),
        None => builder,
    };
    builder
        .end_attributes()
        .element("Button")
        .end_element()
        .element("TextBlock")
        .end_element()
        .end_element()
        .document_end()
        .build()
}

fn small_slices() -> CompilerConfig {
    CompilerConfig {
        slice_budget: Duration::from_secs(60),
        max_records_per_slice: 1,
        ..Default::default()
    }
}

// ==================== Slice Tests ====================

#[test]
fn test_synchronous_mode_runs_to_completion() {
    let types = presentation_types();
    let mut source = panel(&types, None).into_iter();
    let mut compiler = Compiler::with_config(RecordingSink::new(), &types, small_slices());

    let mut outcomes = Vec::new();
    loop {
        let outcome = compiler.run_slice(&mut source).unwrap();
        outcomes.push(outcome);
        if outcome == SliceOutcome::Finished {
            break;
        }
    }

    // DocumentStart, root and EndAttributes each fill a slice; the first
    // child locks synchronous mode and the rest runs in one go.
    assert_eq!(
        outcomes,
        vec![
            SliceOutcome::Yielded,
            SliceOutcome::Yielded,
            SliceOutcome::Yielded,
            SliceOutcome::Finished,
        ]
    );
    assert_eq!(compiler.stats().slices, 4);
    assert!(compiler.is_closed());
    assert_eq!(compiler.sink().records.len(), 9);
}

#[test]
fn test_asynchronous_mode_keeps_yielding() {
    let types = presentation_types();
    let nodes = panel(&types, Some("Async"));
    let total = nodes.len();
    let mut source = nodes.into_iter();
    let mut compiler = Compiler::with_config(RecordingSink::new(), &types, small_slices());

    let mut yielded = 0;
    while compiler.run_slice(&mut source).unwrap() == SliceOutcome::Yielded {
        yielded += 1;
    }

    assert_eq!(yielded, total - 1);
    assert_eq!(compiler.sink().records.len(), total);
    assert_eq!(compiler.sink().close_count, 1);
}

#[test]
fn test_slice_after_finish_is_rejected() {
    let types = presentation_types();
    let mut source = fixtures::plain_button(&types).into_iter();
    let mut compiler = Compiler::new(RecordingSink::new(), &types);
    assert_eq!(compiler.run_slice(&mut source).unwrap(), SliceOutcome::Finished);
    assert_eq!(compiler.run_slice(&mut source).unwrap_err(), CompileError::Closed);
}

#[test]
fn test_exhausted_source_finishes_without_closing() {
    let types = presentation_types();
    let mut source = NodeStreamBuilder::new(&types)
        .document_start()
        .element("Button")
        .build()
        .into_iter();
    let mut compiler = Compiler::new(RecordingSink::new(), &types);
    assert_eq!(compiler.run_slice(&mut source).unwrap(), SliceOutcome::Finished);
    assert!(!compiler.is_closed());
    assert_eq!(compiler.sink().close_count, 0);
}

// ==================== Cancellation Tests ====================

#[test]
fn test_cancel_between_slices() {
    let types = presentation_types();
    let mut source = panel(&types, Some("Async")).into_iter();
    let mut compiler = Compiler::with_config(RecordingSink::new(), &types, small_slices());

    assert_eq!(compiler.run_slice(&mut source).unwrap(), SliceOutcome::Yielded);
    compiler.cancel_flag().cancel();

    let err = compiler.run_slice(&mut source).unwrap_err();
    assert_eq!(err, CompileError::Cancelled);
    assert_eq!(err.category(), ErrorCategory::Interrupted);
    assert!(compiler.is_closed());
    assert_eq!(compiler.sink().close_count, 1);
    assert_eq!(compiler.sink().records.len(), 1);
}

#[test]
fn test_shared_cancel_flag() {
    let types = presentation_types();
    let flag = CancelFlag::new();
    let mut compiler =
        Compiler::new(RecordingSink::new(), &types).with_cancel_flag(flag.clone());
    flag.cancel();
    assert!(compiler.cancel_flag().is_cancelled());

    let mut source = fixtures::plain_button(&types).into_iter();
    assert_eq!(
        compiler.run_slice(&mut source).unwrap_err(),
        CompileError::Cancelled
    );
    assert!(compiler.sink().records.is_empty());
}

// ==================== Timeout Tests ====================

#[test]
fn test_timeout_in_run() {
    let types = presentation_types();
    let config = CompilerConfig {
        timeout: Some(Duration::from_nanos(1)),
        ..Default::default()
    };
    let mut compiler = Compiler::with_config(RecordingSink::new(), &types, config);
    std::thread::sleep(Duration::from_millis(2));

    let err = compiler.run(fixtures::plain_button(&types)).unwrap_err();
    assert!(matches!(err, CompileError::Timeout { .. }));
    assert_eq!(compiler.sink().close_count, 1);
}

#[test]
fn test_timeout_checked_at_slice_start() {
    let types = presentation_types();
    let config = CompilerConfig {
        timeout: Some(Duration::from_nanos(1)),
        ..Default::default()
    };
    let mut compiler = Compiler::with_config(RecordingSink::new(), &types, config);
    std::thread::sleep(Duration::from_millis(2));

    let mut source = fixtures::plain_button(&types).into_iter();
    let err = compiler.run_slice(&mut source).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Interrupted);
    assert!(compiler.sink().records.is_empty());
}

#[test]
fn test_generous_timeout_succeeds() {
    let types = presentation_types();
    let config = CompilerConfig {
        timeout: Some(Duration::from_secs(60)),
        ..Default::default()
    };
    let mut compiler = Compiler::with_config(RecordingSink::new(), &types, config);
    let stats = compiler.run(fixtures::plain_button(&types)).unwrap();
    assert_eq!(stats.records_written, 7);
}
