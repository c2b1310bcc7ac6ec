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

//! Node-stream dispatcher for the markup record compiler.
//!
//! This crate turns a sequence of [`MarkupNode`](mrc_core::MarkupNode)s into
//! records for a [`RecordSink`](mrc_core::RecordSink).
//!
//! # Features
//!
//! - **Per-kind handlers**: [`NodeHandler`] has one method per node kind, each
//!   defaulting to the base grammar, so an interpreter overrides only what it
//!   changes
//! - **Interpreter stack**: style and template blocks install a [`StyleLayer`]
//!   that restores the previous interpreter when the block ends
//! - **Order-independent setters**: a setter's `Value` is converted with the
//!   converter of the property its `Property` names, in either source order
//! - **Extension replay**: expanded markup-extension subtrees are replayed
//!   through the same dispatch path as ordinary markup
//! - **Skip hook**: a [`NodeInspector`] can drop a node or a whole subtree
//! - **Cooperative stepping**: [`Compiler::run_slice`] processes time-boxed
//!   slices, with cancellation polled at slice boundaries
//! - **Timeout protection**: an optional overall time limit
//!
//! # Quick Start
//!
//! ```rust
//! use mrc_core::node::{ElementNode, Marker, PropertyNode};
//! use mrc_core::{MarkupNode, Position, PropertyIdentity, TypeRef};
//! use mrc_stream::Compiler;
//! use mrc_test::{presentation_types, RecordingSink};
//!
//! let types = presentation_types();
//! let button = TypeRef::new("PresentationFramework", "System.Windows.Controls.Button");
//! let width = PropertyIdentity::new(button.clone(), "Width");
//!
//! let mut compiler = Compiler::new(RecordingSink::new(), &types);
//! compiler
//!     .run(vec![
//!         MarkupNode::DocumentStart(Marker::at(Position::new(1, 1, 0))),
//!         MarkupNode::ElementStart(ElementNode::new(Position::new(1, 1, 1), button)),
//!         MarkupNode::Property(PropertyNode::new(Position::new(1, 9, 2), width, "75")),
//!         MarkupNode::EndAttributes(Marker::at(Position::new(1, 20, 2))),
//!         MarkupNode::ElementEnd(Marker::at(Position::new(1, 20, 1))),
//!         MarkupNode::DocumentEnd(Marker::at(Position::new(1, 20, 0))),
//!     ])
//!     .unwrap();
//!
//! let width_record = &compiler.sink().records[2];
//! assert_eq!(width_record.converter.as_ref().map(|t| t.local_name()), Some("Double"));
//! ```

mod compiler;
mod config;
mod emitter;
mod handler;
mod hooks;
mod interpreter;
pub mod style;

pub use compiler::{CompileStats, Compiler, SliceOutcome};
pub use config::{CancelFlag, CompilerConfig};
pub use emitter::Emitter;
pub use handler::{route, BaseGrammar, NodeHandler};
pub use hooks::{ErrorReporter, Inspection, LogReporter, NodeInspector};
pub use interpreter::InterpreterStack;
pub use style::{BlockKind, ModeEntry, Role, StyleLayer, StyleMode, StyleVocabulary};
