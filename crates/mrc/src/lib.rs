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

//! # MRC - Markup Record Compiler
//!
//! MRC turns a stream of markup nodes, as produced by a markup tokenizer or
//! built programmatically, into the flat record stream of a binary markup
//! format. Records go to a caller-supplied [`RecordSink`]; types and members
//! are looked up through a [`TypeResolver`].
//!
//! ## Quick Start
//!
//! ```rust
//! use mrc::{compile, MarkupWriter};
//! use mrc_test::{fixtures, presentation_types, RecordingSink};
//!
//! let types = presentation_types();
//!
//! // Compile a tokenizer-shaped node stream
//! let mut sink = RecordingSink::new();
//! let stats = compile(fixtures::plain_button(&types), &mut sink, &types).unwrap();
//! assert_eq!(stats.records_written, sink.records.len() as u64);
//!
//! // Or produce the same records through the writer
//! let mut writer = mrc::writer(RecordingSink::new(), &types);
//! writer.start_document().unwrap();
//! writer.start_element("Button").unwrap();
//! writer.write_property("Width", "75").unwrap();
//! writer.end_element().unwrap();
//! writer.end_document().unwrap();
//! assert_eq!(writer.sink().close_count, 1);
//! ```
//!
//! ## Features
//!
//! - **Dispatcher**: one handler per node kind, replaceable per block
//! - **Style and template blocks**: setter and trigger values converted with
//!   the converter of the property they target, in any attribute order
//! - **Programmatic writer**: well-formedness checked before any record is
//!   emitted
//! - **Collection resolution**: locates or creates the collection behind a
//!   collection property
//! - **Cooperative stepping**: time-boxed slices with cancellation
//!
//! ## Modules
//!
//! - [`node`]: The node model
//! - [`extension`]: Markup-extension expansion
//! - [`collection`]: Collection property resolution
//! - [`style`]: Style, template and trigger interpretation
//!
//! Enable the `serde` feature to load a [`TypeTable`] from JSON.

// Re-export core types
pub use mrc_core::{
    // Errors
    CompileError,
    CompileResult,
    ErrorCategory,
    SinkError,
    // Node model
    MarkupNode,
    NodeKind,
    ParseMode,
    Position,
    PropertyIdentity,
    ScopeKind,
    TypeRef,
    // Resolution
    DynamicResolver,
    MemberInfo,
    TypeResolver,
    TypeTable,
    // Output
    IdKey,
    Limits,
    Record,
    RecordSink,
};

// Re-export the dispatcher
pub use mrc_stream::{
    BaseGrammar, CancelFlag, CompileStats, Compiler, CompilerConfig, Emitter, ErrorReporter,
    Inspection, LogReporter, NodeHandler, NodeInspector, SliceOutcome,
};

// Re-export the writer
pub use mrc_writer::{MarkupWriter, WriterConfig};

// Error handling extensions
mod error_ext;
pub use error_ext::CompileResultExt;

pub mod node {
    //! The node model
    pub use mrc_core::node::*;
}

pub mod extension {
    //! Markup-extension expansion
    pub use mrc_core::extension::{ExtensionExpander, Expansion, NoExtensions};
}

pub mod collection {
    //! Collection property resolution
    pub use mrc_core::collection::{
        AccessMechanism, CollectionHost, CollectionResolver, ResolvedCollection,
    };
}

pub mod style {
    //! Style, template and trigger interpretation
    pub use mrc_stream::style::*;
}

// Convenience functions at crate root

/// Compile a complete node stream with the default configuration.
///
/// The sink is closed once the stream ends or compilation fails. Pass
/// `&mut sink` to keep the sink afterwards.
///
/// # Examples
///
/// ```rust
/// use mrc_test::{fixtures, presentation_types, RecordingSink};
///
/// let types = presentation_types();
/// let mut sink = RecordingSink::new();
/// mrc::compile(fixtures::setter_style(&types, false), &mut sink, &types).unwrap();
/// assert_eq!(sink.close_count, 1);
/// ```
pub fn compile<I, S, R>(nodes: I, sink: S, resolver: R) -> CompileResult<CompileStats>
where
    I: IntoIterator<Item = MarkupNode>,
    S: RecordSink,
    R: TypeResolver,
{
    compile_with_config(nodes, sink, resolver, CompilerConfig::default())
}

/// Compile a complete node stream with an explicit configuration.
pub fn compile_with_config<I, S, R>(
    nodes: I,
    sink: S,
    resolver: R,
    config: CompilerConfig,
) -> CompileResult<CompileStats>
where
    I: IntoIterator<Item = MarkupNode>,
    S: RecordSink,
    R: TypeResolver,
{
    Compiler::with_config(sink, resolver, config).run(nodes)
}

/// Create a [`MarkupWriter`] with the default configuration.
#[inline]
pub fn writer<S: RecordSink, R: TypeResolver>(sink: S, resolver: R) -> MarkupWriter<S, R> {
    MarkupWriter::new(sink, resolver)
}
