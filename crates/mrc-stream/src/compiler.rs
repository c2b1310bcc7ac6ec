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

//! The node-stream dispatcher.

use crate::config::{CancelFlag, CompilerConfig};
use crate::emitter::Emitter;
use crate::handler::NodeHandler;
use crate::hooks::{ErrorReporter, Inspection, LogReporter, NodeInspector};
use crate::interpreter::InterpreterStack;
use crate::style::{ModeEntry, StyleLayer, StyleVocabulary};
use mrc_core::node::SYNCHRONOUS_MODE_DIRECTIVE;
use mrc_core::{
    CompileError, CompileResult, MarkupNode, NodeKind, ParseMode, RecordSink, ResolutionCache,
    TypeResolver,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// How often [`Compiler::run`] checks the timeout, in nodes.
const TIMEOUT_CHECK_INTERVAL: u64 = 100;

/// Counters for one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Nodes offered to the compiler, including replayed and skipped ones.
    pub nodes_seen: u64,
    /// Records handed to the sink.
    pub records_written: u64,
    /// Nodes dropped by the inspector.
    pub nodes_skipped: u64,
    /// Cooperative slices started.
    pub slices: u64,
}

/// Result of one cooperative slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    /// The slice budget ran out; call again to continue.
    Yielded,
    /// The source is exhausted or the document has ended.
    Finished,
}

/// Compiles a markup node stream into sink records.
///
/// Each node is routed to the innermost interpreter. The base grammar
/// forwards nodes unchanged; entering a style or template block installs a
/// [`StyleLayer`] that reinterprets setter and trigger attributes until the
/// block ends.
///
/// Any error is enriched with the failing node's position, reported, and
/// returned; the sink is closed before the error reaches the caller and the
/// compiler rejects all further input.
///
/// # Examples
///
/// ```rust
/// use mrc_core::node::{ElementNode, Marker};
/// use mrc_core::{MarkupNode, Position, TypeRef};
/// use mrc_stream::Compiler;
/// use mrc_test::{presentation_types, RecordingSink};
///
/// let types = presentation_types();
/// let mut compiler = Compiler::new(RecordingSink::new(), &types);
///
/// let button = TypeRef::new("PresentationFramework", "System.Windows.Controls.Button");
/// compiler
///     .run(vec![
///         MarkupNode::DocumentStart(Marker::at(Position::new(1, 1, 0))),
///         MarkupNode::ElementStart(ElementNode::new(Position::new(1, 1, 1), button)),
///         MarkupNode::ElementEnd(Marker::at(Position::new(1, 9, 1))),
///         MarkupNode::DocumentEnd(Marker::at(Position::new(1, 9, 0))),
///     ])
///     .unwrap();
///
/// assert_eq!(compiler.sink().records.len(), 4);
/// assert_eq!(compiler.sink().close_count, 1);
/// ```
pub struct Compiler<S: RecordSink, R: TypeResolver> {
    sink: S,
    resolver: R,
    cache: ResolutionCache,
    config: CompilerConfig,
    vocabulary: Arc<StyleVocabulary>,
    interpreters: InterpreterStack,
    inspector: Option<Box<dyn NodeInspector>>,
    reporter: Box<dyn ErrorReporter>,
    cancel: CancelFlag,
    parse_mode: ParseMode,
    skip: Option<(NodeKind, usize)>,
    extension_buffer: Vec<MarkupNode>,
    root_seen: bool,
    closed: bool,
    sink_closed: bool,
    stats: CompileStats,
    start_time: Instant,
}

impl<S: RecordSink, R: TypeResolver> Compiler<S, R> {
    /// Create a compiler with the default configuration.
    pub fn new(sink: S, resolver: R) -> Self {
        Self::with_config(sink, resolver, CompilerConfig::default())
    }

    /// Create a compiler with a custom configuration.
    pub fn with_config(sink: S, resolver: R, config: CompilerConfig) -> Self {
        let vocabulary = Arc::new(config.vocabulary.clone());
        Self {
            sink,
            resolver,
            cache: ResolutionCache::new(),
            config,
            vocabulary,
            interpreters: InterpreterStack::new(),
            inspector: None,
            reporter: Box::new(LogReporter),
            cancel: CancelFlag::new(),
            parse_mode: ParseMode::Uninitialized,
            skip: None,
            extension_buffer: Vec::new(),
            root_seen: false,
            closed: false,
            sink_closed: false,
            stats: CompileStats::default(),
            start_time: Instant::now(),
        }
    }

    /// Install a mid-stream inspector.
    pub fn with_inspector(mut self, inspector: impl NodeInspector + 'static) -> Self {
        self.inspector = Some(Box::new(inspector));
        self
    }

    /// Replace the error reporter.
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Share a cancellation flag with the owner of this compilation.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Install a custom interpreter above the current one.
    ///
    /// It stays active until it requests detach through its [`Emitter`].
    pub fn push_interpreter(&mut self, handler: Box<dyn NodeHandler>) {
        debug!(interpreter = handler.label(), "installing interpreter");
        self.interpreters.push(handler);
    }

    /// Handle for cancelling this compilation from elsewhere.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the compiler and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    pub fn stats(&self) -> &CompileStats {
        &self.stats
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mode stack of the active style layer (empty outside any block).
    pub fn active_modes(&self) -> &[ModeEntry] {
        self.interpreters.top().mode_stack()
    }

    /// Number of interpreters installed above the base grammar.
    pub fn interpreter_depth(&self) -> usize {
        self.interpreters.depth()
    }

    /// Compile a complete node sequence.
    pub fn run<I>(&mut self, nodes: I) -> CompileResult<CompileStats>
    where
        I: IntoIterator<Item = MarkupNode>,
    {
        for node in nodes {
            if self.stats.nodes_seen % TIMEOUT_CHECK_INTERVAL == 0 {
                if let Err(err) = self.check_timeout() {
                    return Err(self.fail(err));
                }
            }
            self.dispatch(node)?;
        }
        Ok(self.stats.clone())
    }

    /// Process the next node of `source`.
    ///
    /// Returns `false` once the source is exhausted.
    pub fn step<I>(&mut self, source: &mut I) -> CompileResult<bool>
    where
        I: Iterator<Item = MarkupNode>,
    {
        match source.next() {
            Some(node) => {
                self.dispatch(node)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Process nodes of `source` for one time-boxed slice.
    ///
    /// Cancellation and the overall timeout are checked once, at the start of
    /// the slice. Once the parse mode is [`ParseMode::Synchronous`] the slice
    /// runs until the source is exhausted.
    pub fn run_slice<I>(&mut self, source: &mut I) -> CompileResult<SliceOutcome>
    where
        I: Iterator<Item = MarkupNode>,
    {
        if self.closed {
            return Err(CompileError::Closed);
        }
        if let Err(err) = self.check_interrupt() {
            return Err(self.fail(err));
        }
        self.stats.slices += 1;
        let slice_start = Instant::now();
        let records_at_start = self.stats.records_written;
        trace!(slice = self.stats.slices, "slice started");

        loop {
            let Some(node) = source.next() else {
                return Ok(SliceOutcome::Finished);
            };
            self.dispatch(node)?;
            if self.closed {
                return Ok(SliceOutcome::Finished);
            }
            if self.parse_mode == ParseMode::Synchronous {
                if self.stats.nodes_seen % TIMEOUT_CHECK_INTERVAL == 0 {
                    if let Err(err) = self.check_timeout() {
                        return Err(self.fail(err));
                    }
                }
                continue;
            }
            let written = self.stats.records_written - records_at_start;
            if slice_start.elapsed() >= self.config.slice_budget
                || written >= self.config.max_records_per_slice as u64
            {
                trace!(slice = self.stats.slices, written, "slice yielded");
                return Ok(SliceOutcome::Yielded);
            }
        }
    }

    /// Dispatch one node.
    pub fn dispatch(&mut self, node: MarkupNode) -> CompileResult<()> {
        if self.closed {
            return Err(CompileError::Closed);
        }
        match self.dispatch_inner(node) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Queue an expanded extension subtree for replay at the next flush point.
    pub fn buffer_expansion(&mut self, nodes: Vec<MarkupNode>) -> CompileResult<()> {
        if self.closed {
            return Err(CompileError::Closed);
        }
        let limit = self.config.limits.max_buffered_nodes;
        if self.extension_buffer.len() + nodes.len() > limit {
            let err = CompileError::protocol(format!(
                "extension buffer would hold {} nodes (limit {})",
                self.extension_buffer.len() + nodes.len(),
                limit
            ));
            return Err(self.fail(err));
        }
        trace!(count = nodes.len(), "buffered extension subtree");
        self.extension_buffer.extend(nodes);
        Ok(())
    }

    /// Close the sink and reject further input. Idempotent.
    pub fn close(&mut self) -> CompileResult<()> {
        self.closed = true;
        self.extension_buffer.clear();
        self.close_sink()
    }

    fn dispatch_inner(&mut self, node: MarkupNode) -> CompileResult<()> {
        let position = node.position();
        self.process(node).map_err(|err| err.with_position(position))
    }

    fn process(&mut self, node: MarkupNode) -> CompileResult<()> {
        self.stats.nodes_seen += 1;
        let kind = node.kind();

        if let Some((end, depth)) = self.skip {
            self.stats.nodes_skipped += 1;
            if kind == end && node.depth() == depth {
                trace!(%kind, depth, "skip range ended");
                self.skip = None;
            }
            return Ok(());
        }

        if let Some(inspector) = self.inspector.as_mut() {
            if inspector.inspect(&node) == Inspection::Skip {
                self.stats.nodes_skipped += 1;
                if let Some(end) = kind.matching_end() {
                    trace!(%kind, depth = node.depth(), "skipping subtree");
                    self.skip = Some((end, node.depth()));
                } else {
                    trace!(%kind, "skipping node");
                }
                return Ok(());
            }
        }

        let limit = self.config.limits.max_depth;
        if node.depth() > limit {
            return Err(CompileError::depth_exceeded(node.depth(), limit));
        }

        if kind.is_flush_point() && !self.extension_buffer.is_empty() {
            let buffered = std::mem::take(&mut self.extension_buffer);
            trace!(count = buffered.len(), "replaying extension subtree");
            for replayed in buffered {
                self.dispatch_inner(replayed)?;
            }
        }

        self.track_parse_mode(&node)?;

        if kind == NodeKind::DocumentEnd && !self.active_modes().is_empty() {
            return Err(CompileError::protocol(
                "document ended inside an open style or template block",
            ));
        }

        if let MarkupNode::ElementStart(element) = &node {
            if let Some(block) = self.vocabulary.block_kind(element.ty.local_name()) {
                let mut out = Emitter::new(
                    &mut self.sink,
                    &self.resolver,
                    &mut self.cache,
                    &mut self.stats,
                );
                self.interpreters.top_mut().yield_to_block(&mut out)?;
                let layer = StyleLayer::new(block, element.ty.clone(), Arc::clone(&self.vocabulary));
                debug!(block = %element.ty, depth = element.position.depth, "entering style layer");
                self.interpreters.push(Box::new(layer));
            }
        }

        let detach = {
            let mut out = Emitter::new(
                &mut self.sink,
                &self.resolver,
                &mut self.cache,
                &mut self.stats,
            );
            self.interpreters.top_mut().handle(node, &mut out)?;
            out.detach_requested()
        };
        if detach {
            if let Some(layer) = self.interpreters.pop() {
                debug!(interpreter = layer.label(), "leaving interpreter");
            }
        }

        if kind == NodeKind::DocumentEnd {
            debug!(records = self.stats.records_written, "document complete");
            self.closed = true;
            self.close_sink()?;
        }
        Ok(())
    }

    fn track_parse_mode(&mut self, node: &MarkupNode) -> CompileResult<()> {
        match node {
            MarkupNode::DefAttribute(attr) if attr.name == SYNCHRONOUS_MODE_DIRECTIVE => {
                if self.parse_mode != ParseMode::Uninitialized {
                    return Err(CompileError::ParseModeConflict {
                        position: None,
                        locked: self.parse_mode,
                    });
                }
                let mode = ParseMode::from_directive(&attr.value).ok_or_else(|| {
                    CompileError::protocol(format!(
                        "invalid {} value '{}'",
                        SYNCHRONOUS_MODE_DIRECTIVE, attr.value
                    ))
                })?;
                self.lock_parse_mode(mode, "directive");
            }
            MarkupNode::ElementStart(_) => {
                if !self.root_seen {
                    self.root_seen = true;
                } else if self.parse_mode == ParseMode::Uninitialized {
                    self.lock_parse_mode(ParseMode::Synchronous, "first child element");
                }
            }
            MarkupNode::DocumentEnd(_) if self.parse_mode == ParseMode::Uninitialized => {
                self.lock_parse_mode(ParseMode::Synchronous, "document end");
            }
            _ => {}
        }
        Ok(())
    }

    fn lock_parse_mode(&mut self, mode: ParseMode, reason: &str) {
        debug!(%mode, reason, "parse mode locked");
        self.parse_mode = mode;
    }

    fn check_timeout(&self) -> CompileResult<()> {
        if let Some(limit) = self.config.timeout {
            let elapsed = self.start_time.elapsed();
            if elapsed > limit {
                return Err(CompileError::Timeout { elapsed, limit });
            }
        }
        Ok(())
    }

    fn check_interrupt(&self) -> CompileResult<()> {
        if self.cancel.is_cancelled() {
            return Err(CompileError::Cancelled);
        }
        self.check_timeout()
    }

    fn close_sink(&mut self) -> CompileResult<()> {
        if self.sink_closed {
            return Ok(());
        }
        self.sink_closed = true;
        debug!("closing record sink");
        self.sink.close()?;
        Ok(())
    }

    /// Report `err`, close the sink and stop accepting input.
    fn fail(&mut self, err: CompileError) -> CompileError {
        self.reporter.report(&err);
        self.closed = true;
        self.skip = None;
        self.extension_buffer.clear();
        if let Err(close_err) = self.close_sink() {
            warn!(error = %close_err, "closing the sink after a failure also failed");
        }
        err
    }
}

impl<S: RecordSink + std::fmt::Debug, R: TypeResolver> std::fmt::Debug for Compiler<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("sink", &self.sink)
            .field("interpreters", &self.interpreters)
            .field("parse_mode", &self.parse_mode)
            .field("closed", &self.closed)
            .field("stats", &self.stats)
            .finish()
    }
}
