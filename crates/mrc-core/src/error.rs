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

//! Error types for markup compilation.
//!
//! Every failure carries enough context to locate the offending node. Errors
//! raised while a node is being dispatched are enriched with that node's
//! [`Position`] before they are reported, so handlers can create them without
//! threading positions through every call.
//!
//! # Error Categories
//!
//! - **Protocol**: The caller violated the writer or stream protocol
//! - **Unresolvable**: A type, member or tag could not be resolved, or a
//!   construct appeared where it is not allowed
//! - **Unsupported**: A recognized construct the compiler deliberately rejects
//! - **Sink**: The downstream record sink failed
//! - **Interrupted**: The compilation was cancelled or timed out
//! - **Collection**: A collection property could not be materialized
//!
//! # Examples
//!
//! ```rust
//! use mrc_core::{CompileError, ErrorCategory, Position};
//!
//! let err = CompileError::unresolvable("type 'Buton'", None)
//!     .with_position(Position::new(4, 9, 1));
//! assert_eq!(err.category(), ErrorCategory::Unresolvable);
//! assert_eq!(err.position().map(|p| p.line), Some(4));
//! assert!(err.to_string().contains("line 4, column 9"));
//! ```

use crate::node::{ParseMode, Position, ScopeKind};
use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the compiler.
pub type CompileResult<T> = Result<T, CompileError>;

/// Render an optional position for error messages.
///
/// Synthesized positions have no source line and render as unknown.
fn location(position: &Option<Position>) -> String {
    match position {
        Some(pos) if !pos.is_synthetic() => format!("at {}", pos),
        _ => "at unknown position".to_string(),
    }
}

fn suffix(context: &Option<String>) -> String {
    match context {
        Some(c) => format!(" ({})", c),
        None => String::new(),
    }
}

/// Errors produced while compiling a markup node stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A write was attempted before the document was started.
    #[error("document has not been started")]
    NotStarted,

    /// A write was attempted after the compiler was closed.
    #[error("compiler is closed")]
    Closed,

    /// The document was started twice.
    #[error("document has already been started")]
    AlreadyStarted,

    /// An end call did not match the innermost open scope.
    #[error("scope mismatch: innermost open scope is {expected}, attempted to close {actual}")]
    ScopeMismatch {
        /// Kind of the innermost open scope.
        expected: ScopeKind,
        /// Kind the caller tried to close.
        actual: ScopeKind,
    },

    /// A parse-mode directive arrived after the mode was already fixed.
    #[error("parse mode is already {locked} {}", location(.position))]
    ParseModeConflict {
        position: Option<Position>,
        /// Mode that was in effect.
        locked: ParseMode,
    },

    /// Stream or writer protocol violation.
    #[error("protocol error {}: {message}", location(.position))]
    Protocol {
        message: String,
        position: Option<Position>,
    },

    /// Structural nesting exceeded the configured limit.
    #[error("nesting depth {depth} exceeds limit {limit} {}", location(.position))]
    DepthExceeded {
        depth: usize,
        limit: usize,
        position: Option<Position>,
    },

    /// A name could not be resolved to a type, member or tag.
    #[error("cannot resolve {construct}{} {}", suffix(.context), location(.position))]
    Unresolvable {
        /// What could not be resolved (`"type 'Buton'"`).
        construct: String,
        /// Additional context such as the enclosing property.
        context: Option<String>,
        position: Option<Position>,
    },

    /// A construct appeared somewhere it is not permitted.
    #[error("{construct} is not allowed here {}: {message}", location(.position))]
    Misplaced {
        construct: String,
        message: String,
        position: Option<Position>,
    },

    /// A recognized construct that is deliberately rejected.
    #[error("{construct} is not supported {}", location(.position))]
    Unsupported {
        construct: String,
        position: Option<Position>,
    },

    /// The record sink reported a failure.
    #[error("record sink failed {}: {message}", location(.position))]
    Sink {
        message: String,
        position: Option<Position>,
    },

    /// A collection property has no instance and cannot be given one.
    #[error("collection property '{property}' is read-only and has no usable default")]
    ReadOnlyCollection { property: String },

    /// The compilation exceeded its wall-clock limit.
    #[error("compilation timed out after {elapsed:?} (limit {limit:?})")]
    Timeout { elapsed: Duration, limit: Duration },

    /// The compilation was cancelled by its owner.
    #[error("compilation was cancelled")]
    Cancelled,

    /// An error wrapped with caller-supplied context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CompileError>,
    },
}

/// Broad classification of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Protocol,
    Unresolvable,
    Unsupported,
    Sink,
    Interrupted,
    Collection,
}

impl CompileError {
    /// Create a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
            position: None,
        }
    }

    /// Create an unresolvable-name error.
    pub fn unresolvable(construct: impl Into<String>, context: Option<String>) -> Self {
        Self::Unresolvable {
            construct: construct.into(),
            context,
            position: None,
        }
    }

    /// Create a misplaced-construct error.
    pub fn misplaced(construct: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Misplaced {
            construct: construct.into(),
            message: message.into(),
            position: None,
        }
    }

    /// Create an unsupported-construct error.
    pub fn unsupported(construct: impl Into<String>) -> Self {
        Self::Unsupported {
            construct: construct.into(),
            position: None,
        }
    }

    /// Create a depth-limit error.
    pub fn depth_exceeded(depth: usize, limit: usize) -> Self {
        Self::DepthExceeded {
            depth,
            limit,
            position: None,
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotStarted
            | Self::Closed
            | Self::AlreadyStarted
            | Self::ScopeMismatch { .. }
            | Self::ParseModeConflict { .. }
            | Self::Protocol { .. }
            | Self::DepthExceeded { .. } => ErrorCategory::Protocol,
            Self::Unresolvable { .. } | Self::Misplaced { .. } => ErrorCategory::Unresolvable,
            Self::Unsupported { .. } => ErrorCategory::Unsupported,
            Self::Sink { .. } => ErrorCategory::Sink,
            Self::Timeout { .. } | Self::Cancelled => ErrorCategory::Interrupted,
            Self::ReadOnlyCollection { .. } => ErrorCategory::Collection,
            Self::WithContext { source, .. } => source.category(),
        }
    }

    /// Position of the node that caused the error, if known.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::ParseModeConflict { position, .. }
            | Self::Protocol { position, .. }
            | Self::DepthExceeded { position, .. }
            | Self::Unresolvable { position, .. }
            | Self::Misplaced { position, .. }
            | Self::Unsupported { position, .. }
            | Self::Sink { position, .. } => *position,
            Self::WithContext { source, .. } => source.position(),
            _ => None,
        }
    }

    /// Attach a position unless the error already carries one.
    pub fn with_position(mut self, at: Position) -> Self {
        match &mut self {
            Self::ParseModeConflict { position, .. }
            | Self::Protocol { position, .. }
            | Self::DepthExceeded { position, .. }
            | Self::Unresolvable { position, .. }
            | Self::Misplaced { position, .. }
            | Self::Unsupported { position, .. }
            | Self::Sink { position, .. } => {
                if position.is_none() {
                    *position = Some(at);
                }
            }
            Self::WithContext { source, .. } => {
                let inner = std::mem::replace(source.as_mut(), Self::Cancelled);
                **source = inner.with_position(at);
            }
            _ => {}
        }
        self
    }

    /// Wrap this error with additional context.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, with all context layers removed.
    pub fn root(&self) -> &CompileError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Failure reported by a [`RecordSink`](crate::RecordSink).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SinkError> for CompileError {
    fn from(err: SinkError) -> Self {
        CompileError::Sink {
            message: err.message,
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Display tests ====================

    #[test]
    fn test_unresolvable_display_with_context() {
        let err = CompileError::unresolvable("property 'Bakground'", Some("Setter.Property".into()))
            .with_position(Position::new(7, 3, 2));
        let msg = err.to_string();
        assert!(msg.contains("property 'Bakground'"));
        assert!(msg.contains("(Setter.Property)"));
        assert!(msg.contains("line 7, column 3"));
    }

    #[test]
    fn test_display_without_position() {
        let err = CompileError::protocol("missing owner");
        assert!(err.to_string().contains("unknown position"));
    }

    #[test]
    fn test_synthetic_position_renders_unknown() {
        let err = CompileError::unsupported("'TargetName' on Setter")
            .with_position(Position::synthetic(3));
        assert_eq!(err.position(), Some(Position::synthetic(3)));
        assert_eq!(
            err.to_string(),
            "'TargetName' on Setter is not supported at unknown position"
        );
    }

    #[test]
    fn test_scope_mismatch_display() {
        let err = CompileError::ScopeMismatch {
            expected: ScopeKind::Element,
            actual: ScopeKind::ListProperty,
        };
        let msg = err.to_string();
        assert!(msg.contains("element"));
        assert!(msg.contains("list property"));
    }

    // ==================== Position tests ====================

    #[test]
    fn test_with_position_keeps_existing() {
        let first = Position::new(1, 1, 0);
        let second = Position::new(9, 9, 0);
        let err = CompileError::unsupported("TargetName")
            .with_position(first)
            .with_position(second);
        assert_eq!(err.position(), Some(first));
    }

    #[test]
    fn test_with_position_through_context() {
        let err = CompileError::protocol("bad").context("while writing").with_position(Position::new(2, 5, 1));
        assert_eq!(err.position().map(|p| p.column), Some(5));
        assert!(matches!(err.root(), CompileError::Protocol { .. }));
    }

    #[test]
    fn test_positionless_variants_ignore_position() {
        let err = CompileError::Cancelled.with_position(Position::new(1, 1, 0));
        assert_eq!(err.position(), None);
    }

    // ==================== Category tests ====================

    #[test]
    fn test_categories() {
        assert_eq!(CompileError::NotStarted.category(), ErrorCategory::Protocol);
        assert_eq!(CompileError::misplaced("Triggers", "x").category(), ErrorCategory::Unresolvable);
        assert_eq!(CompileError::unsupported("x").category(), ErrorCategory::Unsupported);
        assert_eq!(CompileError::from(SinkError::new("disk")).category(), ErrorCategory::Sink);
        assert_eq!(CompileError::Cancelled.category(), ErrorCategory::Interrupted);
        assert_eq!(
            CompileError::ReadOnlyCollection { property: "Items".into() }.category(),
            ErrorCategory::Collection
        );
        assert_eq!(
            CompileError::Cancelled.context("outer").category(),
            ErrorCategory::Interrupted
        );
    }
}
