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

//! Optional compiler hooks.
//!
//! A [`NodeInspector`] sees every node before it is dispatched and may skip
//! it (or its whole subtree). An [`ErrorReporter`] is told about every fatal
//! error before the error is returned to the caller.

use mrc_core::{CompileError, MarkupNode};
use tracing::error;

/// Answer of a [`NodeInspector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inspection {
    /// Dispatch the node normally.
    #[default]
    Normal,
    /// Drop the node; for a scope start, drop everything through its end.
    Skip,
}

/// Mid-stream inspector consulted before each dispatch.
pub trait NodeInspector {
    fn inspect(&mut self, node: &MarkupNode) -> Inspection;
}

impl<F> NodeInspector for F
where
    F: FnMut(&MarkupNode) -> Inspection,
{
    fn inspect(&mut self, node: &MarkupNode) -> Inspection {
        self(node)
    }
}

/// Receives fatal errors before they propagate.
pub trait ErrorReporter {
    fn report(&mut self, error: &CompileError);
}

impl<F> ErrorReporter for F
where
    F: FnMut(&CompileError),
{
    fn report(&mut self, error: &CompileError) {
        self(error)
    }
}

/// Default reporter: logs the error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&mut self, err: &CompileError) {
        match err.position() {
            Some(pos) => error!(line = pos.line, column = pos.column, category = ?err.category(), "{}", err),
            None => error!(category = ?err.category(), "{}", err),
        }
    }
}
