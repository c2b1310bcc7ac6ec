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

//! The interpreter stack.
//!
//! The dispatcher always routes to the innermost interpreter. Entering a
//! style or template block pushes a layer; the layer asks to be popped when
//! its block ends, which restores whichever interpreter was active before.
//! Nested blocks therefore install and restore like a call stack.

use crate::handler::{BaseGrammar, NodeHandler};

/// Stack of interpreters with the base grammar at the bottom.
pub struct InterpreterStack {
    base: BaseGrammar,
    layers: Vec<Box<dyn NodeHandler>>,
}

impl Default for InterpreterStack {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterStack {
    pub fn new() -> Self {
        Self {
            base: BaseGrammar,
            layers: Vec::new(),
        }
    }

    /// Install an interpreter above the current one.
    pub fn push(&mut self, layer: Box<dyn NodeHandler>) {
        self.layers.push(layer);
    }

    /// Remove the innermost interpreter. The base grammar is never removed.
    pub fn pop(&mut self) -> Option<Box<dyn NodeHandler>> {
        self.layers.pop()
    }

    /// Number of interpreters above the base grammar.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn top(&self) -> &dyn NodeHandler {
        match self.layers.last() {
            Some(layer) => layer.as_ref(),
            None => &self.base,
        }
    }

    pub fn top_mut(&mut self) -> &mut dyn NodeHandler {
        match self.layers.last_mut() {
            Some(layer) => layer.as_mut(),
            None => &mut self.base,
        }
    }
}

impl std::fmt::Debug for InterpreterStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = std::iter::once(self.base.label())
            .chain(self.layers.iter().map(|l| l.label()))
            .collect();
        f.debug_struct("InterpreterStack")
            .field("layers", &labels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl NodeHandler for Named {
        fn label(&self) -> &'static str {
            self.0
        }
    }

    // ==================== Stack tests ====================

    #[test]
    fn test_base_is_top_when_empty() {
        let stack = InterpreterStack::new();
        assert_eq!(stack.top().label(), "base");
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_push_pop_restores_previous() {
        let mut stack = InterpreterStack::new();
        stack.push(Box::new(Named("outer")));
        stack.push(Box::new(Named("inner")));
        assert_eq!(stack.top().label(), "inner");
        stack.pop();
        assert_eq!(stack.top().label(), "outer");
        stack.pop();
        assert!(stack.pop().is_none());
        assert_eq!(stack.top_mut().label(), "base");
    }
}
