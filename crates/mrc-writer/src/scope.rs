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

//! Writer scope stack.

use mrc_core::{CompileError, CompileResult, ScopeKind, TypeRef};

/// One open structural scope of the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    pub kind: ScopeKind,
    /// Element type, for element scopes.
    pub ty: Option<TypeRef>,
    /// Whether `EndAttributes` has been emitted for this element.
    pub end_attributes: bool,
    /// Whether child content has been written; attributes are closed after it.
    pub content: bool,
}

impl ScopeEntry {
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            ty: None,
            end_attributes: false,
            content: false,
        }
    }

    pub fn element(ty: TypeRef) -> Self {
        Self {
            kind: ScopeKind::Element,
            ty: Some(ty),
            end_attributes: false,
            content: false,
        }
    }
}

/// LIFO stack of open writer scopes.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    entries: Vec<ScopeEntry>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ScopeEntry) {
        self.entries.push(entry);
    }

    /// Pop the innermost scope if it has kind `kind`.
    ///
    /// On mismatch the stack is left untouched.
    pub fn pop_matching(&mut self, kind: ScopeKind) -> CompileResult<ScopeEntry> {
        match self.entries.last() {
            None => Err(CompileError::NotStarted),
            Some(top) if top.kind != kind => Err(CompileError::ScopeMismatch {
                expected: top.kind,
                actual: kind,
            }),
            Some(_) => self.entries.pop().ok_or(CompileError::NotStarted),
        }
    }

    pub fn top(&self) -> Option<&ScopeEntry> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ScopeEntry> {
        self.entries.last_mut()
    }

    pub fn top_kind(&self) -> Option<ScopeKind> {
        self.top().map(|entry| entry.kind)
    }

    /// Record that the innermost element received child content.
    pub fn mark_content(&mut self) {
        if let Some(entry) = self.top_mut() {
            if entry.kind == ScopeKind::Element {
                entry.content = true;
            }
        }
    }

    /// Number of open scopes, which is also the depth of the next child node.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> TypeRef {
        TypeRef::new("PresentationFramework", "System.Windows.Controls.Button")
    }

    // ==================== Scope stack tests ====================

    #[test]
    fn test_pop_matching() {
        let mut stack = ScopeStack::new();
        stack.push(ScopeEntry::new(ScopeKind::Document));
        stack.push(ScopeEntry::element(button()));
        assert_eq!(stack.depth(), 2);

        let entry = stack.pop_matching(ScopeKind::Element).unwrap();
        assert_eq!(entry.ty, Some(button()));
        assert_eq!(stack.top_kind(), Some(ScopeKind::Document));
    }

    #[test]
    fn test_mismatch_leaves_stack_unchanged() {
        let mut stack = ScopeStack::new();
        stack.push(ScopeEntry::new(ScopeKind::Document));
        stack.push(ScopeEntry::new(ScopeKind::ListProperty));

        let err = stack.pop_matching(ScopeKind::Element).unwrap_err();
        assert_eq!(
            err,
            CompileError::ScopeMismatch {
                expected: ScopeKind::ListProperty,
                actual: ScopeKind::Element,
            }
        );
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top_kind(), Some(ScopeKind::ListProperty));
    }

    #[test]
    fn test_mark_content_only_touches_elements() {
        let mut stack = ScopeStack::new();
        stack.push(ScopeEntry::new(ScopeKind::Document));
        stack.mark_content();
        assert!(!stack.top().unwrap().content);

        stack.push(ScopeEntry::element(button()));
        assert!(!stack.top().unwrap().content);
        stack.mark_content();
        assert!(stack.top().unwrap().content);
    }

    #[test]
    fn test_pop_empty_is_not_started() {
        let mut stack = ScopeStack::new();
        assert_eq!(
            stack.pop_matching(ScopeKind::Document).unwrap_err(),
            CompileError::NotStarted
        );
    }
}
