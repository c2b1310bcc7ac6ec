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

//! Mode stack of the style layer.
//!
//! One [`ModeEntry`] is pushed for every scoped start node the layer sees and
//! popped at the matching end, so the stack's length always equals the
//! nesting depth below (and including) the block's root element.

use mrc_core::node::PropertyScopeNode;
use mrc_core::{CompileError, CompileResult, PropertyIdentity, TypeRef};
use std::fmt;

/// Interpretation mode of a nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleMode {
    /// Ordinary markup.
    Base,
    /// Inside the block's `Setters` collection.
    Setters,
    /// Inside the block's `Triggers` collection.
    TriggerBase,
    /// Inside an event trigger's actions.
    TriggerActions,
    /// Inside a key element.
    Key,
    /// Inside the block's `Resources`.
    Resources,
    /// Inside the complex `TargetType` property.
    TargetTypeProperty,
    /// Inside the complex `BasedOn` property.
    BasedOnProperty,
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a nesting level is, structurally, within the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Plain,
    /// The block's root element.
    Root,
    /// An item of `Setters`.
    SetterItem,
    /// An item of `Triggers`.
    TriggerRoot { event: bool },
    /// A direct child of a trigger, or an item of one of its sub-properties.
    TriggerChild,
    /// A complex property of a trigger (`Trigger.Setters`, `MultiTrigger.Conditions`).
    TriggerSubProperty,
    /// A `Value` property element of a setter.
    ///
    /// `held` is the withheld scope start; `synthesized` is set once text
    /// content was turned into a `Value` property.
    SetterValue {
        held: Option<PropertyScopeNode>,
        synthesized: bool,
    },
}

impl Role {
    /// Elements whose `Property`/`Value` attributes are reinterpreted.
    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            Role::SetterItem | Role::TriggerRoot { .. } | Role::TriggerChild
        )
    }
}

/// One level of the mode stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeEntry {
    pub mode: StyleMode,
    /// Base-grammar depth of the start node that pushed this entry.
    pub depth: usize,
    pub role: Role,
    /// Element type, for element levels.
    pub element_type: Option<TypeRef>,
    /// Property selected by a `Property=` attribute on this element.
    pub owner: Option<PropertyIdentity>,
}

impl ModeEntry {
    pub fn new(mode: StyleMode, depth: usize, role: Role) -> Self {
        Self {
            mode,
            depth,
            role,
            element_type: None,
            owner: None,
        }
    }

    pub fn with_element(mut self, ty: TypeRef) -> Self {
        self.element_type = Some(ty);
        self
    }

    /// Local name of the element type, empty for property levels.
    pub fn element_name(&self) -> &str {
        self.element_type.as_ref().map(TypeRef::local_name).unwrap_or("")
    }
}

/// LIFO stack of [`ModeEntry`] values.
#[derive(Debug, Clone, Default)]
pub struct ModeStack {
    entries: Vec<ModeEntry>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ModeEntry) {
        self.entries.push(entry);
    }

    /// Pop the entry closed by an end node at `depth`.
    pub fn pop(&mut self, depth: usize) -> CompileResult<ModeEntry> {
        match self.entries.last() {
            Some(top) if top.depth == depth => {}
            Some(top) => {
                return Err(CompileError::protocol(format!(
                    "end node at depth {} does not close the {} level opened at depth {}",
                    depth, top.mode, top.depth
                )))
            }
            None => return Err(CompileError::protocol("end node with no open level")),
        }
        self.entries
            .pop()
            .ok_or_else(|| CompileError::protocol("end node with no open level"))
    }

    pub fn top(&self) -> Option<&ModeEntry> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ModeEntry> {
        self.entries.last_mut()
    }

    /// Entry `n` levels below the top (`0` is the top).
    pub fn below(&self, n: usize) -> Option<&ModeEntry> {
        self.entries.iter().rev().nth(n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[ModeEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ModeStack tests ====================

    #[test]
    fn test_pop_checks_depth() {
        let mut stack = ModeStack::new();
        stack.push(ModeEntry::new(StyleMode::Base, 1, Role::Root));
        stack.push(ModeEntry::new(StyleMode::Setters, 2, Role::Plain));
        assert!(stack.pop(3).is_err());
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(2).unwrap().mode, StyleMode::Setters);
        assert_eq!(stack.top().map(|e| e.role.clone()), Some(Role::Root));
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut stack = ModeStack::new();
        assert!(stack.pop(0).is_err());
    }

    #[test]
    fn test_below() {
        let mut stack = ModeStack::new();
        stack.push(ModeEntry::new(StyleMode::Base, 1, Role::Root));
        stack.push(ModeEntry::new(StyleMode::Base, 3, Role::SetterItem));
        assert_eq!(stack.below(0).map(|e| e.depth), Some(3));
        assert_eq!(stack.below(1).map(|e| e.depth), Some(1));
        assert!(stack.below(2).is_none());
    }

    // ==================== Role tests ====================

    #[test]
    fn test_overlay_roles() {
        assert!(Role::SetterItem.is_overlay());
        assert!(Role::TriggerRoot { event: true }.is_overlay());
        assert!(Role::TriggerChild.is_overlay());
        assert!(!Role::Root.is_overlay());
        assert!(!Role::TriggerSubProperty.is_overlay());
    }
}
