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

//! Style and template reinterpretation.
//!
//! Inside `<Style>` and template blocks a few attributes change meaning. A
//! setter's `Value` is converted with the converter of the property named by
//! its sibling `Property` attribute, not with `Setter.Value`'s own. The
//! [`StyleLayer`] is an interpreter installed on top of the base grammar for
//! the duration of one block. It intercepts only the node kinds it needs and
//! forwards everything else unchanged.
//!
//! # Modes
//!
//! The layer keeps a [`ModeStack`] with one entry per open scope of the
//! block:
//!
//! ```text
//! <Style TargetType="Button">             Base (root)
//!   <Style.Setters>                        Setters
//!     <Setter Property="Background"        Base (setter item)
//!             Value="Red"/>
//!   </Style.Setters>
//!   <Style.Triggers>                       TriggerBase
//!     <Trigger Property="IsMouseOver"      Base (trigger root)
//!              Value="True">
//!       <Setter Property="Foreground"      Base (trigger child)
//!               Value="White"/>
//!     </Trigger>
//!     <EventTrigger RoutedEvent="Click">   Base (event trigger root)
//!       <BeginStoryboard/>                 TriggerActions
//!     </EventTrigger>
//!   </Style.Triggers>
//! </Style>
//! ```
//!
//! # Deferred Values
//!
//! `Value=` on a setter, trigger or condition is held back until the end of
//! the element's attributes, by which point `Property=` has been seen no
//! matter which came first in the source. The held value is then emitted with
//! the owning property as its value-side identity.

mod modes;
mod vocabulary;

pub use modes::{ModeEntry, ModeStack, Role, StyleMode};
pub use vocabulary::{BlockKind, StyleVocabulary};

use crate::emitter::Emitter;
use crate::handler::{route, NodeHandler};
use mrc_core::extension::parse_type_extension;
use mrc_core::node::{
    ElementNode, Marker, PropertyNode, PropertyScopeNode, TextNode, TypePropertyNode,
    TypeValueNode, UnknownTagNode,
};
use mrc_core::{
    AttributeUsage, CompileError, CompileResult, MarkupNode, NodeKind, PropertyIdentity, TypeRef,
};
use std::sync::Arc;
use tracing::trace;

const PROPERTY: &str = "Property";
const VALUE: &str = "Value";
const TARGET_TYPE: &str = "TargetType";
const TYPE_NAME: &str = "TypeName";
const TRIGGER_ACTIONS: [&str; 3] = ["Actions", "EnterActions", "ExitActions"];
const UNSUPPORTED_ATTRIBUTES: [&str; 2] = ["TargetName", "SourceName"];

/// Interpreter for one style or template block.
#[derive(Debug)]
pub struct StyleLayer {
    kind: BlockKind,
    block: TypeRef,
    vocabulary: Arc<StyleVocabulary>,
    modes: ModeStack,
    target_type: Option<TypeRef>,
    deferred: Option<PropertyNode>,
}

impl StyleLayer {
    /// Create a layer for a block whose root element has type `block`.
    pub fn new(kind: BlockKind, block: TypeRef, vocabulary: Arc<StyleVocabulary>) -> Self {
        Self {
            kind,
            block,
            vocabulary,
            modes: ModeStack::new(),
            target_type: None,
            deferred: None,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Target type captured from the block's `TargetType`.
    pub fn target_type(&self) -> Option<&TypeRef> {
        self.target_type.as_ref()
    }

    pub fn modes(&self) -> &ModeStack {
        &self.modes
    }

    fn push(&mut self, entry: ModeEntry) {
        trace!(mode = %entry.mode, depth = entry.depth, role = ?entry.role, "push mode");
        self.modes.push(entry);
    }

    fn pop(&mut self, depth: usize) -> CompileResult<ModeEntry> {
        let entry = self.modes.pop(depth)?;
        trace!(mode = %entry.mode, depth, "pop mode");
        Ok(entry)
    }

    /// Mode and role for an element starting below the current top.
    fn element_entry(&self, depth: usize, ty: &TypeRef) -> ModeEntry {
        let local = ty.local_name();
        let (mode, role) = match self.modes.top() {
            None => (StyleMode::Base, Role::Root),
            Some(top) => match (&top.mode, &top.role) {
                (StyleMode::Setters, _) => (StyleMode::Base, Role::SetterItem),
                (StyleMode::TriggerBase, _) => (
                    StyleMode::Base,
                    Role::TriggerRoot {
                        event: self.vocabulary.is_event_trigger(local),
                    },
                ),
                (_, Role::TriggerRoot { event: true }) => (StyleMode::TriggerActions, Role::Plain),
                (_, Role::TriggerRoot { event: false }) | (_, Role::TriggerSubProperty) => {
                    (StyleMode::Base, Role::TriggerChild)
                }
                (
                    mode @ (StyleMode::TriggerActions
                    | StyleMode::Key
                    | StyleMode::TargetTypeProperty
                    | StyleMode::BasedOnProperty),
                    _,
                ) => (*mode, Role::Plain),
                _ => (StyleMode::Base, Role::Plain),
            },
        };
        ModeEntry::new(mode, depth, role).with_element(ty.clone())
    }

    /// Mode and role for a property scope starting below the current top.
    fn scope_entry(&self, kind: NodeKind, scope: &PropertyScopeNode) -> CompileResult<ModeEntry> {
        let depth = scope.position.depth;
        let name = scope.property.name.as_str();
        let Some(top) = self.modes.top() else {
            return Err(CompileError::protocol(
                "property scope outside of the block's root element",
            ));
        };

        let (mode, role) = match &top.role {
            Role::Root => {
                let mode = match (kind, name) {
                    (_, "Setters") if self.kind == BlockKind::Style => StyleMode::Setters,
                    (_, "Triggers") => StyleMode::TriggerBase,
                    (NodeKind::PropertyIDictionaryStart | NodeKind::PropertyComplexStart, "Resources") => {
                        StyleMode::Resources
                    }
                    (NodeKind::PropertyComplexStart, TARGET_TYPE) => StyleMode::TargetTypeProperty,
                    (NodeKind::PropertyComplexStart, "BasedOn") => StyleMode::BasedOnProperty,
                    _ => StyleMode::Base,
                };
                (mode, Role::Plain)
            }
            _ if self.is_block_collection(&scope.property) => {
                return Err(CompileError::misplaced(
                    scope.property.qualified_name(),
                    format!(
                        "it must be a direct property of the {} element",
                        self.block.local_name()
                    ),
                ))
            }
            role if role.is_overlay()
                && kind == NodeKind::PropertyComplexStart
                && name == VALUE =>
            {
                (
                    top.mode,
                    Role::SetterValue {
                        held: Some(scope.clone()),
                        synthesized: false,
                    },
                )
            }
            Role::TriggerRoot { .. } if TRIGGER_ACTIONS.contains(&name) => {
                (StyleMode::TriggerActions, Role::Plain)
            }
            Role::TriggerRoot { .. } => (StyleMode::Base, Role::TriggerSubProperty),
            _ => match top.mode {
                mode @ (StyleMode::TriggerActions
                | StyleMode::Key
                | StyleMode::TargetTypeProperty
                | StyleMode::BasedOnProperty) => (mode, Role::Plain),
                _ => (StyleMode::Base, Role::Plain),
            },
        };
        Ok(ModeEntry::new(mode, depth, role))
    }

    /// `Triggers`/`Setters` of the block type itself.
    fn is_block_collection(&self, prop: &PropertyIdentity) -> bool {
        prop.owner.local_name() == self.block.local_name()
            && (prop.name == "Triggers" || prop.name == "Setters")
    }

    fn open_scope(
        &mut self,
        kind: NodeKind,
        node: PropertyScopeNode,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        let entry = self.scope_entry(kind, &node)?;
        let held = matches!(entry.role, Role::SetterValue { .. });
        self.push(entry);
        if held {
            trace!(property = %node.property, "holding setter value scope");
            return Ok(());
        }
        out.emit(scope_start(kind, node))
    }

    fn close_scope(&mut self, node: Marker, kind: NodeKind, out: &mut Emitter<'_>) -> CompileResult<()> {
        let entry = self.pop(node.position.depth)?;
        if let Role::SetterValue { synthesized: true, .. } = entry.role {
            trace!("dropping end of synthesized setter value");
            return Ok(());
        }
        out.emit(scope_end(kind, node))
    }

    /// Emit the deferred `Value`, bound to the owner of the current element.
    fn flush_deferred(&mut self, out: &mut Emitter<'_>) -> CompileResult<()> {
        let Some(mut value) = self.deferred.take() else {
            return Ok(());
        };
        match self.modes.top().and_then(|top| top.owner.clone()) {
            Some(owner) => {
                trace!(owner = %owner, "flushing deferred value");
                value.value_side = Some(owner);
            }
            None => trace!("flushing deferred value without owner"),
        }
        out.emit(MarkupNode::Property(value))
    }

    /// Forward a withheld `Setter.Value` start once element content shows up.
    fn release_held(&mut self, out: &mut Emitter<'_>) -> CompileResult<()> {
        let held = match self.modes.top_mut() {
            Some(ModeEntry {
                role: Role::SetterValue { held, .. },
                ..
            }) => held.take(),
            _ => None,
        };
        match held {
            Some(scope) => out.emit(MarkupNode::PropertyComplexStart(scope)),
            None => Ok(()),
        }
    }

    /// Attribute on an element whose `Property`/`Value` are reinterpreted.
    fn overlay_attribute(&mut self, node: PropertyNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        let element = self
            .modes
            .top()
            .map(|top| top.element_name().to_string())
            .unwrap_or_default();
        let name = node.attribute.name.as_str();

        if UNSUPPORTED_ATTRIBUTES.contains(&name) {
            return Err(CompileError::unsupported(format!(
                "'{}' on {}",
                name, element
            )));
        }

        match name {
            PROPERTY => {
                let owner = out
                    .resolve_property(node.value.trim(), self.target_type.as_ref())
                    .ok_or_else(|| {
                        CompileError::unresolvable(
                            format!("property '{}'", node.value.trim()),
                            Some(format!("{}.{}", element, PROPERTY)),
                        )
                    })?;
                trace!(owner = %owner, "captured pending owner");
                if let Some(top) = self.modes.top_mut() {
                    top.owner = Some(owner);
                }
                out.emit(MarkupNode::Property(node))
            }
            VALUE => {
                if self.deferred.is_some() {
                    return Err(CompileError::protocol(format!(
                        "duplicate '{}' attribute on {}",
                        VALUE, element
                    )));
                }
                trace!("deferring value");
                self.deferred = Some(node);
                Ok(())
            }
            _ => out.emit(MarkupNode::Property(node)),
        }
    }

    fn capture_target_type(&mut self, name: &str, out: &Emitter<'_>) -> CompileResult<()> {
        let type_name = parse_type_extension(name).ok_or_else(|| {
            CompileError::unresolvable(format!("type reference '{}'", name), Some(TARGET_TYPE.into()))
        })?;
        let ty = out.resolve_type(type_name).ok_or_else(|| {
            CompileError::unresolvable(format!("type '{}'", type_name), Some(TARGET_TYPE.into()))
        })?;
        trace!(target_type = %ty, "captured target type");
        self.target_type = Some(ty);
        Ok(())
    }

    fn in_target_type_property(&self) -> bool {
        matches!(self.modes.top(), Some(top) if top.mode == StyleMode::TargetTypeProperty)
    }

    /// Whether non-whitespace text is acceptable at the current level.
    fn accepts_text(&self) -> bool {
        match self.modes.top() {
            None => false,
            Some(top) => {
                !matches!(top.role, Role::Root | Role::TriggerRoot { .. })
                    && !matches!(top.mode, StyleMode::Setters | StyleMode::TriggerBase)
            }
        }
    }
}

fn scope_start(kind: NodeKind, node: PropertyScopeNode) -> MarkupNode {
    match kind {
        NodeKind::PropertyArrayStart => MarkupNode::PropertyArrayStart(node),
        NodeKind::PropertyIListStart => MarkupNode::PropertyIListStart(node),
        NodeKind::PropertyIDictionaryStart => MarkupNode::PropertyIDictionaryStart(node),
        _ => MarkupNode::PropertyComplexStart(node),
    }
}

fn scope_end(kind: NodeKind, node: Marker) -> MarkupNode {
    match kind {
        NodeKind::PropertyArrayEnd => MarkupNode::PropertyArrayEnd(node),
        NodeKind::PropertyIListEnd => MarkupNode::PropertyIListEnd(node),
        NodeKind::PropertyIDictionaryEnd => MarkupNode::PropertyIDictionaryEnd(node),
        NodeKind::ConstructorParametersEnd => MarkupNode::ConstructorParametersEnd(node),
        NodeKind::KeyElementEnd => MarkupNode::KeyElementEnd(node),
        _ => MarkupNode::PropertyComplexEnd(node),
    }
}

impl NodeHandler for StyleLayer {
    fn label(&self) -> &'static str {
        match self.kind {
            BlockKind::Style => "style",
            BlockKind::Template => "template",
        }
    }

    fn handle(&mut self, node: MarkupNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        let kind = node.kind();
        if !kind.is_attribute() {
            self.flush_deferred(out)?;
        }
        if kind.is_flush_point() && kind != NodeKind::Text {
            self.release_held(out)?;
        }
        route(self, node, out)
    }

    fn yield_to_block(&mut self, out: &mut Emitter<'_>) -> CompileResult<()> {
        self.flush_deferred(out)?;
        self.release_held(out)
    }

    fn mode_stack(&self) -> &[ModeEntry] {
        self.modes.as_slice()
    }

    fn element_start(&mut self, node: ElementNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        let entry = self.element_entry(node.position.depth, &node.ty);
        self.push(entry);
        out.emit(MarkupNode::ElementStart(node))
    }

    fn element_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        self.pop(node.position.depth)?;
        out.emit(MarkupNode::ElementEnd(node))?;
        if self.modes.is_empty() {
            out.request_detach();
        }
        Ok(())
    }

    fn key_element_start(&mut self, node: ElementNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        let entry = ModeEntry::new(StyleMode::Key, node.position.depth, Role::Plain)
            .with_element(node.ty.clone());
        self.push(entry);
        out.emit(MarkupNode::KeyElementStart(node))
    }

    fn key_element_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        self.close_scope(node, NodeKind::KeyElementEnd, out)
    }

    fn complex_property_start(
        &mut self,
        node: PropertyScopeNode,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        self.open_scope(NodeKind::PropertyComplexStart, node, out)
    }

    fn complex_property_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        self.close_scope(node, NodeKind::PropertyComplexEnd, out)
    }

    fn array_property_start(
        &mut self,
        node: PropertyScopeNode,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        self.open_scope(NodeKind::PropertyArrayStart, node, out)
    }

    fn array_property_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        self.close_scope(node, NodeKind::PropertyArrayEnd, out)
    }

    fn list_property_start(
        &mut self,
        node: PropertyScopeNode,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        self.open_scope(NodeKind::PropertyIListStart, node, out)
    }

    fn list_property_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        self.close_scope(node, NodeKind::PropertyIListEnd, out)
    }

    fn dictionary_property_start(
        &mut self,
        node: PropertyScopeNode,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        self.open_scope(NodeKind::PropertyIDictionaryStart, node, out)
    }

    fn dictionary_property_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        self.close_scope(node, NodeKind::PropertyIDictionaryEnd, out)
    }

    fn constructor_parameters_start(
        &mut self,
        node: Marker,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        let mode = self.modes.top().map(|top| top.mode).unwrap_or(StyleMode::Base);
        self.push(ModeEntry::new(mode, node.position.depth, Role::Plain));
        out.emit(MarkupNode::ConstructorParametersStart(node))
    }

    fn constructor_parameters_end(
        &mut self,
        node: Marker,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        self.close_scope(node, NodeKind::ConstructorParametersEnd, out)
    }

    fn constructor_parameter_type(
        &mut self,
        node: TypeValueNode,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        if self.in_target_type_property() {
            trace!(target_type = %node.ty, "captured target type");
            self.target_type = Some(node.ty.clone());
        }
        out.emit(MarkupNode::ConstructorParameterType(node))
    }

    fn property(&mut self, node: PropertyNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        let Some(top) = self.modes.top() else {
            return out.emit(MarkupNode::Property(node));
        };
        let element = top.element_name();
        let on_element = node.attribute.owner.local_name() == element
            || self.vocabulary.is_overlay_element(node.attribute.owner.local_name());

        if top.role == Role::Root && node.attribute.name == TARGET_TYPE && on_element {
            self.capture_target_type(&node.value, out)?;
            return out.emit(MarkupNode::Property(node));
        }
        if top.mode == StyleMode::TargetTypeProperty && node.attribute.name == TYPE_NAME {
            self.capture_target_type(&node.value, out)?;
            return out.emit(MarkupNode::Property(node));
        }
        if top.role.is_overlay() && on_element {
            return self.overlay_attribute(node, out);
        }
        out.emit(MarkupNode::Property(node))
    }

    fn property_with_type(
        &mut self,
        node: TypePropertyNode,
        out: &mut Emitter<'_>,
    ) -> CompileResult<()> {
        let at_root = matches!(self.modes.top(), Some(top) if top.role == Role::Root);
        if (at_root && node.attribute.name == TARGET_TYPE)
            || (self.in_target_type_property() && node.attribute.name == TYPE_NAME)
        {
            trace!(target_type = %node.value_type, "captured target type");
            self.target_type = Some(node.value_type.clone());
        }
        out.emit(MarkupNode::PropertyWithType(node))
    }

    fn text(&mut self, node: TextNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        let held = match self.modes.top() {
            Some(ModeEntry {
                role:
                    Role::SetterValue {
                        held: Some(scope), ..
                    },
                ..
            }) => Some(scope.clone()),
            _ => None,
        };

        if let Some(scope) = held {
            if node.is_whitespace() {
                return Ok(());
            }
            let owner = self.modes.below(1).and_then(|setter| setter.owner.clone());
            if let Some(Role::SetterValue { held, synthesized }) =
                self.modes.top_mut().map(|top| &mut top.role)
            {
                *held = None;
                *synthesized = true;
            }
            trace!("synthesizing setter value from text");
            let value = PropertyNode {
                position: node.position.with_depth(scope.position.depth),
                attribute: scope.property,
                value: node.text.trim().to_string(),
                usage: AttributeUsage::Default,
                value_side: owner,
            };
            return out.emit(MarkupNode::Property(value));
        }

        if node.is_whitespace() {
            return out.emit(MarkupNode::Text(node));
        }
        if matches!(
            self.modes.top(),
            Some(ModeEntry {
                role: Role::SetterValue { synthesized: true, .. },
                ..
            })
        ) {
            return Err(CompileError::misplaced(
                "text",
                "a setter value was already given",
            ));
        }
        if self.in_target_type_property() {
            self.capture_target_type(node.text.trim(), out)?;
            return out.emit(MarkupNode::Text(node));
        }
        if !self.accepts_text() {
            let location = self
                .modes
                .top()
                .map(|top| match top.element_type.as_ref() {
                    Some(ty) => ty.local_name().to_string(),
                    None => top.mode.to_string(),
                })
                .unwrap_or_default();
            return Err(CompileError::misplaced(
                "text",
                format!("only whitespace may appear directly in {}", location),
            ));
        }
        out.emit(MarkupNode::Text(node))
    }

    fn unknown_tag_start(&mut self, node: UnknownTagNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        let at_root = matches!(self.modes.top(), Some(top) if top.role == Role::Root);
        if !at_root {
            if let Some((owner, member)) = mrc_core::node::split_qualified(&node.name) {
                if owner == self.block.local_name() && (member == "Triggers" || member == "Setters") {
                    return Err(CompileError::misplaced(
                        node.name.clone(),
                        format!(
                            "it must be a direct property of the {} element",
                            self.block.local_name()
                        ),
                    ));
                }
            }
        }
        out.emit(MarkupNode::UnknownTagStart(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> StyleLayer {
        StyleLayer::new(
            BlockKind::Style,
            TypeRef::new("PresentationFramework", "System.Windows.Style"),
            Arc::new(StyleVocabulary::default()),
        )
    }

    fn ty(name: &str) -> TypeRef {
        TypeRef::new("PresentationFramework", name)
    }

    // ==================== Element entry tests ====================

    #[test]
    fn test_first_element_is_root() {
        let layer = layer();
        let entry = layer.element_entry(1, &ty("System.Windows.Style"));
        assert_eq!(entry.role, Role::Root);
        assert_eq!(entry.mode, StyleMode::Base);
    }

    #[test]
    fn test_event_trigger_content_is_actions() {
        let mut layer = layer();
        layer.modes.push(ModeEntry::new(StyleMode::Base, 1, Role::Root));
        layer.modes.push(ModeEntry::new(StyleMode::TriggerBase, 2, Role::Plain));
        let trigger = layer.element_entry(3, &ty("System.Windows.EventTrigger"));
        assert_eq!(trigger.role, Role::TriggerRoot { event: true });
        layer.modes.push(trigger);
        let action = layer.element_entry(4, &ty("System.Windows.Media.Animation.BeginStoryboard"));
        assert_eq!(action.mode, StyleMode::TriggerActions);
    }

    #[test]
    fn test_property_trigger_content_is_trigger_child() {
        let mut layer = layer();
        layer.modes.push(ModeEntry::new(StyleMode::Base, 1, Role::Root));
        layer.modes.push(ModeEntry::new(StyleMode::TriggerBase, 2, Role::Plain));
        layer.modes.push(ModeEntry::new(StyleMode::Base, 3, Role::TriggerRoot { event: false }));
        let setter = layer.element_entry(4, &ty("System.Windows.Setter"));
        assert_eq!(setter.role, Role::TriggerChild);
    }

    // ==================== Text placement tests ====================

    #[test]
    fn test_text_not_accepted_at_root_or_collections() {
        let mut layer = layer();
        layer.modes.push(ModeEntry::new(StyleMode::Base, 1, Role::Root));
        assert!(!layer.accepts_text());
        layer.modes.push(ModeEntry::new(StyleMode::Setters, 2, Role::Plain));
        assert!(!layer.accepts_text());
        layer.modes.push(ModeEntry::new(StyleMode::Base, 3, Role::SetterItem));
        assert!(layer.accepts_text());
    }

    #[test]
    fn test_block_collection_detection() {
        let layer = layer();
        let triggers = PropertyIdentity::new(ty("System.Windows.Style"), "Triggers");
        let other = PropertyIdentity::new(ty("System.Windows.Controls.Button"), "Triggers");
        assert!(layer.is_block_collection(&triggers));
        assert!(!layer.is_block_collection(&other));
    }
}
