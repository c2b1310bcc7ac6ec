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

//! Builder for tokenizer-shaped node streams.
//!
//! Tests need node sequences that look like what a markup tokenizer produces:
//! one node per source line, depths following the nesting, attributes before
//! `EndAttributes`. [`NodeStreamBuilder`] tracks lines, depth and the open
//! elements so tests only spell out structure.

use mrc_core::node::{
    split_qualified, DefAttributeNode, ElementNode, ExtensionPropertyNode, Marker, PropertyNode,
    PropertyScopeNode, TextNode, TypePropertyNode, TypeValueNode, UnknownTagNode,
};
use mrc_core::{MarkupNode, Position, PropertyIdentity, TypeRef, TypeResolver, TypeTable};

/// Fluent builder for node streams.
///
/// # Examples
///
/// ```
/// use mrc_core::NodeKind;
/// use mrc_test::fixtures::builders::NodeStreamBuilder;
/// use mrc_test::presentation_types;
///
/// let types = presentation_types();
/// let nodes = NodeStreamBuilder::new(&types)
///     .document_start()
///     .element("Button")
///     .property("Width", "75")
///     .end_attributes()
///     .end_element()
///     .document_end()
///     .build();
///
/// assert_eq!(nodes.len(), 6);
/// assert_eq!(nodes[2].kind(), NodeKind::Property);
/// assert_eq!(nodes[2].depth(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct NodeStreamBuilder<'a> {
    types: &'a TypeTable,
    nodes: Vec<MarkupNode>,
    elements: Vec<TypeRef>,
    depth: usize,
    line: usize,
}

impl<'a> NodeStreamBuilder<'a> {
    pub fn new(types: &'a TypeTable) -> Self {
        Self {
            types,
            nodes: Vec::new(),
            elements: Vec::new(),
            depth: 0,
            line: 0,
        }
    }

    /// Resolve a type name, falling back to an unresolved identity.
    pub fn type_ref(&self, name: &str) -> TypeRef {
        self.types
            .resolve_type(name)
            .unwrap_or_else(|| TypeRef::new("", name))
    }

    /// Identity of `name` (qualified, or on the innermost open element).
    pub fn identity(&self, name: &str) -> PropertyIdentity {
        let (owner, member) = match split_qualified(name) {
            Some((owner, member)) => (self.type_ref(owner), member),
            None => (
                self.elements.last().cloned().unwrap_or_else(|| TypeRef::new("", "")),
                name,
            ),
        };
        let handle = self.types.resolve_member(&owner, member);
        let identity = PropertyIdentity::new(owner, member);
        match handle {
            Some(handle) => identity.with_member(handle),
            None => identity,
        }
    }

    fn position(&mut self) -> Position {
        self.line += 1;
        Position::new(self.line, self.depth * 2 + 1, self.depth)
    }

    fn open(mut self, make: impl FnOnce(Position) -> MarkupNode) -> Self {
        let pos = self.position();
        self.nodes.push(make(pos));
        self.depth += 1;
        self
    }

    fn close(mut self, make: impl FnOnce(Position) -> MarkupNode) -> Self {
        self.depth = self.depth.saturating_sub(1);
        let pos = self.position();
        self.nodes.push(make(pos));
        self
    }

    fn leaf(mut self, make: impl FnOnce(Position) -> MarkupNode) -> Self {
        let pos = self.position();
        self.nodes.push(make(pos));
        self
    }

    pub fn document_start(self) -> Self {
        self.open(|p| MarkupNode::DocumentStart(Marker::at(p)))
    }

    pub fn document_end(self) -> Self {
        self.close(|p| MarkupNode::DocumentEnd(Marker::at(p)))
    }

    pub fn element(mut self, name: &str) -> Self {
        let ty = self.type_ref(name);
        self.elements.push(ty.clone());
        self.open(|p| MarkupNode::ElementStart(ElementNode::new(p, ty)))
    }

    pub fn end_element(mut self) -> Self {
        self.elements.pop();
        self.close(|p| MarkupNode::ElementEnd(Marker::at(p)))
    }

    pub fn key_element(mut self, name: &str) -> Self {
        let ty = self.type_ref(name);
        self.elements.push(ty.clone());
        self.open(|p| MarkupNode::KeyElementStart(ElementNode::new(p, ty)))
    }

    pub fn end_key_element(mut self) -> Self {
        self.elements.pop();
        self.close(|p| MarkupNode::KeyElementEnd(Marker::at(p)))
    }

    pub fn end_attributes(self) -> Self {
        self.leaf(|p| MarkupNode::EndAttributes(Marker::at(p)))
    }

    pub fn property(self, name: &str, value: &str) -> Self {
        let attribute = self.identity(name);
        self.leaf(|p| MarkupNode::Property(PropertyNode::new(p, attribute, value)))
    }

    pub fn property_with_type(self, name: &str, type_name: &str) -> Self {
        let attribute = self.identity(name);
        let value_type = self.type_ref(type_name);
        self.leaf(|p| {
            MarkupNode::PropertyWithType(TypePropertyNode {
                position: p,
                attribute,
                value_type,
            })
        })
    }

    pub fn extension_property(self, name: &str, extension: &str, argument: &str) -> Self {
        let attribute = self.identity(name);
        let extension = self.type_ref(extension);
        let argument = argument.to_string();
        self.leaf(|p| {
            MarkupNode::PropertyWithExtension(ExtensionPropertyNode {
                position: p,
                attribute,
                extension,
                argument,
            })
        })
    }

    pub fn def_attribute(self, name: &str, value: &str) -> Self {
        let (name, value) = (name.to_string(), value.to_string());
        self.leaf(|p| {
            MarkupNode::DefAttribute(DefAttributeNode {
                position: p,
                name,
                value,
            })
        })
    }

    fn scope(&self, name: &str, p: Position) -> PropertyScopeNode {
        PropertyScopeNode {
            position: p,
            property: self.identity(name),
        }
    }

    pub fn complex(self, name: &str) -> Self {
        let scope = self.scope(name, Position::default());
        self.open(|p| MarkupNode::PropertyComplexStart(PropertyScopeNode { position: p, ..scope }))
    }

    pub fn end_complex(self) -> Self {
        self.close(|p| MarkupNode::PropertyComplexEnd(Marker::at(p)))
    }

    pub fn list(self, name: &str) -> Self {
        let scope = self.scope(name, Position::default());
        self.open(|p| MarkupNode::PropertyIListStart(PropertyScopeNode { position: p, ..scope }))
    }

    pub fn end_list(self) -> Self {
        self.close(|p| MarkupNode::PropertyIListEnd(Marker::at(p)))
    }

    pub fn array(self, name: &str) -> Self {
        let scope = self.scope(name, Position::default());
        self.open(|p| MarkupNode::PropertyArrayStart(PropertyScopeNode { position: p, ..scope }))
    }

    pub fn end_array(self) -> Self {
        self.close(|p| MarkupNode::PropertyArrayEnd(Marker::at(p)))
    }

    pub fn dictionary(self, name: &str) -> Self {
        let scope = self.scope(name, Position::default());
        self.open(|p| {
            MarkupNode::PropertyIDictionaryStart(PropertyScopeNode { position: p, ..scope })
        })
    }

    pub fn end_dictionary(self) -> Self {
        self.close(|p| MarkupNode::PropertyIDictionaryEnd(Marker::at(p)))
    }

    pub fn constructor(self) -> Self {
        self.open(|p| MarkupNode::ConstructorParametersStart(Marker::at(p)))
    }

    pub fn end_constructor(self) -> Self {
        self.close(|p| MarkupNode::ConstructorParametersEnd(Marker::at(p)))
    }

    pub fn constructor_type(self, name: &str) -> Self {
        let ty = self.type_ref(name);
        self.leaf(|p| MarkupNode::ConstructorParameterType(TypeValueNode { position: p, ty }))
    }

    pub fn text(self, text: &str) -> Self {
        self.leaf(|p| MarkupNode::Text(TextNode::new(p, text)))
    }

    pub fn unknown_tag(self, name: &str) -> Self {
        let name = name.to_string();
        self.open(|p| {
            MarkupNode::UnknownTagStart(UnknownTagNode {
                position: p,
                xml_namespace: String::new(),
                name,
            })
        })
    }

    pub fn end_unknown_tag(self) -> Self {
        self.close(|p| MarkupNode::UnknownTagEnd(Marker::at(p)))
    }

    /// Append an arbitrary node as-is.
    pub fn node(mut self, node: MarkupNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn build(self) -> Vec<MarkupNode> {
        self.nodes
    }
}
