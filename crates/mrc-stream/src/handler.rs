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

//! Per-kind node handling.
//!
//! [`NodeHandler`] has one method per [`NodeKind`](mrc_core::NodeKind). Every
//! method defaults to the base grammar: forward the node unchanged through the
//! [`Emitter`]. An interpreter overrides only the kinds it gives a different
//! meaning to and inherits the rest.
//!
//! # Example
//!
//! ```rust
//! use mrc_core::node::TextNode;
//! use mrc_core::CompileResult;
//! use mrc_stream::{Emitter, NodeHandler};
//!
//! /// Drops whitespace-only text and forwards everything else.
//! struct TrimWhitespace;
//!
//! impl NodeHandler for TrimWhitespace {
//!     fn text(&mut self, node: TextNode, out: &mut Emitter<'_>) -> CompileResult<()> {
//!         if node.is_whitespace() {
//!             return Ok(());
//!         }
//!         out.emit(mrc_core::MarkupNode::Text(node))
//!     }
//! }
//! ```

use crate::emitter::Emitter;
use crate::style::ModeEntry;
use mrc_core::node::{
    ContentPropertyNode, DefAttributeNode, DefKeyTypeNode, ElementNode, EventNode,
    ExtensionPropertyNode, LiteralNode, MappingNode, Marker, PropertyNode, PropertyScopeNode,
    TextNode, TypePropertyNode, TypeValueNode, UnknownAttributeNode, UnknownTagNode, XmlnsNode,
};
use mrc_core::{CompileResult, MarkupNode};

/// Interpreter of the node stream.
pub trait NodeHandler {
    /// Short name used in logs.
    fn label(&self) -> &'static str {
        "custom"
    }

    /// Handle one node. The default routes to the per-kind method.
    fn handle(&mut self, node: MarkupNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        route(self, node, out)
    }

    /// Called before a nested block interpreter takes over the stream.
    ///
    /// The nested block is the next node's subtree; anything this handler
    /// still holds back must be released now.
    fn yield_to_block(&mut self, _out: &mut Emitter<'_>) -> CompileResult<()> {
        Ok(())
    }

    /// Modes this handler is tracking, innermost last.
    fn mode_stack(&self) -> &[ModeEntry] {
        &[]
    }

    fn document_start(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::DocumentStart(node))
    }

    fn document_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::DocumentEnd(node))
    }

    fn element_start(&mut self, node: ElementNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::ElementStart(node))
    }

    fn element_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::ElementEnd(node))
    }

    fn key_element_start(&mut self, node: ElementNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::KeyElementStart(node))
    }

    fn key_element_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::KeyElementEnd(node))
    }

    fn end_attributes(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::EndAttributes(node))
    }

    fn property(&mut self, node: PropertyNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::Property(node))
    }

    fn property_with_extension(&mut self, node: ExtensionPropertyNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyWithExtension(node))
    }

    fn property_with_type(&mut self, node: TypePropertyNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyWithType(node))
    }

    fn complex_property_start(&mut self, node: PropertyScopeNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyComplexStart(node))
    }

    fn complex_property_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyComplexEnd(node))
    }

    fn array_property_start(&mut self, node: PropertyScopeNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyArrayStart(node))
    }

    fn array_property_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyArrayEnd(node))
    }

    fn list_property_start(&mut self, node: PropertyScopeNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyIListStart(node))
    }

    fn list_property_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyIListEnd(node))
    }

    fn dictionary_property_start(&mut self, node: PropertyScopeNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyIDictionaryStart(node))
    }

    fn dictionary_property_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PropertyIDictionaryEnd(node))
    }

    fn content_property(&mut self, node: ContentPropertyNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::ContentProperty(node))
    }

    fn text(&mut self, node: TextNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::Text(node))
    }

    fn literal_content(&mut self, node: LiteralNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::LiteralContent(node))
    }

    fn routed_event(&mut self, node: EventNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::RoutedEvent(node))
    }

    fn clr_event(&mut self, node: EventNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::ClrEvent(node))
    }

    fn xmlns_property(&mut self, node: XmlnsNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::XmlnsProperty(node))
    }

    fn pi_mapping(&mut self, node: MappingNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PiMapping(node))
    }

    fn def_attribute(&mut self, node: DefAttributeNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::DefAttribute(node))
    }

    fn def_key_type_attribute(&mut self, node: DefKeyTypeNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::DefKeyTypeAttribute(node))
    }

    fn presentation_options_attribute(&mut self, node: DefAttributeNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::PresentationOptionsAttribute(node))
    }

    fn constructor_parameters_start(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::ConstructorParametersStart(node))
    }

    fn constructor_parameters_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::ConstructorParametersEnd(node))
    }

    fn constructor_parameter_type(&mut self, node: TypeValueNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::ConstructorParameterType(node))
    }

    fn unknown_tag_start(&mut self, node: UnknownTagNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::UnknownTagStart(node))
    }

    fn unknown_tag_end(&mut self, node: Marker, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::UnknownTagEnd(node))
    }

    fn unknown_attribute(&mut self, node: UnknownAttributeNode, out: &mut Emitter<'_>) -> CompileResult<()> {
        out.emit(MarkupNode::UnknownAttribute(node))
    }
}

/// Dispatch `node` to the matching method of `handler`.
pub fn route<H>(handler: &mut H, node: MarkupNode, out: &mut Emitter<'_>) -> CompileResult<()>
where
    H: NodeHandler + ?Sized,
{
    match node {
        MarkupNode::DocumentStart(n) => handler.document_start(n, out),
        MarkupNode::DocumentEnd(n) => handler.document_end(n, out),
        MarkupNode::ElementStart(n) => handler.element_start(n, out),
        MarkupNode::ElementEnd(n) => handler.element_end(n, out),
        MarkupNode::KeyElementStart(n) => handler.key_element_start(n, out),
        MarkupNode::KeyElementEnd(n) => handler.key_element_end(n, out),
        MarkupNode::EndAttributes(n) => handler.end_attributes(n, out),
        MarkupNode::Property(n) => handler.property(n, out),
        MarkupNode::PropertyWithExtension(n) => handler.property_with_extension(n, out),
        MarkupNode::PropertyWithType(n) => handler.property_with_type(n, out),
        MarkupNode::PropertyComplexStart(n) => handler.complex_property_start(n, out),
        MarkupNode::PropertyComplexEnd(n) => handler.complex_property_end(n, out),
        MarkupNode::PropertyArrayStart(n) => handler.array_property_start(n, out),
        MarkupNode::PropertyArrayEnd(n) => handler.array_property_end(n, out),
        MarkupNode::PropertyIListStart(n) => handler.list_property_start(n, out),
        MarkupNode::PropertyIListEnd(n) => handler.list_property_end(n, out),
        MarkupNode::PropertyIDictionaryStart(n) => handler.dictionary_property_start(n, out),
        MarkupNode::PropertyIDictionaryEnd(n) => handler.dictionary_property_end(n, out),
        MarkupNode::ContentProperty(n) => handler.content_property(n, out),
        MarkupNode::Text(n) => handler.text(n, out),
        MarkupNode::LiteralContent(n) => handler.literal_content(n, out),
        MarkupNode::RoutedEvent(n) => handler.routed_event(n, out),
        MarkupNode::ClrEvent(n) => handler.clr_event(n, out),
        MarkupNode::XmlnsProperty(n) => handler.xmlns_property(n, out),
        MarkupNode::PiMapping(n) => handler.pi_mapping(n, out),
        MarkupNode::DefAttribute(n) => handler.def_attribute(n, out),
        MarkupNode::DefKeyTypeAttribute(n) => handler.def_key_type_attribute(n, out),
        MarkupNode::PresentationOptionsAttribute(n) => handler.presentation_options_attribute(n, out),
        MarkupNode::ConstructorParametersStart(n) => handler.constructor_parameters_start(n, out),
        MarkupNode::ConstructorParametersEnd(n) => handler.constructor_parameters_end(n, out),
        MarkupNode::ConstructorParameterType(n) => handler.constructor_parameter_type(n, out),
        MarkupNode::UnknownTagStart(n) => handler.unknown_tag_start(n, out),
        MarkupNode::UnknownTagEnd(n) => handler.unknown_tag_end(n, out),
        MarkupNode::UnknownAttribute(n) => handler.unknown_attribute(n, out),
    }
}

/// The base grammar: every kind forwarded unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseGrammar;

impl NodeHandler for BaseGrammar {
    fn label(&self) -> &'static str {
        "base"
    }
}
