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

//! The programmatic markup writer.

use crate::scope::{ScopeEntry, ScopeStack};
use mrc_core::extension::{looks_like_extension, parse_type_extension, unescape_literal};
use mrc_core::node::{
    ContentPropertyNode, DefAttributeNode, DefKeyTypeNode, ElementNode, EventNode,
    ExtensionPropertyNode, LiteralNode, MappingNode, Marker, PropertyNode, PropertyScopeNode,
    TextNode, TypeValueNode, XmlnsNode,
};
use mrc_core::{
    AttributeUsage, CompileError, CompileResult, Expansion, ExtensionExpander, MarkupNode,
    NoExtensions, Position, PropertyIdentity, RecordSink, ScopeKind, TypeRef, TypeResolver,
};
use mrc_stream::{CompileStats, Compiler, CompilerConfig};
use tracing::{debug, trace, warn};

/// Definition directive that names a dictionary key.
const KEY_DIRECTIVE: &str = "Key";

/// Member that receives `xml:lang`.
const LANGUAGE_PROPERTY: &str = "Language";

/// Writer configuration; the writer reuses the dispatcher's settings.
pub type WriterConfig = CompilerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Fresh,
    Open,
    Closed,
}

/// Builds a markup document call by call.
///
/// Every call produces one or more [`MarkupNode`]s and dispatches them
/// through an owned [`Compiler`], so written documents get exactly the
/// validation and style reinterpretation that tokenized markup gets.
///
/// Misuse of the call protocol (ending the wrong scope, writing attributes
/// outside an element or after its children, naming an unknown type) is rejected before anything is
/// dispatched and leaves the writer unchanged. Errors raised while
/// dispatching are fatal: the sink is closed and every later call fails with
/// [`CompileError::Closed`].
///
/// # Examples
///
/// ```rust
/// use mrc_core::NodeKind;
/// use mrc_test::{presentation_types, RecordingSink};
/// use mrc_writer::MarkupWriter;
///
/// let types = presentation_types();
/// let mut writer = MarkupWriter::new(RecordingSink::new(), &types);
/// writer.start_document().unwrap();
/// writer.start_element("Button").unwrap();
/// writer.write_property("Content", "OK").unwrap();
/// writer.end_element().unwrap();
/// writer.end_document().unwrap();
///
/// assert_eq!(
///     writer.sink().kinds(),
///     vec![
///         NodeKind::DocumentStart,
///         NodeKind::ElementStart,
///         NodeKind::EndAttributes,
///         NodeKind::Property,
///         NodeKind::ElementEnd,
///         NodeKind::DocumentEnd,
///     ]
/// );
/// ```
pub struct MarkupWriter<S: RecordSink, R: TypeResolver, X: ExtensionExpander = NoExtensions> {
    compiler: Compiler<S, R>,
    expander: X,
    scopes: ScopeStack,
    state: WriterState,
    root_written: bool,
}

impl<S: RecordSink, R: TypeResolver> MarkupWriter<S, R, NoExtensions> {
    /// Create a writer with the default configuration and no extension support.
    pub fn new(sink: S, resolver: R) -> Self {
        Self::with_config(sink, resolver, WriterConfig::default())
    }

    /// Create a writer with a custom configuration.
    pub fn with_config(sink: S, resolver: R, config: WriterConfig) -> Self {
        Self::from_compiler(Compiler::with_config(sink, resolver, config))
    }

    /// Write through an already configured compiler (hooks, cancel flag).
    pub fn from_compiler(compiler: Compiler<S, R>) -> Self {
        Self {
            compiler,
            expander: NoExtensions,
            scopes: ScopeStack::new(),
            state: WriterState::Fresh,
            root_written: false,
        }
    }
}

impl<S: RecordSink, R: TypeResolver, X: ExtensionExpander> MarkupWriter<S, R, X> {
    /// Expand extension-valued properties with `expander`.
    pub fn with_extensions<Y: ExtensionExpander>(self, expander: Y) -> MarkupWriter<S, R, Y> {
        MarkupWriter {
            compiler: self.compiler,
            expander,
            scopes: self.scopes,
            state: self.state,
            root_written: self.root_written,
        }
    }

    pub fn compiler(&self) -> &Compiler<S, R> {
        &self.compiler
    }

    pub fn sink(&self) -> &S {
        self.compiler.sink()
    }

    pub fn expander(&self) -> &X {
        &self.expander
    }

    pub fn stats(&self) -> &CompileStats {
        self.compiler.stats()
    }

    /// Consume the writer and return its sink.
    pub fn into_sink(self) -> S {
        self.compiler.into_sink()
    }

    /// Number of open scopes, including the document.
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    pub fn is_closed(&self) -> bool {
        self.state == WriterState::Closed
    }

    // ==================== Document ====================

    /// Begin the document. Must be the first call, and is allowed once.
    pub fn start_document(&mut self) -> CompileResult<()> {
        match self.state {
            WriterState::Closed => return Err(CompileError::Closed),
            WriterState::Open => return Err(CompileError::AlreadyStarted),
            WriterState::Fresh => {}
        }
        debug!("writer document started");
        self.dispatch(MarkupNode::DocumentStart(Marker::at(Position::synthetic(0))))?;
        self.state = WriterState::Open;
        self.scopes.push(ScopeEntry::new(ScopeKind::Document));
        Ok(())
    }

    /// End the document. The compiler closes the sink on `DocumentEnd`.
    pub fn end_document(&mut self) -> CompileResult<()> {
        self.ensure_open()?;
        self.end_scope(ScopeKind::Document)?;
        debug!("writer document ended");
        self.state = WriterState::Closed;
        Ok(())
    }

    /// Release the sink. Idempotent.
    pub fn close(&mut self) -> CompileResult<()> {
        self.state = WriterState::Closed;
        self.compiler.close()
    }

    // ==================== Elements ====================

    /// Open an element of the named type.
    pub fn start_element(&mut self, type_name: &str) -> CompileResult<()> {
        self.ensure_open()?;
        let at_document = self.scopes.top_kind() == Some(ScopeKind::Document);
        if at_document && self.root_written {
            return Err(CompileError::protocol(format!(
                "document already has a root element; cannot start '{}'",
                type_name
            )));
        }
        let ty = self.resolve_type(type_name)?;
        let node = ElementNode::new(self.position(), ty.clone());
        self.dispatch(MarkupNode::ElementStart(node))?;
        self.root_written |= at_document;
        self.scopes.mark_content();
        self.scopes.push(ScopeEntry::element(ty));
        Ok(())
    }

    pub fn end_element(&mut self) -> CompileResult<()> {
        self.ensure_open()?;
        self.end_scope(ScopeKind::Element)
    }

    // ==================== Attributes ====================

    /// Assign a property of the innermost element.
    ///
    /// `name` is either a member of the element type or qualified
    /// (`Grid.Row`); `xml:lang` assigns the element's `Language`. Values in
    /// extension syntax are offered to the extension expander; a `{}` prefix
    /// escapes a literal brace.
    pub fn write_property(&mut self, name: &str, value: &str) -> CompileResult<()> {
        self.ensure_open()?;
        let owner = self.attribute_owner()?;
        let member = if name == AttributeUsage::XML_LANG {
            LANGUAGE_PROPERTY
        } else {
            name
        };
        let attribute = self.resolve_property(member, &owner)?;
        let usage = AttributeUsage::classify(name, &attribute.name);

        let expansion = if looks_like_extension(value) {
            self.expander
                .try_expand(&attribute.owner, &attribute.name, value)?
        } else {
            None
        };

        match expansion {
            Some(Expansion::Simple {
                extension,
                argument,
            }) => {
                self.end_attributes()?;
                let position = self.position();
                self.dispatch(MarkupNode::PropertyWithExtension(ExtensionPropertyNode {
                    position,
                    attribute,
                    extension,
                    argument,
                }))
            }
            Some(Expansion::Complex(nodes)) => {
                self.end_attributes()?;
                let offset = self.scopes.depth();
                trace!(property = %attribute, count = nodes.len(), "buffering extension subtree");
                let rebased: Vec<MarkupNode> =
                    nodes.into_iter().map(|node| node.rebased(offset)).collect();
                self.guard(|writer| writer.compiler.buffer_expansion(rebased))
            }
            None => {
                self.end_attributes()?;
                let mut node =
                    PropertyNode::new(self.position(), attribute, unescape_literal(value));
                node.usage = usage;
                self.dispatch(MarkupNode::Property(node))
            }
        }
    }

    /// Write a definition directive (`x:Key`, `x:Name`, ...).
    ///
    /// A `Key` written as `{x:Type T}` with a resolvable `T` becomes a typed
    /// key; an unresolvable type falls back to a string key.
    pub fn write_def_attribute(&mut self, name: &str, value: &str) -> CompileResult<()> {
        self.ensure_open()?;
        self.attribute_owner()?;
        if name == KEY_DIRECTIVE && looks_like_extension(value) {
            if let Some(type_name) = parse_type_extension(value) {
                match self.compiler.resolver().resolve_type(type_name) {
                    Some(key_type) => {
                        self.end_attributes()?;
                        let position = self.position();
                        return self.dispatch(MarkupNode::DefKeyTypeAttribute(DefKeyTypeNode {
                            position,
                            key_type,
                        }));
                    }
                    None => warn!(key = value, "key type not resolvable; writing it as a string"),
                }
            }
        }
        self.end_attributes()?;
        let node = DefAttributeNode {
            position: self.position(),
            name: name.to_string(),
            value: value.to_string(),
        };
        self.dispatch(MarkupNode::DefAttribute(node))
    }

    pub fn write_presentation_options_attribute(
        &mut self,
        name: &str,
        value: &str,
    ) -> CompileResult<()> {
        self.ensure_open()?;
        self.attribute_owner()?;
        self.end_attributes()?;
        let node = DefAttributeNode {
            position: self.position(),
            name: name.to_string(),
            value: value.to_string(),
        };
        self.dispatch(MarkupNode::PresentationOptionsAttribute(node))
    }

    /// Declare an XML namespace prefix on the innermost element.
    pub fn write_xmlns_property(&mut self, prefix: &str, namespace: &str) -> CompileResult<()> {
        self.ensure_open()?;
        self.attribute_owner()?;
        self.end_attributes()?;
        let node = XmlnsNode {
            position: self.position(),
            prefix: prefix.to_string(),
            namespace: namespace.to_string(),
        };
        self.dispatch(MarkupNode::XmlnsProperty(node))
    }

    /// Name the property that receives the element's content.
    pub fn write_content_property(&mut self, name: &str) -> CompileResult<()> {
        self.ensure_open()?;
        let owner = self.attribute_owner()?;
        let property = self.resolve_property(name, &owner)?;
        self.end_attributes()?;
        let node = ContentPropertyNode {
            position: self.position(),
            property,
        };
        self.dispatch(MarkupNode::ContentProperty(node))
    }

    pub fn write_routed_event(&mut self, event: &str, handler: &str) -> CompileResult<()> {
        let node = self.event_node(event, handler)?;
        self.dispatch(MarkupNode::RoutedEvent(node))
    }

    pub fn write_clr_event(&mut self, event: &str, handler: &str) -> CompileResult<()> {
        let node = self.event_node(event, handler)?;
        self.dispatch(MarkupNode::ClrEvent(node))
    }

    fn event_node(&mut self, event: &str, handler: &str) -> CompileResult<EventNode> {
        self.ensure_open()?;
        let owner = self.attribute_owner()?;
        let event = self.resolve_property(event, &owner)?;
        self.end_attributes()?;
        Ok(EventNode {
            position: self.position(),
            event,
            handler: handler.to_string(),
        })
    }

    // ==================== Property scopes ====================

    pub fn start_complex_property(&mut self, name: &str) -> CompileResult<()> {
        self.start_property_scope(ScopeKind::ComplexProperty, name)
    }

    pub fn end_complex_property(&mut self) -> CompileResult<()> {
        self.ensure_open()?;
        self.end_scope(ScopeKind::ComplexProperty)
    }

    pub fn start_array_property(&mut self, name: &str) -> CompileResult<()> {
        self.start_property_scope(ScopeKind::ArrayProperty, name)
    }

    pub fn end_array_property(&mut self) -> CompileResult<()> {
        self.ensure_open()?;
        self.end_scope(ScopeKind::ArrayProperty)
    }

    pub fn start_list_property(&mut self, name: &str) -> CompileResult<()> {
        self.start_property_scope(ScopeKind::ListProperty, name)
    }

    pub fn end_list_property(&mut self) -> CompileResult<()> {
        self.ensure_open()?;
        self.end_scope(ScopeKind::ListProperty)
    }

    pub fn start_dictionary_property(&mut self, name: &str) -> CompileResult<()> {
        self.start_property_scope(ScopeKind::DictionaryProperty, name)
    }

    pub fn end_dictionary_property(&mut self) -> CompileResult<()> {
        self.ensure_open()?;
        self.end_scope(ScopeKind::DictionaryProperty)
    }

    fn start_property_scope(&mut self, kind: ScopeKind, name: &str) -> CompileResult<()> {
        self.ensure_open()?;
        let owner = self.element_type()?;
        let property = self.resolve_property(name, &owner)?;
        let scope = PropertyScopeNode {
            position: self.position(),
            property,
        };
        let node = match kind {
            ScopeKind::ArrayProperty => MarkupNode::PropertyArrayStart(scope),
            ScopeKind::ListProperty => MarkupNode::PropertyIListStart(scope),
            ScopeKind::DictionaryProperty => MarkupNode::PropertyIDictionaryStart(scope),
            _ => MarkupNode::PropertyComplexStart(scope),
        };
        self.dispatch(node)?;
        self.scopes.mark_content();
        self.scopes.push(ScopeEntry::new(kind));
        Ok(())
    }

    // ==================== Constructor parameters ====================

    pub fn start_constructor(&mut self) -> CompileResult<()> {
        self.ensure_open()?;
        self.element_type()?;
        let marker = Marker::at(self.position());
        self.dispatch(MarkupNode::ConstructorParametersStart(marker))?;
        self.scopes.mark_content();
        self.scopes.push(ScopeEntry::new(ScopeKind::Constructor));
        Ok(())
    }

    pub fn end_constructor(&mut self) -> CompileResult<()> {
        self.ensure_open()?;
        self.end_scope(ScopeKind::Constructor)
    }

    /// Pass a type as a constructor argument.
    pub fn write_constructor_parameter_type(&mut self, type_name: &str) -> CompileResult<()> {
        self.ensure_open()?;
        if self.scopes.top_kind() != Some(ScopeKind::Constructor) {
            return Err(CompileError::protocol(
                "constructor parameter type outside constructor parameters",
            ));
        }
        let ty = self.resolve_type(type_name)?;
        let node = TypeValueNode {
            position: self.position(),
            ty,
        };
        self.dispatch(MarkupNode::ConstructorParameterType(node))
    }

    // ==================== Content ====================

    pub fn write_text(&mut self, text: &str) -> CompileResult<()> {
        self.ensure_open()?;
        self.ensure_content("text")?;
        let node = TextNode::new(self.position(), text);
        self.dispatch(MarkupNode::Text(node))?;
        self.scopes.mark_content();
        Ok(())
    }

    /// Content passed through without interpretation.
    pub fn write_literal_content(&mut self, content: &str) -> CompileResult<()> {
        self.ensure_open()?;
        self.ensure_content("literal content")?;
        let node = LiteralNode {
            position: self.position(),
            content: content.to_string(),
        };
        self.dispatch(MarkupNode::LiteralContent(node))?;
        self.scopes.mark_content();
        Ok(())
    }

    /// Map an XML namespace to a CLR namespace (`<?Mapping ...?>`).
    pub fn write_mapping(
        &mut self,
        xml_namespace: &str,
        clr_namespace: &str,
        assembly: &str,
    ) -> CompileResult<()> {
        self.ensure_open()?;
        let node = MappingNode {
            position: self.position(),
            xml_namespace: xml_namespace.to_string(),
            clr_namespace: clr_namespace.to_string(),
            assembly: assembly.to_string(),
        };
        self.dispatch(MarkupNode::PiMapping(node))
    }

    // ==================== Internals ====================

    fn ensure_open(&self) -> CompileResult<()> {
        match self.state {
            WriterState::Fresh => Err(CompileError::NotStarted),
            WriterState::Closed => Err(CompileError::Closed),
            WriterState::Open => Ok(()),
        }
    }

    /// Type of the innermost scope, which must be an element.
    fn element_type(&self) -> CompileResult<TypeRef> {
        match self.scopes.top() {
            Some(ScopeEntry {
                kind: ScopeKind::Element,
                ty: Some(ty),
                ..
            }) => Ok(ty.clone()),
            Some(entry) => Err(CompileError::protocol(format!(
                "attribute written inside a {} instead of an element",
                entry.kind
            ))),
            None => Err(CompileError::NotStarted),
        }
    }

    /// Type of the element receiving an attribute. Attributes must precede
    /// the element's children.
    fn attribute_owner(&self) -> CompileResult<TypeRef> {
        let owner = self.element_type()?;
        match self.scopes.top() {
            Some(entry) if entry.content => Err(CompileError::protocol(format!(
                "attribute written on {} after its content",
                owner.local_name()
            ))),
            _ => Ok(owner),
        }
    }

    fn ensure_content(&self, what: &str) -> CompileResult<()> {
        match self.scopes.top_kind() {
            Some(ScopeKind::Document) | None => Err(CompileError::protocol(format!(
                "{} outside the root element",
                what
            ))),
            Some(_) => Ok(()),
        }
    }

    fn position(&self) -> Position {
        Position::synthetic(self.scopes.depth())
    }

    fn resolve_type(&self, name: &str) -> CompileResult<TypeRef> {
        self.compiler
            .resolver()
            .resolve_type(name)
            .ok_or_else(|| CompileError::unresolvable(format!("type '{}'", name), None))
    }

    fn resolve_property(&self, name: &str, owner: &TypeRef) -> CompileResult<PropertyIdentity> {
        self.compiler
            .resolver()
            .resolve_property(name, Some(owner))
            .ok_or_else(|| {
                CompileError::unresolvable(
                    format!("property '{}'", name),
                    Some(format!("on {}", owner.local_name())),
                )
            })
    }

    /// Emit the element's `EndAttributes` before its first attribute.
    fn end_attributes(&mut self) -> CompileResult<()> {
        let pending = match self.scopes.top() {
            Some(entry) => entry.kind == ScopeKind::Element && !entry.end_attributes,
            None => false,
        };
        if !pending {
            return Ok(());
        }
        trace!(depth = self.scopes.depth(), "synthesizing end of attributes");
        self.dispatch(MarkupNode::EndAttributes(Marker::at(self.position())))?;
        if let Some(entry) = self.scopes.top_mut() {
            entry.end_attributes = true;
        }
        Ok(())
    }

    fn end_scope(&mut self, kind: ScopeKind) -> CompileResult<()> {
        self.scopes.pop_matching(kind)?;
        let marker = Marker::at(self.position());
        let node = match kind {
            ScopeKind::Document => MarkupNode::DocumentEnd(marker),
            ScopeKind::Element => MarkupNode::ElementEnd(marker),
            ScopeKind::Constructor => MarkupNode::ConstructorParametersEnd(marker),
            ScopeKind::ComplexProperty => MarkupNode::PropertyComplexEnd(marker),
            ScopeKind::ArrayProperty => MarkupNode::PropertyArrayEnd(marker),
            ScopeKind::ListProperty => MarkupNode::PropertyIListEnd(marker),
            ScopeKind::DictionaryProperty => MarkupNode::PropertyIDictionaryEnd(marker),
        };
        self.dispatch(node)
    }

    fn dispatch(&mut self, node: MarkupNode) -> CompileResult<()> {
        self.guard(|writer| writer.compiler.dispatch(node))
    }

    /// Run a compiler call; a failure there closes the writer.
    fn guard(
        &mut self,
        call: impl FnOnce(&mut Self) -> CompileResult<()>,
    ) -> CompileResult<()> {
        let result = call(self);
        if result.is_err() {
            self.state = WriterState::Closed;
        }
        result
    }
}

impl<S, R, X> std::fmt::Debug for MarkupWriter<S, R, X>
where
    S: RecordSink + std::fmt::Debug,
    R: TypeResolver,
    X: ExtensionExpander,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupWriter")
            .field("compiler", &self.compiler)
            .field("scopes", &self.scopes)
            .field("state", &self.state)
            .finish()
    }
}
