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

//! Markup node model.
//!
//! A compiled document travels through the compiler as a flat, ordered sequence
//! of [`MarkupNode`] values. Every node carries a [`Position`] and a kind-specific
//! payload; structure is expressed by matching start/end node pairs rather than
//! by nesting.
//!
//! # Depth Convention
//!
//! `Position::depth` counts the scoped constructs that are open around a node.
//! A start node and its matching end node share a depth; the attributes and
//! children of a scope sit exactly one level deeper:
//!
//! ```text
//! DocumentStart              depth 0
//!   ElementStart(Button)     depth 1
//!     Property(Width=10)     depth 2
//!     EndAttributes          depth 2
//!   ElementEnd               depth 1
//! DocumentEnd                depth 0
//! ```

use std::fmt;

/// Source position of a node.
///
/// Tokenizer-produced nodes carry 1-based line and column numbers. Nodes
/// synthesized by the programmatic writer have no source text and use line `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Line number (1-based, `0` for synthesized nodes).
    pub line: usize,
    /// Column number (1-based, `0` for synthesized nodes).
    pub column: usize,
    /// Structural nesting depth.
    pub depth: usize,
}

impl Position {
    /// Create a position from source coordinates.
    pub const fn new(line: usize, column: usize, depth: usize) -> Self {
        Self {
            line,
            column,
            depth,
        }
    }

    /// Create a position for a node that has no source text.
    pub const fn synthetic(depth: usize) -> Self {
        Self::new(0, 0, depth)
    }

    /// Whether this position was synthesized rather than read from source.
    pub fn is_synthetic(&self) -> bool {
        self.line == 0
    }

    /// Same source coordinates at a different depth.
    pub fn with_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Assembly-qualified type identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef {
    /// Assembly the type lives in (may be empty for well-known types).
    pub assembly: String,
    /// Full type name including its namespace.
    pub name: String,
}

impl TypeRef {
    /// Create a type identity.
    pub fn new(assembly: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            assembly: assembly.into(),
            name: name.into(),
        }
    }

    /// Type name without its namespace (`System.Windows.Style` -> `Style`).
    pub fn local_name(&self) -> &str {
        match memchr::memrchr(b'.', self.name.as_bytes()) {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }

    /// Namespace part of the type name, empty if there is none.
    pub fn namespace(&self) -> &str {
        match memchr::memrchr(b'.', self.name.as_bytes()) {
            Some(idx) => &self.name[..idx],
            None => "",
        }
    }

    /// Whether this identity is missing its type name.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Opaque handle to a resolved property, event or field.
///
/// Handles are issued by a [`TypeResolver`](crate::TypeResolver) and are only
/// meaningful to the resolver that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberHandle(pub u32);

/// Identity of a property: owner type, name and (optionally) resolved member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyIdentity {
    /// Type that declares (or attaches) the property.
    pub owner: TypeRef,
    /// Property name without owner prefix.
    pub name: String,
    /// Resolved member, when the producer already resolved it.
    pub member: Option<MemberHandle>,
}

impl PropertyIdentity {
    /// Create an unresolved identity.
    pub fn new(owner: TypeRef, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
            member: None,
        }
    }

    /// Attach a resolved member handle.
    pub fn with_member(mut self, member: MemberHandle) -> Self {
        self.member = Some(member);
        self
    }

    /// `Owner.Name` spelling used in diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner.local_name(), self.name)
    }

    /// Whether the producer left out a required field.
    pub fn is_incomplete(&self) -> bool {
        self.owner.is_empty() || self.name.is_empty()
    }
}

impl fmt::Display for PropertyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner.local_name(), self.name)
    }
}

/// Split `Owner.Name` into its owner and name parts.
///
/// Returns `None` for unqualified names.
pub fn split_qualified(name: &str) -> Option<(&str, &str)> {
    let idx = memchr::memrchr(b'.', name.as_bytes())?;
    let (owner, rest) = (&name[..idx], &name[idx + 1..]);
    if owner.is_empty() || rest.is_empty() {
        None
    } else {
        Some((owner, rest))
    }
}

/// How an attribute is interpreted by the object-graph loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeUsage {
    /// Ordinary property assignment.
    #[default]
    Default,
    /// `xml:lang`, stored as the element's `Language`.
    XmlLang,
    /// Property that doubles as the runtime name of the object.
    RuntimeName,
}

impl AttributeUsage {
    /// Attribute name that carries the document language.
    pub const XML_LANG: &'static str = "xml:lang";

    /// Classify an attribute by the name it was written with and the member
    /// it resolved to.
    pub fn classify(written: &str, member: &str) -> Self {
        match (written, member) {
            (Self::XML_LANG, _) => Self::XmlLang,
            (_, "Name") => Self::RuntimeName,
            _ => Self::Default,
        }
    }
}

/// Structural scope kinds tracked by the programmatic writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Document,
    Element,
    Constructor,
    ComplexProperty,
    ArrayProperty,
    ListProperty,
    DictionaryProperty,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Document => "document",
            Self::Element => "element",
            Self::Constructor => "constructor parameters",
            Self::ComplexProperty => "complex property",
            Self::ArrayProperty => "array property",
            Self::ListProperty => "list property",
            Self::DictionaryProperty => "dictionary property",
        };
        f.write_str(name)
    }
}

/// Cooperative-step vs. run-to-completion mode of a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Not yet fixed; the first boundary or directive decides.
    #[default]
    Uninitialized,
    /// Run to completion.
    Synchronous,
    /// Cooperative stepping in time-boxed slices.
    Asynchronous,
}

/// Name of the definition directive that selects the parse mode.
pub const SYNCHRONOUS_MODE_DIRECTIVE: &str = "SynchronousMode";

impl ParseMode {
    /// Parse the value of a `SynchronousMode` directive.
    pub fn from_directive(value: &str) -> Option<Self> {
        match value.trim() {
            "Sync" => Some(Self::Synchronous),
            "Async" => Some(Self::Asynchronous),
            _ => None,
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Synchronous => write!(f, "synchronous"),
            Self::Asynchronous => write!(f, "asynchronous"),
        }
    }
}

// =============================================================================
// Node payloads
// =============================================================================

/// Payload-less node (document bounds, end nodes, boundaries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub position: Position,
}

impl Marker {
    pub fn at(position: Position) -> Self {
        Self { position }
    }
}

/// Element (or key element) start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub position: Position,
    pub ty: TypeRef,
    /// Element has no content at all (`<Foo/>`).
    pub empty: bool,
    /// Element is built by a dedicated serializer rather than its constructor.
    pub serializer: bool,
}

impl ElementNode {
    pub fn new(position: Position, ty: TypeRef) -> Self {
        Self {
            position,
            ty,
            empty: false,
            serializer: false,
        }
    }
}

/// Property assignment from an attribute (or synthesized from content).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNode {
    pub position: Position,
    /// Property as written on the declaring tag.
    pub attribute: PropertyIdentity,
    /// Raw attribute text.
    pub value: String,
    pub usage: AttributeUsage,
    /// Property whose type selects the value converter, when it differs from
    /// the attribute (`<Setter Property="Background" Value="Red"/>`).
    pub value_side: Option<PropertyIdentity>,
}

impl PropertyNode {
    pub fn new(position: Position, attribute: PropertyIdentity, value: impl Into<String>) -> Self {
        Self {
            position,
            attribute,
            value: value.into(),
            usage: AttributeUsage::Default,
            value_side: None,
        }
    }

    /// Identity used for converter lookup.
    pub fn converter_identity(&self) -> &PropertyIdentity {
        self.value_side.as_ref().unwrap_or(&self.attribute)
    }

    pub fn name(&self) -> &str {
        &self.attribute.name
    }
}

/// Property whose value is a simple markup extension (`{StaticResource k}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPropertyNode {
    pub position: Position,
    pub attribute: PropertyIdentity,
    pub extension: TypeRef,
    pub argument: String,
}

/// Property whose value is a type reference (`TargetType="{x:Type Button}"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePropertyNode {
    pub position: Position,
    pub attribute: PropertyIdentity,
    pub value_type: TypeRef,
}

/// Start of a complex, array, list or dictionary property scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyScopeNode {
    pub position: Position,
    pub property: PropertyIdentity,
}

/// Marks the content property of the enclosing element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPropertyNode {
    pub position: Position,
    pub property: PropertyIdentity,
}

/// Character content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub position: Position,
    pub text: String,
    /// Explicit converter for the text, if the producer knows one.
    pub converter: Option<TypeRef>,
}

impl TextNode {
    pub fn new(position: Position, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            converter: None,
        }
    }

    /// Text made only of whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Content copied verbatim (`x:XData` islands and similar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralNode {
    pub position: Position,
    pub content: String,
}

/// Routed or CLR event hookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventNode {
    pub position: Position,
    pub event: PropertyIdentity,
    pub handler: String,
}

/// `xmlns` / `xmlns:prefix` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlnsNode {
    pub position: Position,
    pub prefix: String,
    pub namespace: String,
}

/// Processing-instruction namespace mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingNode {
    pub position: Position,
    pub xml_namespace: String,
    pub clr_namespace: String,
    pub assembly: String,
}

/// Definition-namespace directive (`x:Key`, `x:Name`, `x:SynchronousMode`, ...),
/// also used for presentation-options attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefAttributeNode {
    pub position: Position,
    pub name: String,
    pub value: String,
}

/// `x:Key` resolved to a static type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefKeyTypeNode {
    pub position: Position,
    pub key_type: TypeRef,
}

/// Type reference inside constructor parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeValueNode {
    pub position: Position,
    pub ty: TypeRef,
}

/// Tag the tokenizer could not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTagNode {
    pub position: Position,
    pub xml_namespace: String,
    pub name: String,
}

/// Attribute the tokenizer could not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttributeNode {
    pub position: Position,
    pub xml_namespace: String,
    pub name: String,
    pub value: String,
}

// =============================================================================
// NodeKind
// =============================================================================

/// Discriminant of a [`MarkupNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    DocumentStart,
    DocumentEnd,
    ElementStart,
    ElementEnd,
    KeyElementStart,
    KeyElementEnd,
    EndAttributes,
    Property,
    PropertyWithExtension,
    PropertyWithType,
    PropertyComplexStart,
    PropertyComplexEnd,
    PropertyArrayStart,
    PropertyArrayEnd,
    PropertyIListStart,
    PropertyIListEnd,
    PropertyIDictionaryStart,
    PropertyIDictionaryEnd,
    ContentProperty,
    Text,
    LiteralContent,
    RoutedEvent,
    ClrEvent,
    XmlnsProperty,
    PiMapping,
    DefAttribute,
    DefKeyTypeAttribute,
    PresentationOptionsAttribute,
    ConstructorParametersStart,
    ConstructorParametersEnd,
    ConstructorParameterType,
    UnknownTagStart,
    UnknownTagEnd,
    UnknownAttribute,
}

impl NodeKind {
    /// End kind closing a scope opened by this kind.
    pub fn matching_end(self) -> Option<NodeKind> {
        let end = match self {
            Self::DocumentStart => Self::DocumentEnd,
            Self::ElementStart => Self::ElementEnd,
            Self::KeyElementStart => Self::KeyElementEnd,
            Self::PropertyComplexStart => Self::PropertyComplexEnd,
            Self::PropertyArrayStart => Self::PropertyArrayEnd,
            Self::PropertyIListStart => Self::PropertyIListEnd,
            Self::PropertyIDictionaryStart => Self::PropertyIDictionaryEnd,
            Self::ConstructorParametersStart => Self::ConstructorParametersEnd,
            Self::UnknownTagStart => Self::UnknownTagEnd,
            _ => return None,
        };
        Some(end)
    }

    /// Opens a scope that a later end node closes.
    pub fn is_scope_start(self) -> bool {
        self.matching_end().is_some()
    }

    /// Closes a scope.
    pub fn is_scope_end(self) -> bool {
        matches!(
            self,
            Self::DocumentEnd
                | Self::ElementEnd
                | Self::KeyElementEnd
                | Self::PropertyComplexEnd
                | Self::PropertyArrayEnd
                | Self::PropertyIListEnd
                | Self::PropertyIDictionaryEnd
                | Self::ConstructorParametersEnd
                | Self::UnknownTagEnd
        )
    }

    /// Nodes that belong to the attribute section of an element.
    pub fn is_attribute(self) -> bool {
        matches!(
            self,
            Self::Property
                | Self::PropertyWithExtension
                | Self::PropertyWithType
                | Self::ContentProperty
                | Self::RoutedEvent
                | Self::ClrEvent
                | Self::XmlnsProperty
                | Self::DefAttribute
                | Self::DefKeyTypeAttribute
                | Self::PresentationOptionsAttribute
                | Self::UnknownAttribute
        )
    }

    /// Nodes before which buffered extension subtrees are replayed.
    pub fn is_flush_point(self) -> bool {
        !self.is_attribute() && self != Self::EndAttributes
    }

    /// Property scope starts (complex, array, list, dictionary).
    pub fn is_property_scope_start(self) -> bool {
        matches!(
            self,
            Self::PropertyComplexStart
                | Self::PropertyArrayStart
                | Self::PropertyIListStart
                | Self::PropertyIDictionaryStart
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// MarkupNode
// =============================================================================

/// One structural unit of the markup intermediate representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    DocumentStart(Marker),
    DocumentEnd(Marker),
    ElementStart(ElementNode),
    ElementEnd(Marker),
    KeyElementStart(ElementNode),
    KeyElementEnd(Marker),
    EndAttributes(Marker),
    Property(PropertyNode),
    PropertyWithExtension(ExtensionPropertyNode),
    PropertyWithType(TypePropertyNode),
    PropertyComplexStart(PropertyScopeNode),
    PropertyComplexEnd(Marker),
    PropertyArrayStart(PropertyScopeNode),
    PropertyArrayEnd(Marker),
    PropertyIListStart(PropertyScopeNode),
    PropertyIListEnd(Marker),
    PropertyIDictionaryStart(PropertyScopeNode),
    PropertyIDictionaryEnd(Marker),
    ContentProperty(ContentPropertyNode),
    Text(TextNode),
    LiteralContent(LiteralNode),
    RoutedEvent(EventNode),
    ClrEvent(EventNode),
    XmlnsProperty(XmlnsNode),
    PiMapping(MappingNode),
    DefAttribute(DefAttributeNode),
    DefKeyTypeAttribute(DefKeyTypeNode),
    PresentationOptionsAttribute(DefAttributeNode),
    ConstructorParametersStart(Marker),
    ConstructorParametersEnd(Marker),
    ConstructorParameterType(TypeValueNode),
    UnknownTagStart(UnknownTagNode),
    UnknownTagEnd(Marker),
    UnknownAttribute(UnknownAttributeNode),
}

impl MarkupNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::DocumentStart(_) => NodeKind::DocumentStart,
            Self::DocumentEnd(_) => NodeKind::DocumentEnd,
            Self::ElementStart(_) => NodeKind::ElementStart,
            Self::ElementEnd(_) => NodeKind::ElementEnd,
            Self::KeyElementStart(_) => NodeKind::KeyElementStart,
            Self::KeyElementEnd(_) => NodeKind::KeyElementEnd,
            Self::EndAttributes(_) => NodeKind::EndAttributes,
            Self::Property(_) => NodeKind::Property,
            Self::PropertyWithExtension(_) => NodeKind::PropertyWithExtension,
            Self::PropertyWithType(_) => NodeKind::PropertyWithType,
            Self::PropertyComplexStart(_) => NodeKind::PropertyComplexStart,
            Self::PropertyComplexEnd(_) => NodeKind::PropertyComplexEnd,
            Self::PropertyArrayStart(_) => NodeKind::PropertyArrayStart,
            Self::PropertyArrayEnd(_) => NodeKind::PropertyArrayEnd,
            Self::PropertyIListStart(_) => NodeKind::PropertyIListStart,
            Self::PropertyIListEnd(_) => NodeKind::PropertyIListEnd,
            Self::PropertyIDictionaryStart(_) => NodeKind::PropertyIDictionaryStart,
            Self::PropertyIDictionaryEnd(_) => NodeKind::PropertyIDictionaryEnd,
            Self::ContentProperty(_) => NodeKind::ContentProperty,
            Self::Text(_) => NodeKind::Text,
            Self::LiteralContent(_) => NodeKind::LiteralContent,
            Self::RoutedEvent(_) => NodeKind::RoutedEvent,
            Self::ClrEvent(_) => NodeKind::ClrEvent,
            Self::XmlnsProperty(_) => NodeKind::XmlnsProperty,
            Self::PiMapping(_) => NodeKind::PiMapping,
            Self::DefAttribute(_) => NodeKind::DefAttribute,
            Self::DefKeyTypeAttribute(_) => NodeKind::DefKeyTypeAttribute,
            Self::PresentationOptionsAttribute(_) => NodeKind::PresentationOptionsAttribute,
            Self::ConstructorParametersStart(_) => NodeKind::ConstructorParametersStart,
            Self::ConstructorParametersEnd(_) => NodeKind::ConstructorParametersEnd,
            Self::ConstructorParameterType(_) => NodeKind::ConstructorParameterType,
            Self::UnknownTagStart(_) => NodeKind::UnknownTagStart,
            Self::UnknownTagEnd(_) => NodeKind::UnknownTagEnd,
            Self::UnknownAttribute(_) => NodeKind::UnknownAttribute,
        }
    }

    pub fn position(&self) -> Position {
        *self.position_ref()
    }

    pub fn depth(&self) -> usize {
        self.position_ref().depth
    }

    /// Same node shifted `offset` levels deeper.
    pub fn rebased(mut self, offset: usize) -> Self {
        let position = self.position_mut();
        position.depth += offset;
        self
    }

    /// Same node with its source coordinates replaced.
    pub fn relocated(mut self, position: Position) -> Self {
        *self.position_mut() = position;
        self
    }

    /// Type named by the node, if any.
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Self::ElementStart(n) | Self::KeyElementStart(n) => Some(&n.ty),
            Self::PropertyWithType(n) => Some(&n.value_type),
            Self::PropertyWithExtension(n) => Some(&n.extension),
            Self::DefKeyTypeAttribute(n) => Some(&n.key_type),
            Self::ConstructorParameterType(n) => Some(&n.ty),
            _ => None,
        }
    }

    /// Property identity named by the node, if any.
    pub fn property(&self) -> Option<&PropertyIdentity> {
        match self {
            Self::Property(n) => Some(&n.attribute),
            Self::PropertyWithExtension(n) => Some(&n.attribute),
            Self::PropertyWithType(n) => Some(&n.attribute),
            Self::PropertyComplexStart(n)
            | Self::PropertyArrayStart(n)
            | Self::PropertyIListStart(n)
            | Self::PropertyIDictionaryStart(n) => Some(&n.property),
            Self::ContentProperty(n) => Some(&n.property),
            Self::RoutedEvent(n) | Self::ClrEvent(n) => Some(&n.event),
            _ => None,
        }
    }

    fn position_ref(&self) -> &Position {
        match self {
            Self::DocumentStart(n)
            | Self::DocumentEnd(n)
            | Self::ElementEnd(n)
            | Self::KeyElementEnd(n)
            | Self::EndAttributes(n)
            | Self::PropertyComplexEnd(n)
            | Self::PropertyArrayEnd(n)
            | Self::PropertyIListEnd(n)
            | Self::PropertyIDictionaryEnd(n)
            | Self::ConstructorParametersStart(n)
            | Self::ConstructorParametersEnd(n)
            | Self::UnknownTagEnd(n) => &n.position,
            Self::ElementStart(n) | Self::KeyElementStart(n) => &n.position,
            Self::Property(n) => &n.position,
            Self::PropertyWithExtension(n) => &n.position,
            Self::PropertyWithType(n) => &n.position,
            Self::PropertyComplexStart(n)
            | Self::PropertyArrayStart(n)
            | Self::PropertyIListStart(n)
            | Self::PropertyIDictionaryStart(n) => &n.position,
            Self::ContentProperty(n) => &n.position,
            Self::Text(n) => &n.position,
            Self::LiteralContent(n) => &n.position,
            Self::RoutedEvent(n) | Self::ClrEvent(n) => &n.position,
            Self::XmlnsProperty(n) => &n.position,
            Self::PiMapping(n) => &n.position,
            Self::DefAttribute(n) | Self::PresentationOptionsAttribute(n) => &n.position,
            Self::DefKeyTypeAttribute(n) => &n.position,
            Self::ConstructorParameterType(n) => &n.position,
            Self::UnknownTagStart(n) => &n.position,
            Self::UnknownAttribute(n) => &n.position,
        }
    }

    fn position_mut(&mut self) -> &mut Position {
        match self {
            Self::DocumentStart(n)
            | Self::DocumentEnd(n)
            | Self::ElementEnd(n)
            | Self::KeyElementEnd(n)
            | Self::EndAttributes(n)
            | Self::PropertyComplexEnd(n)
            | Self::PropertyArrayEnd(n)
            | Self::PropertyIListEnd(n)
            | Self::PropertyIDictionaryEnd(n)
            | Self::ConstructorParametersStart(n)
            | Self::ConstructorParametersEnd(n)
            | Self::UnknownTagEnd(n) => &mut n.position,
            Self::ElementStart(n) | Self::KeyElementStart(n) => &mut n.position,
            Self::Property(n) => &mut n.position,
            Self::PropertyWithExtension(n) => &mut n.position,
            Self::PropertyWithType(n) => &mut n.position,
            Self::PropertyComplexStart(n)
            | Self::PropertyArrayStart(n)
            | Self::PropertyIListStart(n)
            | Self::PropertyIDictionaryStart(n) => &mut n.position,
            Self::ContentProperty(n) => &mut n.position,
            Self::Text(n) => &mut n.position,
            Self::LiteralContent(n) => &mut n.position,
            Self::RoutedEvent(n) | Self::ClrEvent(n) => &mut n.position,
            Self::XmlnsProperty(n) => &mut n.position,
            Self::PiMapping(n) => &mut n.position,
            Self::DefAttribute(n) | Self::PresentationOptionsAttribute(n) => &mut n.position,
            Self::DefKeyTypeAttribute(n) => &mut n.position,
            Self::ConstructorParameterType(n) => &mut n.position,
            Self::UnknownTagStart(n) => &mut n.position,
            Self::UnknownAttribute(n) => &mut n.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> TypeRef {
        TypeRef::new("PresentationFramework", "System.Windows.Controls.Button")
    }

    // ==================== Position tests ====================

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7, 2).to_string(), "line 3, column 7");
    }

    #[test]
    fn test_synthetic_position() {
        let pos = Position::synthetic(4);
        assert!(pos.is_synthetic());
        assert_eq!(pos.depth, 4);
        assert!(!Position::new(1, 1, 0).is_synthetic());
    }

    // ==================== TypeRef tests ====================

    #[test]
    fn test_local_name_and_namespace() {
        let ty = button();
        assert_eq!(ty.local_name(), "Button");
        assert_eq!(ty.namespace(), "System.Windows.Controls");
    }

    #[test]
    fn test_local_name_without_namespace() {
        let ty = TypeRef::new("", "Style");
        assert_eq!(ty.local_name(), "Style");
        assert_eq!(ty.namespace(), "");
    }

    // ==================== Name splitting tests ====================

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("Control.Background"), Some(("Control", "Background")));
        assert_eq!(split_qualified("Background"), None);
        assert_eq!(split_qualified(".Background"), None);
        assert_eq!(split_qualified("Control."), None);
    }

    #[test]
    fn test_identity_incomplete() {
        assert!(PropertyIdentity::new(TypeRef::new("", ""), "Width").is_incomplete());
        assert!(PropertyIdentity::new(button(), "").is_incomplete());
        assert!(!PropertyIdentity::new(button(), "Width").is_incomplete());
    }

    // ==================== Attribute usage tests ====================

    #[test]
    fn test_attribute_usage_classify() {
        assert_eq!(AttributeUsage::classify("xml:lang", "Language"), AttributeUsage::XmlLang);
        assert_eq!(AttributeUsage::classify("Name", "Name"), AttributeUsage::RuntimeName);
        assert_eq!(
            AttributeUsage::classify("FrameworkElement.Name", "Name"),
            AttributeUsage::RuntimeName
        );
        assert_eq!(AttributeUsage::classify("Language", "Language"), AttributeUsage::Default);
        assert_eq!(AttributeUsage::classify("Width", "Width"), AttributeUsage::Default);
    }

    // ==================== NodeKind tests ====================

    #[test]
    fn test_matching_end_pairs() {
        assert_eq!(NodeKind::ElementStart.matching_end(), Some(NodeKind::ElementEnd));
        assert_eq!(
            NodeKind::PropertyIDictionaryStart.matching_end(),
            Some(NodeKind::PropertyIDictionaryEnd)
        );
        assert_eq!(NodeKind::Property.matching_end(), None);
        assert!(NodeKind::UnknownTagStart.is_scope_start());
        assert!(NodeKind::UnknownTagEnd.is_scope_end());
    }

    #[test]
    fn test_attribute_classification() {
        assert!(NodeKind::Property.is_attribute());
        assert!(NodeKind::XmlnsProperty.is_attribute());
        assert!(!NodeKind::EndAttributes.is_attribute());
        assert!(!NodeKind::Text.is_attribute());
        assert!(!NodeKind::EndAttributes.is_flush_point());
        assert!(NodeKind::ElementEnd.is_flush_point());
        assert!(!NodeKind::DefAttribute.is_flush_point());
    }

    // ==================== MarkupNode tests ====================

    #[test]
    fn test_rebased_node() {
        let node = MarkupNode::ElementStart(ElementNode::new(Position::synthetic(1), button()));
        let moved = node.rebased(3);
        assert_eq!(moved.depth(), 4);
        assert_eq!(moved.kind(), NodeKind::ElementStart);
    }

    #[test]
    fn test_converter_identity_prefers_value_side() {
        let setter = TypeRef::new("PresentationFramework", "System.Windows.Setter");
        let mut node = PropertyNode::new(
            Position::new(1, 1, 2),
            PropertyIdentity::new(setter, "Value"),
            "Red",
        );
        assert_eq!(node.converter_identity().name, "Value");
        node.value_side = Some(PropertyIdentity::new(button(), "Background"));
        assert_eq!(node.converter_identity().name, "Background");
    }

    #[test]
    fn test_parse_mode_directive() {
        assert_eq!(ParseMode::from_directive("Async"), Some(ParseMode::Asynchronous));
        assert_eq!(ParseMode::from_directive(" Sync "), Some(ParseMode::Synchronous));
        assert_eq!(ParseMode::from_directive("Later"), None);
    }
}
