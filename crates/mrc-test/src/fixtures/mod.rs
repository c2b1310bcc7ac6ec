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

//! Canonical node streams and collaborators for compiler tests.
//!
//! - **types**: the presentation-framework [`TypeTable`](mrc_core::TypeTable)
//! - **builders**: [`NodeStreamBuilder`](builders::NodeStreamBuilder), a
//!   tokenizer stand-in
//! - **extensions**: a fake markup-extension expander
//! - canned documents exercising styles, triggers and templates

pub mod builders;
mod extensions;
mod types;

pub use extensions::MarkupExtensions;
pub use types::presentation_types;

use builders::NodeStreamBuilder;
use mrc_core::{MarkupNode, TypeTable};

/// `<Button Width="75" Content="OK"/>`.
pub fn plain_button(types: &TypeTable) -> Vec<MarkupNode> {
    NodeStreamBuilder::new(types)
        .document_start()
        .element("Button")
        .property("Width", "75")
        .property("Content", "OK")
        .end_attributes()
        .end_element()
        .document_end()
        .build()
}

/// A style with one setter whose `Property` and `Value` attributes come in
/// the requested order.
///
/// ```xml
/// <Style TargetType="Button">
///   <Style.Setters>
///     <Setter Property="Background" Value="Red"/>
///   </Style.Setters>
/// </Style>
/// ```
pub fn setter_style(types: &TypeTable, property_first: bool) -> Vec<MarkupNode> {
    let builder = NodeStreamBuilder::new(types)
        .document_start()
        .element("Style")
        .property("TargetType", "Button")
        .end_attributes()
        .list("Setters")
        .element("Setter");
    let builder = if property_first {
        builder
            .property("Property", "Background")
            .property("Value", "Red")
    } else {
        builder
            .property("Value", "Red")
            .property("Property", "Background")
    };
    builder
        .end_attributes()
        .end_element()
        .end_list()
        .end_element()
        .document_end()
        .build()
}

/// A style with a property trigger holding one setter.
///
/// ```xml
/// <Style TargetType="Button">
///   <Style.Triggers>
///     <Trigger Property="IsMouseOver" Value="True">
///       <Setter Property="Foreground" Value="White"/>
///     </Trigger>
///   </Style.Triggers>
/// </Style>
/// ```
pub fn trigger_style(types: &TypeTable) -> Vec<MarkupNode> {
    NodeStreamBuilder::new(types)
        .document_start()
        .element("Style")
        .property("TargetType", "Button")
        .end_attributes()
        .list("Triggers")
        .element("Trigger")
        .property("Property", "IsMouseOver")
        .property("Value", "True")
        .end_attributes()
        .element("Setter")
        .property("Value", "White")
        .property("Property", "Foreground")
        .end_attributes()
        .end_element()
        .end_element()
        .end_list()
        .end_element()
        .document_end()
        .build()
}

/// A control template with a visual tree and an event trigger.
///
/// ```xml
/// <ControlTemplate TargetType="Button">
///   <Border Background="Blue">Caption</Border>
///   <ControlTemplate.Triggers>
///     <EventTrigger RoutedEvent="Button.Click">
///       <BeginStoryboard/>
///     </EventTrigger>
///   </ControlTemplate.Triggers>
/// </ControlTemplate>
/// ```
pub fn event_trigger_template(types: &TypeTable) -> Vec<MarkupNode> {
    NodeStreamBuilder::new(types)
        .document_start()
        .element("ControlTemplate")
        .property("TargetType", "Button")
        .end_attributes()
        .element("Border")
        .property("Background", "Blue")
        .end_attributes()
        .text("Caption")
        .end_element()
        .list("Triggers")
        .element("EventTrigger")
        .property("RoutedEvent", "Button.Click")
        .end_attributes()
        .element("BeginStoryboard")
        .end_element()
        .end_element()
        .end_list()
        .end_element()
        .document_end()
        .build()
}
