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

//! Fake markup-extension expander.

use mrc_core::extension::split_extension;
use mrc_core::node::{ElementNode, Marker, PropertyNode, PropertyScopeNode};
use mrc_core::{
    CompileError, CompileResult, ExtensionExpander, Expansion, MarkupNode, Position,
    PropertyIdentity, TypeRef, TypeResolver, TypeTable,
};

/// Expander understanding two extensions:
///
/// - `{StaticResource key}` expands to a simple extension record.
/// - `{Binding path}` expands to a complex-property subtree holding a
///   `Binding` element, laid out the way the programmatic writer would write
///   it longhand.
///
/// Anything else is left as a literal.
#[derive(Debug, Clone)]
pub struct MarkupExtensions {
    types: TypeTable,
    pub expansions: usize,
}

impl MarkupExtensions {
    pub fn new(types: TypeTable) -> Self {
        Self {
            types,
            expansions: 0,
        }
    }

    fn identity(&self, owner: &TypeRef, name: &str) -> PropertyIdentity {
        let identity = PropertyIdentity::new(owner.clone(), name);
        match self.types.resolve_member(owner, name) {
            Some(handle) => identity.with_member(handle),
            None => identity,
        }
    }

    fn lookup(&self, name: &str) -> CompileResult<TypeRef> {
        self.types
            .resolve_type(name)
            .ok_or_else(|| CompileError::unresolvable(format!("extension type '{}'", name), None))
    }
}

impl ExtensionExpander for MarkupExtensions {
    fn try_expand(
        &mut self,
        owner: &TypeRef,
        property: &str,
        raw: &str,
    ) -> CompileResult<Option<Expansion>> {
        let Some((name, argument)) = split_extension(raw) else {
            return Ok(None);
        };
        let expansion = match name {
            "StaticResource" => Expansion::Simple {
                extension: self.lookup("StaticResourceExtension")?,
                argument: argument.to_string(),
            },
            "Binding" => {
                let binding = self.lookup("Binding")?;
                let mut nodes = vec![
                    MarkupNode::PropertyComplexStart(PropertyScopeNode {
                        position: Position::synthetic(0),
                        property: self.identity(owner, property),
                    }),
                    MarkupNode::ElementStart(ElementNode::new(
                        Position::synthetic(1),
                        binding.clone(),
                    )),
                ];
                if !argument.is_empty() {
                    nodes.push(MarkupNode::EndAttributes(Marker::at(Position::synthetic(2))));
                    nodes.push(MarkupNode::Property(PropertyNode::new(
                        Position::synthetic(2),
                        self.identity(&binding, "Path"),
                        argument,
                    )));
                }
                nodes.push(MarkupNode::ElementEnd(Marker::at(Position::synthetic(1))));
                nodes.push(MarkupNode::PropertyComplexEnd(Marker::at(Position::synthetic(0))));
                Expansion::Complex(nodes)
            }
            _ => return Ok(None),
        };
        self.expansions += 1;
        Ok(Some(expansion))
    }
}
