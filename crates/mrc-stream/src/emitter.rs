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

//! Base-grammar record emission.
//!
//! The [`Emitter`] is what every handler ultimately forwards to. It checks
//! that a node is well formed, assigns the sink ids the node needs, picks the
//! converter for property values and hands the record to the sink.

use crate::compiler::CompileStats;
use mrc_core::{
    CompileError, CompileResult, IdKey, MarkupNode, PropertyIdentity, Record, RecordSink,
    ResolutionCache, TypeRef, TypeResolver,
};

/// Forwarding context passed to every [`NodeHandler`](crate::NodeHandler) call.
pub struct Emitter<'a> {
    sink: &'a mut dyn RecordSink,
    resolver: &'a dyn TypeResolver,
    cache: &'a mut ResolutionCache,
    stats: &'a mut CompileStats,
    detach: bool,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(
        sink: &'a mut dyn RecordSink,
        resolver: &'a dyn TypeResolver,
        cache: &'a mut ResolutionCache,
        stats: &'a mut CompileStats,
    ) -> Self {
        Self {
            sink,
            resolver,
            cache,
            stats,
            detach: false,
        }
    }

    /// Forward a node to the sink.
    ///
    /// Unknown tags and attributes have no base-grammar meaning and fail as
    /// unresolvable.
    pub fn emit(&mut self, node: MarkupNode) -> CompileResult<()> {
        match &node {
            MarkupNode::UnknownTagStart(tag) => {
                return Err(CompileError::unresolvable(
                    format!("tag '{}'", tag.name),
                    namespace_context(&tag.xml_namespace),
                ))
            }
            MarkupNode::UnknownAttribute(attr) => {
                return Err(CompileError::unresolvable(
                    format!("attribute '{}'", attr.name),
                    namespace_context(&attr.xml_namespace),
                ))
            }
            MarkupNode::UnknownTagEnd(_) => {
                return Err(CompileError::unresolvable("end of unknown tag", None))
            }
            _ => {}
        }

        let type_id = match node.type_ref() {
            Some(ty) if ty.is_empty() => {
                return Err(CompileError::protocol(format!(
                    "{} node without a type name",
                    node.kind()
                )))
            }
            Some(ty) => Some(self.sink.assign_id(IdKey::Type(ty))?),
            None => None,
        };

        let member_id = match node.property() {
            Some(prop) if prop.is_incomplete() => {
                return Err(CompileError::protocol(format!(
                    "{} node without owner type or property name",
                    node.kind()
                )))
            }
            Some(prop) => Some(self.sink.assign_id(IdKey::Member {
                owner: &prop.owner,
                name: &prop.name,
            })?),
            None => None,
        };

        let converter = match &node {
            MarkupNode::Property(prop) => Some(self.converter_for(prop.converter_identity())?),
            MarkupNode::Text(text) => text.converter.clone(),
            _ => None,
        };

        self.sink.write(Record {
            node: &node,
            type_id,
            member_id,
            converter: converter.as_ref(),
        })?;
        self.stats.records_written += 1;
        Ok(())
    }

    /// Resolve a type by full or local name.
    pub fn resolve_type(&self, name: &str) -> Option<TypeRef> {
        self.resolver.resolve_type(name)
    }

    /// Resolve a property name, qualified or relative to `fallback_owner`.
    pub fn resolve_property(
        &self,
        name: &str,
        fallback_owner: Option<&TypeRef>,
    ) -> Option<PropertyIdentity> {
        self.resolver.resolve_property(name, fallback_owner)
    }

    /// Type whose converter reads values of `prop`.
    pub fn converter_for(&mut self, prop: &PropertyIdentity) -> CompileResult<TypeRef> {
        if prop.is_incomplete() {
            return Err(CompileError::protocol(
                "property identity without owner type or name",
            ));
        }
        let member = match prop.member {
            Some(handle) => Some(handle),
            None => self.resolver.resolve_member(&prop.owner, &prop.name),
        };
        member
            .and_then(|handle| self.cache.value_type(self.resolver, handle))
            .ok_or_else(|| {
                CompileError::unresolvable(
                    format!("property '{}'", prop.qualified_name()),
                    Some(format!("on {}", prop.owner)),
                )
            })
    }

    /// Ask the dispatcher to pop the current interpreter after this node.
    pub fn request_detach(&mut self) {
        self.detach = true;
    }

    pub(crate) fn detach_requested(&self) -> bool {
        self.detach
    }
}

fn namespace_context(namespace: &str) -> Option<String> {
    if namespace.is_empty() {
        None
    } else {
        Some(format!("namespace '{}'", namespace))
    }
}
