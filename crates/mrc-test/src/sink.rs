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

//! In-memory record sink.

use mrc_core::{IdKey, MarkupNode, NodeKind, Record, RecordSink, SinkError, TypeRef};
use std::collections::HashMap;

/// A record as captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNode {
    pub node: MarkupNode,
    pub type_id: Option<u16>,
    pub member_id: Option<u16>,
    pub converter: Option<TypeRef>,
}

impl RecordedNode {
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }
}

/// Sink that keeps every record in memory.
///
/// # Examples
///
/// ```
/// use mrc_core::{IdKey, RecordSink, TypeRef};
/// use mrc_test::RecordingSink;
///
/// let mut sink = RecordingSink::new();
/// let button = TypeRef::new("PresentationFramework", "System.Windows.Controls.Button");
/// let first = sink.assign_id(IdKey::Type(&button)).unwrap();
/// let again = sink.assign_id(IdKey::Type(&button)).unwrap();
/// assert_eq!(first, again);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub records: Vec<RecordedNode>,
    pub ids: HashMap<String, u16>,
    pub close_count: usize,
    fail_on: Option<NodeKind>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose `write` fails for every record of `kind`.
    pub fn failing_on(kind: NodeKind) -> Self {
        Self {
            fail_on: Some(kind),
            ..Self::default()
        }
    }

    /// Kinds of all recorded nodes, in order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.records.iter().map(RecordedNode::kind).collect()
    }

    /// Recorded `Property` nodes, in order.
    pub fn properties(&self) -> Vec<&RecordedNode> {
        self.records
            .iter()
            .filter(|r| r.kind() == NodeKind::Property)
            .collect()
    }

    /// First recorded `Property` node with the given attribute name.
    pub fn property(&self, name: &str) -> Option<&RecordedNode> {
        self.records.iter().find(|r| match &r.node {
            MarkupNode::Property(p) => p.attribute.name == name,
            _ => false,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.close_count > 0
    }
}

fn id_key(key: IdKey<'_>) -> String {
    match key {
        IdKey::Type(ty) => format!("type:{}", ty.name),
        IdKey::Member { owner, name } => format!("member:{}.{}", owner.name, name),
    }
}

impl RecordSink for RecordingSink {
    fn write(&mut self, record: Record<'_>) -> Result<(), SinkError> {
        if self.is_closed() {
            return Err(SinkError::new("write after close"));
        }
        if self.fail_on == Some(record.node.kind()) {
            return Err(SinkError::new(format!(
                "injected failure on {}",
                record.node.kind()
            )));
        }
        self.records.push(RecordedNode {
            node: record.node.clone(),
            type_id: record.type_id,
            member_id: record.member_id,
            converter: record.converter.cloned(),
        });
        Ok(())
    }

    fn assign_id(&mut self, key: IdKey<'_>) -> Result<u16, SinkError> {
        let next = u16::try_from(self.ids.len()).map_err(|_| SinkError::new("id space exhausted"))?;
        Ok(*self.ids.entry(id_key(key)).or_insert(next))
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.close_count += 1;
        Ok(())
    }
}
