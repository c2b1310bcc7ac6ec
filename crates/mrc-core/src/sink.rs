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

//! Record sink interface.
//!
//! The compiler never serializes records itself. Each accepted node is handed
//! to a [`RecordSink`] together with the numeric ids the sink assigned to the
//! node's type and member, and the converter type that should interpret its
//! textual value.

use crate::error::SinkError;
use crate::node::{MarkupNode, TypeRef};

/// Key for which the sink assigns a compact numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKey<'a> {
    /// A type (element, key type, value type).
    Type(&'a TypeRef),
    /// A member of a type (property or event).
    Member { owner: &'a TypeRef, name: &'a str },
}

/// One node as presented to the sink.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub node: &'a MarkupNode,
    /// Id of the type the node names, if it names one.
    pub type_id: Option<u16>,
    /// Id of the member the node assigns, if it assigns one.
    pub member_id: Option<u16>,
    /// Type whose converter reads the node's textual value.
    pub converter: Option<&'a TypeRef>,
}

/// Downstream consumer of compiled records.
///
/// Implementations must tolerate [`close`](Self::close) being the last call
/// they receive; the compiler calls it exactly once, on success or failure.
pub trait RecordSink {
    /// Accept one record.
    fn write(&mut self, record: Record<'_>) -> Result<(), SinkError>;

    /// Assign (or look up) the numeric id for a type or member.
    ///
    /// Repeated calls with the same key must return the same id.
    fn assign_id(&mut self, key: IdKey<'_>) -> Result<u16, SinkError>;

    /// Flush and release the sink.
    fn close(&mut self) -> Result<(), SinkError>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn write(&mut self, record: Record<'_>) -> Result<(), SinkError> {
        (**self).write(record)
    }

    fn assign_id(&mut self, key: IdKey<'_>) -> Result<u16, SinkError> {
        (**self).assign_id(key)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        (**self).close()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn write(&mut self, record: Record<'_>) -> Result<(), SinkError> {
        (**self).write(record)
    }

    fn assign_id(&mut self, key: IdKey<'_>) -> Result<u16, SinkError> {
        (**self).assign_id(key)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        (**self).close()
    }
}
