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

//! Node model and shared interfaces for the markup record compiler.
//!
//! This crate defines the vocabulary every other MRC crate speaks:
//!
//! - [`MarkupNode`] and its payloads: the flat, position-tagged node stream
//!   produced by a markup tokenizer or the programmatic writer
//! - [`CompileError`]: the error taxonomy shared by the compiler and writer
//! - [`RecordSink`]: where compiled records go
//! - [`TypeResolver`]: how names become types and members, with the
//!   [`TypeTable`] and [`DynamicResolver`] adapters
//! - [`ExtensionExpander`]: how `{...}` attribute values are expanded
//! - [`CollectionResolver`]: how collection properties are located on a host
//!
//! Enable the `serde` feature to load a [`TypeTable`] from JSON or any other
//! serde format.

pub mod collection;
mod error;
pub mod extension;
mod limits;
pub mod node;
mod resolve;
mod sink;

pub use collection::{AccessMechanism, CollectionHost, CollectionResolver, ResolvedCollection};
pub use error::{CompileError, CompileResult, ErrorCategory, SinkError};
pub use extension::{ExtensionExpander, Expansion, NoExtensions};
pub use limits::Limits;
pub use node::{
    AttributeUsage, ElementNode, MarkupNode, MemberHandle, NodeKind, ParseMode, Position,
    PropertyIdentity, ScopeKind, TypeRef,
};
pub use resolve::{
    DynamicResolver, MemberEntry, MemberInfo, ResolutionCache, TypeEntry, TypeResolver, TypeTable,
};
pub use sink::{IdKey, Record, RecordSink};
