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

//! Programmatic writer for the MRC markup record compiler.
//!
//! [`MarkupWriter`] is the alternative to feeding tokenized markup into a
//! [`Compiler`](mrc_stream::Compiler): documents are built call by call and
//! every node the writer produces goes through the same dispatcher, so the
//! records are identical to those of the equivalent markup.
//!
//! The writer enforces the structural protocol itself:
//!
//! - `start_document` comes first and only once
//! - every `end_*` call must close the innermost open scope of the same kind
//! - attributes are only written on elements, before any of their children
//! - an element gets an `EndAttributes` record before its first attribute,
//!   and never if it has none
//!
//! # Extensions
//!
//! Property values written in extension syntax (`{StaticResource Accent}`)
//! are offered to an [`ExtensionExpander`](mrc_core::ExtensionExpander)
//! installed with [`MarkupWriter::with_extensions`]. A `{}` prefix escapes a
//! literal brace:
//!
//! ```text
//! Text="{}{not an extension}"   ->  Property Text = "{not an extension}"
//! ```

mod scope;
mod writer;

pub use scope::{ScopeEntry, ScopeStack};
pub use writer::{MarkupWriter, WriterConfig};
