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

//! Shared test fixtures and utilities for the markup record compiler.
//!
//! # Features
//!
//! - **Recording sink**: [`RecordingSink`] keeps every record, its ids and
//!   converter in memory, counts `close` calls and can inject failures
//! - **Type universe**: [`presentation_types`] loads a small
//!   presentation-framework type table from embedded JSON
//! - **Stream builder**: [`NodeStreamBuilder`](fixtures::builders::NodeStreamBuilder)
//!   produces tokenizer-shaped node streams
//! - **Extensions**: [`MarkupExtensions`] expands `{StaticResource}` and
//!   `{Binding}` the way a real extension grammar would
//!
//! # Quick Start
//!
//! ```rust
//! use mrc_test::{fixtures, presentation_types};
//!
//! let types = presentation_types();
//! let nodes = fixtures::setter_style(&types, true);
//! assert_eq!(nodes.first().map(|n| n.depth()), Some(0));
//! ```

pub mod fixtures;
mod sink;

pub use fixtures::{presentation_types, MarkupExtensions};
pub use sink::{RecordedNode, RecordingSink};
