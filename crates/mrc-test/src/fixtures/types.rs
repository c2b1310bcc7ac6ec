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

//! Presentation-framework type universe.

use mrc_core::TypeTable;

const PRESENTATION_TYPES: &str = include_str!("presentation.json");

/// A small presentation-framework type table: controls, styles, triggers,
/// templates, brushes and the markup extensions the fixtures use.
pub fn presentation_types() -> TypeTable {
    serde_json::from_str(PRESENTATION_TYPES)
        .unwrap_or_else(|err| panic!("presentation.json is malformed: {}", err))
}
