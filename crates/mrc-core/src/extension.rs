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

//! Markup extension expansion.
//!
//! Attribute values wrapped in braces (`{StaticResource Accent}`) are markup
//! extensions. The compiler itself does not understand extension syntax; it
//! asks an [`ExtensionExpander`] to turn the raw text into either a compact
//! extension property or a full node subtree.

use crate::error::CompileResult;
use crate::node::{MarkupNode, TypeRef};

/// Result of expanding an extension-valued attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Extension with a single positional argument.
    Simple { extension: TypeRef, argument: String },
    /// Extension that expands into a complex-property subtree.
    ///
    /// Node depths are relative: the outermost nodes sit at depth `0`.
    Complex(Vec<MarkupNode>),
}

/// Expands extension-valued attribute text.
pub trait ExtensionExpander {
    /// Try to expand `raw`, assigned to `property` on `owner`.
    ///
    /// `Ok(None)` means the text is not an extension this expander knows, in
    /// which case the value is kept as a literal.
    fn try_expand(
        &mut self,
        owner: &TypeRef,
        property: &str,
        raw: &str,
    ) -> CompileResult<Option<Expansion>>;
}

/// Expander that recognizes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtensions;

impl ExtensionExpander for NoExtensions {
    fn try_expand(
        &mut self,
        _owner: &TypeRef,
        _property: &str,
        _raw: &str,
    ) -> CompileResult<Option<Expansion>> {
        Ok(None)
    }
}

/// Escape prefix that marks a brace-leading literal (`{}{not an extension}`).
pub const LITERAL_ESCAPE: &str = "{}";

/// Whether attribute text is written in extension syntax.
pub fn looks_like_extension(value: &str) -> bool {
    let value = value.trim_start();
    value.starts_with('{') && !value.starts_with(LITERAL_ESCAPE)
}

/// Strip the literal escape prefix, if present.
pub fn unescape_literal(value: &str) -> &str {
    value.strip_prefix(LITERAL_ESCAPE).unwrap_or(value)
}

/// Split `{Name argument}` into its extension name and argument text.
pub fn split_extension(value: &str) -> Option<(&str, &str)> {
    let inner = value.trim().strip_prefix('{')?.strip_suffix('}')?.trim();
    if inner.is_empty() {
        return None;
    }
    match inner.find(char::is_whitespace) {
        Some(idx) => Some((&inner[..idx], inner[idx..].trim())),
        None => Some((inner, "")),
    }
}

/// Extract the type name from a type-reference value.
///
/// Accepts `{x:Type Button}`, `{Type Button}`, `{x:Type TypeName=Button}` and
/// the bare `TypeName=Button` argument form.
pub fn parse_type_extension(value: &str) -> Option<&str> {
    let value = value.trim();
    let argument = if looks_like_extension(value) {
        let (name, argument) = split_extension(value)?;
        let local = name.rsplit(':').next().unwrap_or(name);
        if local != "Type" && local != "TypeExtension" {
            return None;
        }
        argument
    } else {
        value
    };
    let argument = argument
        .strip_prefix("TypeName")
        .and_then(|rest| rest.trim_start().strip_prefix('='))
        .map(str::trim)
        .unwrap_or(argument);
    if argument.is_empty() || argument.contains(char::is_whitespace) {
        None
    } else {
        Some(argument)
    }
}
