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

//! Resource limits for markup compilation.

/// Configurable limits for compiler safety.
///
/// These limits bound the resources a single compilation may consume when the
/// node stream comes from untrusted markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum structural nesting depth (default: 256).
    pub max_depth: usize,
    /// Maximum number of nodes held in the extension replay buffer
    /// (default: 10k).
    pub max_buffered_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_buffered_nodes: 10_000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_buffered_nodes: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Default limits tests ====================

    #[test]
    fn test_default_max_depth() {
        assert_eq!(Limits::default().max_depth, 256);
    }

    #[test]
    fn test_default_max_buffered_nodes() {
        assert_eq!(Limits::default().max_buffered_nodes, 10_000);
    }

    // ==================== Unlimited limits tests ====================

    #[test]
    fn test_unlimited() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_depth, usize::MAX);
        assert_eq!(limits.max_buffered_nodes, usize::MAX);
    }

    // ==================== Custom limits tests ====================

    #[test]
    fn test_custom_limits() {
        let limits = Limits {
            max_depth: 8,
            ..Limits::default()
        };
        assert_eq!(limits.max_depth, 8);
        assert_eq!(limits.max_buffered_nodes, 10_000);
    }
}
