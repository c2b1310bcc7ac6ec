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

//! Compiler configuration.

use crate::style::StyleVocabulary;
use mrc_core::Limits;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a [`Compiler`](crate::Compiler).
///
/// # Examples
///
/// ```rust
/// use mrc_stream::CompilerConfig;
/// use std::time::Duration;
///
/// let config = CompilerConfig {
///     timeout: Some(Duration::from_secs(5)),
///     max_records_per_slice: 250,
///     ..Default::default()
/// };
/// assert_eq!(config.slice_budget, Duration::from_millis(200));
/// ```
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Wall-clock budget of one cooperative slice.
    ///
    /// A slice yields once this much time has passed since it started. The
    /// check runs between nodes, so a slice may overrun by one node.
    ///
    /// Default: 200ms
    pub slice_budget: Duration,

    /// Maximum records written by one cooperative slice.
    ///
    /// Default: 1000
    pub max_records_per_slice: usize,

    /// Overall limit for the whole compilation.
    ///
    /// Checked at slice boundaries and every 100 nodes of a
    /// [`run`](crate::Compiler::run). `None` disables the check.
    ///
    /// Default: None (no timeout)
    pub timeout: Option<Duration>,

    /// Resource limits.
    pub limits: Limits,

    /// Element names that open style and template blocks.
    pub vocabulary: StyleVocabulary,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            slice_budget: Duration::from_millis(200),
            max_records_per_slice: 1000,
            timeout: None,
            limits: Limits::default(),
            vocabulary: StyleVocabulary::default(),
        }
    }
}

/// Shared cancellation request.
///
/// Clones observe the same flag; the compiler polls it at slice boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Default config tests ====================

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert_eq!(config.slice_budget, Duration::from_millis(200));
        assert_eq!(config.max_records_per_slice, 1000);
        assert_eq!(config.timeout, None);
        assert_eq!(config.limits, Limits::default());
    }

    // ==================== CancelFlag tests ====================

    #[test]
    fn test_cancel_flag_shared_between_clones() {
        let flag = CancelFlag::new();
        let observer = flag.clone();
        assert!(!observer.is_cancelled());
        flag.cancel();
        assert!(observer.is_cancelled());
    }
}
