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

//! Error context helpers.
//!
//! [`CompileResultExt`] annotates errors with caller context as they travel
//! up the stack, without touching the error underneath:
//!
//! ```rust
//! use mrc::{CompileError, CompileResultExt};
//!
//! fn load_theme(name: &str) -> mrc::CompileResult<()> {
//!     Err(CompileError::unresolvable("type 'Buton'", None))
//!         .with_context(|| format!("while compiling theme {}", name))
//! }
//!
//! let err = load_theme("Aero").unwrap_err();
//! assert!(err.to_string().starts_with("while compiling theme Aero: "));
//! assert!(matches!(err.root(), CompileError::Unresolvable { .. }));
//! ```

use crate::{CompileError, CompileResult, SinkError};
use std::fmt;

/// Context chaining for results carrying compiler or sink errors.
///
/// Each call wraps the error in one more [`CompileError::WithContext`]
/// layer; [`CompileError::root`] and [`CompileError::category`] see through
/// all of them. An empty context string leaves the error as it is.
pub trait CompileResultExt<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> CompileResult<T>
    where
        C: fmt::Display;

    /// Add context computed only on the error path.
    fn with_context<C, F>(self, f: F) -> CompileResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T> CompileResultExt<T> for Result<T, CompileError> {
    fn context<C>(self, context: C) -> CompileResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> CompileResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context(e, f().to_string()))
    }
}

impl<T> CompileResultExt<T> for Result<T, SinkError> {
    fn context<C>(self, context: C) -> CompileResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context(e.into(), context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> CompileResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context(e.into(), f().to_string()))
    }
}

fn add_context(error: CompileError, context: String) -> CompileError {
    if context.is_empty() {
        error
    } else {
        error.context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCategory;

    // ==================== context() tests ====================

    #[test]
    fn test_context_on_error() {
        let result: CompileResult<()> = Err(CompileError::unsupported("'TargetName' on Setter"));
        let err = result.context("in style Accent").unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Unsupported);
        assert_eq!(
            err.to_string(),
            "in style Accent: 'TargetName' on Setter is not supported at unknown position"
        );
    }

    #[test]
    fn test_context_on_ok() {
        let result: CompileResult<i32> = Ok(42);
        assert_eq!(result.context("never used").unwrap(), 42);
    }

    #[test]
    fn test_context_chaining() {
        let result: CompileResult<()> = Err(CompileError::NotStarted);
        let err = result
            .context("writing header")
            .context("building theme")
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.starts_with("building theme: writing header: "));
        assert_eq!(err.root(), &CompileError::NotStarted);
    }

    #[test]
    fn test_empty_context_is_ignored() {
        let result: CompileResult<()> = Err(CompileError::Cancelled);
        assert_eq!(result.context("").unwrap_err(), CompileError::Cancelled);
    }

    // ==================== with_context() tests ====================

    #[test]
    fn test_with_context_is_lazy() {
        let mut called = false;
        let result: CompileResult<()> = Ok(());
        result
            .with_context(|| {
                called = true;
                "expensive"
            })
            .unwrap();
        assert!(!called);
    }

    #[test]
    fn test_sink_error_conversion() {
        let result: Result<(), SinkError> = Err(SinkError::new("disk full"));
        let err = result.context("flushing records").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Sink);
        assert!(err.to_string().contains("disk full"));
    }
}
