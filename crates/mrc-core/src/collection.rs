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

//! Collection property resolution.
//!
//! Collection-typed properties (`Resources`, `Setters`, `Items`) are filled by
//! adding to the existing collection instance rather than by assignment. The
//! [`CollectionResolver`] locates that instance on a host object under a fixed
//! access-mechanism precedence, falls back to a default collection when the
//! property holds none, and writes a created default back exactly once.

use crate::error::{CompileError, CompileResult};
use tracing::trace;

/// How a host exposes a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMechanism {
    /// Fast-tracked resource dictionary capability.
    Resources,
    /// Styled (dependency) property accessor.
    Dependency,
    /// Attached property getter/setter pair.
    Attached,
    /// Reflection-based accessor.
    Reflection,
}

impl AccessMechanism {
    /// Mechanisms in the order they are tried.
    pub const PRECEDENCE: [AccessMechanism; 4] = [
        AccessMechanism::Resources,
        AccessMechanism::Dependency,
        AccessMechanism::Attached,
        AccessMechanism::Reflection,
    ];
}

/// Object whose collection properties can be read and written.
pub trait CollectionHost {
    /// Handle to a collection instance.
    type Collection: Clone;

    /// Whether `property` is reachable through `mechanism`.
    fn supports(&self, mechanism: AccessMechanism, property: &str) -> bool;

    /// Current value of `property` through `mechanism`.
    fn read(&self, mechanism: AccessMechanism, property: &str) -> Option<Self::Collection>;

    /// Whether `property` cannot be assigned through `mechanism`.
    fn is_read_only(&self, mechanism: AccessMechanism, property: &str) -> bool;

    /// A fresh, empty collection suitable for `property`, if one can be made.
    fn default_collection(&self, property: &str) -> Option<Self::Collection>;

    /// Assign `value` to `property` through `mechanism`.
    fn write(
        &mut self,
        mechanism: AccessMechanism,
        property: &str,
        value: Self::Collection,
    ) -> CompileResult<()>;
}

/// A collection located by [`CollectionResolver::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCollection<C> {
    pub mechanism: AccessMechanism,
    pub value: C,
    /// The value is a freshly created default awaiting write-back.
    pub created: bool,
}

/// Resolves one collection property on one host.
#[derive(Debug)]
pub struct CollectionResolver<C> {
    property: String,
    mechanism: Option<AccessMechanism>,
    pending: Option<C>,
    written: bool,
}

impl<C: Clone> CollectionResolver<C> {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            mechanism: None,
            pending: None,
            written: false,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// Mechanism chosen by the last successful [`resolve`](Self::resolve).
    pub fn mechanism(&self) -> Option<AccessMechanism> {
        self.mechanism
    }

    /// Locate the collection instance.
    ///
    /// The first mechanism the host supports for the property decides; later
    /// mechanisms are not consulted even if the chosen one yields no value.
    pub fn resolve<H>(&mut self, host: &H) -> CompileResult<ResolvedCollection<C>>
    where
        H: CollectionHost<Collection = C>,
    {
        let mechanism = AccessMechanism::PRECEDENCE
            .into_iter()
            .find(|m| host.supports(*m, &self.property))
            .ok_or_else(|| {
                CompileError::unresolvable(
                    format!("collection property '{}'", self.property),
                    Some("no access mechanism".to_string()),
                )
            })?;
        self.mechanism = Some(mechanism);

        if let Some(value) = host.read(mechanism, &self.property) {
            trace!(property = %self.property, ?mechanism, "existing collection");
            return Ok(ResolvedCollection {
                mechanism,
                value,
                created: false,
            });
        }

        let default = if host.is_read_only(mechanism, &self.property) {
            None
        } else {
            host.default_collection(&self.property)
        };
        let value = default.ok_or_else(|| CompileError::ReadOnlyCollection {
            property: self.property.clone(),
        })?;
        trace!(property = %self.property, ?mechanism, "created default collection");
        self.pending = Some(value.clone());
        Ok(ResolvedCollection {
            mechanism,
            value,
            created: true,
        })
    }

    /// Write a created default back to the host.
    ///
    /// Returns `true` if a write happened. Subsequent calls are no-ops.
    pub fn write_back<H>(&mut self, host: &mut H) -> CompileResult<bool>
    where
        H: CollectionHost<Collection = C>,
    {
        if self.written {
            return Ok(false);
        }
        let (Some(mechanism), Some(value)) = (self.mechanism, self.pending.take()) else {
            return Ok(false);
        };
        self.written = true;
        host.write(mechanism, &self.property, value)?;
        trace!(property = %self.property, ?mechanism, "wrote collection back");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Host {
        supported: Vec<AccessMechanism>,
        values: HashMap<AccessMechanism, Vec<String>>,
        read_only: bool,
        has_default: bool,
        writes: Vec<(AccessMechanism, Vec<String>)>,
    }

    impl CollectionHost for Host {
        type Collection = Vec<String>;

        fn supports(&self, mechanism: AccessMechanism, _property: &str) -> bool {
            self.supported.contains(&mechanism)
        }

        fn read(&self, mechanism: AccessMechanism, _property: &str) -> Option<Vec<String>> {
            self.values.get(&mechanism).cloned()
        }

        fn is_read_only(&self, _mechanism: AccessMechanism, _property: &str) -> bool {
            self.read_only
        }

        fn default_collection(&self, _property: &str) -> Option<Vec<String>> {
            self.has_default.then(Vec::new)
        }

        fn write(
            &mut self,
            mechanism: AccessMechanism,
            _property: &str,
            value: Vec<String>,
        ) -> CompileResult<()> {
            self.writes.push((mechanism, value));
            Ok(())
        }
    }

    // ==================== Precedence tests ====================

    #[test]
    fn test_resources_wins_over_everything() {
        let mut host = Host {
            supported: AccessMechanism::PRECEDENCE.to_vec(),
            ..Host::default()
        };
        host.values.insert(AccessMechanism::Resources, vec!["a".into()]);
        host.values.insert(AccessMechanism::Reflection, vec!["b".into()]);
        let mut resolver = CollectionResolver::new("Resources");
        let resolved = resolver.resolve(&host).unwrap();
        assert_eq!(resolved.mechanism, AccessMechanism::Resources);
        assert_eq!(resolved.value, vec!["a".to_string()]);
        assert!(!resolved.created);
    }

    #[test]
    fn test_attached_before_reflection() {
        let host = Host {
            supported: vec![AccessMechanism::Reflection, AccessMechanism::Attached],
            has_default: true,
            ..Host::default()
        };
        let mut resolver = CollectionResolver::new("Items");
        let resolved = resolver.resolve(&host).unwrap();
        assert_eq!(resolved.mechanism, AccessMechanism::Attached);
    }

    #[test]
    fn test_unsupported_property_is_unresolvable() {
        let host = Host::default();
        let mut resolver = CollectionResolver::<Vec<String>>::new("Items");
        let err = resolver.resolve(&host).unwrap_err();
        assert!(matches!(err, CompileError::Unresolvable { .. }));
    }

    // ==================== Default collection tests ====================

    #[test]
    fn test_read_only_without_value_fails() {
        let host = Host {
            supported: vec![AccessMechanism::Dependency],
            read_only: true,
            has_default: true,
            ..Host::default()
        };
        let mut resolver = CollectionResolver::new("Items");
        let err = resolver.resolve(&host).unwrap_err();
        assert_eq!(
            err,
            CompileError::ReadOnlyCollection {
                property: "Items".into()
            }
        );
    }

    #[test]
    fn test_missing_default_fails() {
        let host = Host {
            supported: vec![AccessMechanism::Dependency],
            ..Host::default()
        };
        let mut resolver = CollectionResolver::new("Items");
        assert!(resolver.resolve(&host).is_err());
    }

    #[test]
    fn test_read_only_with_existing_value_succeeds() {
        let mut host = Host {
            supported: vec![AccessMechanism::Dependency],
            read_only: true,
            ..Host::default()
        };
        host.values.insert(AccessMechanism::Dependency, vec![]);
        let mut resolver = CollectionResolver::new("Items");
        assert!(resolver.resolve(&host).is_ok());
    }

    // ==================== Write-back tests ====================

    #[test]
    fn test_write_back_runs_once_with_same_mechanism() {
        let mut host = Host {
            supported: vec![AccessMechanism::Attached, AccessMechanism::Reflection],
            has_default: true,
            ..Host::default()
        };
        let mut resolver = CollectionResolver::new("Items");
        let resolved = resolver.resolve(&host).unwrap();
        assert!(resolved.created);
        assert!(resolver.write_back(&mut host).unwrap());
        assert!(!resolver.write_back(&mut host).unwrap());
        assert_eq!(host.writes.len(), 1);
        assert_eq!(host.writes[0].0, AccessMechanism::Attached);
    }

    #[test]
    fn test_write_back_without_created_value_is_noop() {
        let mut host = Host {
            supported: vec![AccessMechanism::Dependency],
            ..Host::default()
        };
        host.values.insert(AccessMechanism::Dependency, vec!["x".into()]);
        let mut resolver = CollectionResolver::new("Items");
        resolver.resolve(&host).unwrap();
        assert!(!resolver.write_back(&mut host).unwrap());
        assert!(host.writes.is_empty());
    }
}
