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

//! Type and member resolution.
//!
//! The compiler resolves names through the [`TypeResolver`] trait and never
//! cares where the answers come from. Two adapters ship with the crate:
//!
//! - [`TypeTable`]: a static table of types and members, used by build-time
//!   compilation where the full type universe is known up front.
//! - [`DynamicResolver`]: closure-backed, used at runtime where resolution is
//!   delegated to whatever reflection facility the host offers.
//!
//! [`ResolutionCache`] memoizes member descriptions for one compilation.

use crate::node::{split_qualified, MemberHandle, PropertyIdentity, TypeRef};
use std::cell::RefCell;
use std::collections::HashMap;

/// Description of a resolved member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// Type that declares the member.
    pub declaring_type: TypeRef,
    /// Type of the member's value; selects the value converter.
    pub value_type: TypeRef,
}

/// Name resolution for types and their members.
pub trait TypeResolver {
    /// Resolve a type by full or local name.
    fn resolve_type(&self, name: &str) -> Option<TypeRef>;

    /// Resolve a member of `owner` (searching its base types).
    fn resolve_member(&self, owner: &TypeRef, name: &str) -> Option<MemberHandle>;

    /// Describe a previously resolved member.
    fn describe(&self, member: MemberHandle) -> Option<MemberInfo>;

    /// Resolve a property name, either qualified (`Owner.Name`) or relative to
    /// `fallback_owner`.
    fn resolve_property(
        &self,
        name: &str,
        fallback_owner: Option<&TypeRef>,
    ) -> Option<PropertyIdentity> {
        let (owner, member_name) = match split_qualified(name) {
            Some((owner, member)) => (self.resolve_type(owner)?, member),
            None => (fallback_owner?.clone(), name),
        };
        let handle = self.resolve_member(&owner, member_name)?;
        Some(PropertyIdentity::new(owner, member_name).with_member(handle))
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    fn resolve_type(&self, name: &str) -> Option<TypeRef> {
        (**self).resolve_type(name)
    }

    fn resolve_member(&self, owner: &TypeRef, name: &str) -> Option<MemberHandle> {
        (**self).resolve_member(owner, name)
    }

    fn describe(&self, member: MemberHandle) -> Option<MemberInfo> {
        (**self).describe(member)
    }
}

// =============================================================================
// TypeTable
// =============================================================================

/// A member row of a [`TypeEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberEntry {
    pub name: String,
    /// Full or local name of the member's value type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub value_type: String,
}

/// A type row of a [`TypeTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeEntry {
    pub assembly: String,
    /// Full type name.
    pub name: String,
    /// Full name of the base type, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub members: Vec<MemberEntry>,
}

impl TypeEntry {
    fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.assembly.clone(), self.name.clone())
    }
}

/// Static type universe.
///
/// Member handles issued by a table encode the declaring type's row in the
/// upper 16 bits and the member's row in the lower 16 bits.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(from = "Vec<TypeEntry>"))]
pub struct TypeTable {
    entries: Vec<TypeEntry>,
    by_full_name: HashMap<String, usize>,
    by_local_name: HashMap<String, usize>,
}

impl From<Vec<TypeEntry>> for TypeTable {
    fn from(entries: Vec<TypeEntry>) -> Self {
        let mut table = TypeTable::default();
        for entry in entries {
            table.insert(entry);
        }
        table
    }
}

impl TypeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type. A later entry with the same full name replaces the earlier.
    pub fn insert(&mut self, entry: TypeEntry) {
        if let Some(&idx) = self.by_full_name.get(&entry.name) {
            self.entries[idx] = entry;
            return;
        }
        let idx = self.entries.len();
        let local = TypeRef::new("", entry.name.clone()).local_name().to_string();
        self.by_local_name.entry(local).or_insert(idx);
        self.by_full_name.insert(entry.name.clone(), idx);
        self.entries.push(entry);
    }

    /// Number of types in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.by_full_name
            .get(name)
            .or_else(|| self.by_local_name.get(name))
            .copied()
    }

    fn encode(type_idx: usize, member_idx: usize) -> Option<MemberHandle> {
        let ty = u16::try_from(type_idx).ok()?;
        let member = u16::try_from(member_idx).ok()?;
        Some(MemberHandle((u32::from(ty) << 16) | u32::from(member)))
    }

    fn decode(handle: MemberHandle) -> (usize, usize) {
        ((handle.0 >> 16) as usize, (handle.0 & 0xFFFF) as usize)
    }
}

impl TypeResolver for TypeTable {
    fn resolve_type(&self, name: &str) -> Option<TypeRef> {
        self.index_of(name).map(|idx| self.entries[idx].type_ref())
    }

    fn resolve_member(&self, owner: &TypeRef, name: &str) -> Option<MemberHandle> {
        let mut current = self.index_of(&owner.name);
        // Base chains are finite in well-formed tables; the bound guards cycles.
        let mut hops = 0;
        while let Some(type_idx) = current {
            let entry = &self.entries[type_idx];
            if let Some(member_idx) = entry.members.iter().position(|m| m.name == name) {
                return Self::encode(type_idx, member_idx);
            }
            hops += 1;
            if hops > self.entries.len() {
                return None;
            }
            current = entry.base.as_deref().and_then(|base| self.index_of(base));
        }
        None
    }

    fn describe(&self, member: MemberHandle) -> Option<MemberInfo> {
        let (type_idx, member_idx) = Self::decode(member);
        let entry = self.entries.get(type_idx)?;
        let row = entry.members.get(member_idx)?;
        let value_type = self
            .resolve_type(&row.value_type)
            .unwrap_or_else(|| TypeRef::new("", row.value_type.clone()));
        Some(MemberInfo {
            declaring_type: entry.type_ref(),
            value_type,
        })
    }
}

// =============================================================================
// DynamicResolver
// =============================================================================

type TypeLookup = Box<dyn Fn(&str) -> Option<TypeRef>>;
type MemberLookup = Box<dyn Fn(&TypeRef, &str) -> Option<MemberInfo>>;

/// Resolver backed by host callbacks.
///
/// Member lookups are interned so that handles stay stable for the lifetime
/// of the resolver.
pub struct DynamicResolver {
    types: TypeLookup,
    members: MemberLookup,
    interned: RefCell<Vec<MemberInfo>>,
    handles: RefCell<HashMap<(TypeRef, String), MemberHandle>>,
}

impl DynamicResolver {
    /// Create a resolver from a type lookup and a member lookup.
    pub fn new<T, M>(types: T, members: M) -> Self
    where
        T: Fn(&str) -> Option<TypeRef> + 'static,
        M: Fn(&TypeRef, &str) -> Option<MemberInfo> + 'static,
    {
        Self {
            types: Box::new(types),
            members: Box::new(members),
            interned: RefCell::new(Vec::new()),
            handles: RefCell::new(HashMap::new()),
        }
    }
}

impl std::fmt::Debug for DynamicResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicResolver")
            .field("interned", &self.interned.borrow().len())
            .finish()
    }
}

impl TypeResolver for DynamicResolver {
    fn resolve_type(&self, name: &str) -> Option<TypeRef> {
        (self.types)(name)
    }

    fn resolve_member(&self, owner: &TypeRef, name: &str) -> Option<MemberHandle> {
        let key = (owner.clone(), name.to_string());
        if let Some(handle) = self.handles.borrow().get(&key) {
            return Some(*handle);
        }
        let info = (self.members)(owner, name)?;
        let mut interned = self.interned.borrow_mut();
        let handle = MemberHandle(u32::try_from(interned.len()).ok()?);
        interned.push(info);
        self.handles.borrow_mut().insert(key, handle);
        Some(handle)
    }

    fn describe(&self, member: MemberHandle) -> Option<MemberInfo> {
        self.interned.borrow().get(member.0 as usize).cloned()
    }
}

// =============================================================================
// ResolutionCache
// =============================================================================

/// Per-compilation memo of member descriptions.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    members: HashMap<MemberHandle, MemberInfo>,
    hits: u64,
    misses: u64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe `member`, consulting the resolver only on first use.
    pub fn describe(
        &mut self,
        resolver: &dyn TypeResolver,
        member: MemberHandle,
    ) -> Option<&MemberInfo> {
        if self.members.contains_key(&member) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let info = resolver.describe(member)?;
            self.members.insert(member, info);
        }
        self.members.get(&member)
    }

    /// Value type of `member`, if it can be described.
    pub fn value_type(
        &mut self,
        resolver: &dyn TypeResolver,
        member: MemberHandle,
    ) -> Option<TypeRef> {
        self.describe(resolver, member)
            .map(|info| info.value_type.clone())
    }

    /// Lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that reached the resolver.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
