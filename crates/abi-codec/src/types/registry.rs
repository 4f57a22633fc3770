// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-indexed store of type descriptors.
//!
//! Descriptors live in an arena and reference each other by [`TypeId`], so
//! recursive schema types (a struct holding an array of itself) need no
//! reference cycles. The registry is mutated only while a schema loads;
//! afterwards it is read-only and shared.

use crate::error::{AbiError, Result};
use crate::types::{
    BuiltinKind, FieldDescriptor, StructDescriptor, TypeDescriptor, TypeId, TypeKind,
};
use std::borrow::Cow;
use std::collections::HashMap;

/// Registry of builtin and schema-declared types.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<TypeDescriptor>,
    names: HashMap<String, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TypeRegistry {
    /// Create a registry holding every builtin plus `extended_asset`.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            types: Vec::with_capacity(64),
            names: HashMap::with_capacity(64),
        };
        for kind in BuiltinKind::ALL {
            registry.push(TypeDescriptor::builtin(kind));
        }

        let asset = registry.builtin_id(BuiltinKind::Asset);
        let name = registry.builtin_id(BuiltinKind::Name);
        registry.push(TypeDescriptor::new(
            "extended_asset",
            TypeKind::Struct(StructDescriptor::flat(vec![
                FieldDescriptor::new("quantity", asset),
                FieldDescriptor::new("contract", name),
            ])),
        ));
        registry
    }

    fn push(&mut self, desc: TypeDescriptor) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.names.insert(desc.name.clone(), id);
        self.types.push(desc);
        id
    }

    /// Id of a builtin. Builtins are registered first, in declaration order.
    pub fn builtin_id(&self, kind: BuiltinKind) -> TypeId {
        TypeId(kind as u32)
    }

    /// Register a new named type. Fails if the name is already taken.
    pub(crate) fn insert(&mut self, desc: TypeDescriptor) -> Result<TypeId> {
        if self.names.contains_key(&desc.name) {
            return Err(AbiError::Schema(format!("redefined type: {}", desc.name)));
        }
        Ok(self.push(desc))
    }

    /// Make `name` refer to an existing type.
    pub(crate) fn alias(&mut self, name: &str, target: TypeId) -> Result<()> {
        if self.names.contains_key(name) {
            return Err(AbiError::Schema(format!("redefined type: {}", name)));
        }
        self.names.insert(name.to_string(), target);
        Ok(())
    }

    /// Replace the kind of a placeholder registered during loading.
    pub(crate) fn set_kind(&mut self, id: TypeId, kind: TypeKind) {
        self.types[id.index()].kind = kind;
    }

    /// Get a descriptor by id.
    pub fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.index()]
    }

    /// Look up a registered name (aliases and cached `T[]`/`T?` included).
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    /// Resolve a type name without mutating the registry.
    ///
    /// Registered names borrow their stored kind; a `T[]`/`T?` name that no
    /// schema field referenced is composed on the fly.
    pub fn resolve(&self, name: &str) -> Result<Cow<'_, TypeKind>> {
        if let Some(id) = self.lookup(name) {
            return Ok(Cow::Borrowed(&self.get(id).kind));
        }
        let (base, wrap): (&str, fn(TypeId) -> TypeKind) =
            if let Some(base) = name.strip_suffix("[]") {
                (base, TypeKind::Array)
            } else if let Some(base) = name.strip_suffix('?') {
                (base, TypeKind::Optional)
            } else {
                return Err(AbiError::Schema(format!("unknown type: {}", name)));
            };
        let base_id = self
            .lookup(base)
            .ok_or_else(|| AbiError::Schema(format!("unknown type: {}", base)))?;
        if self.get(base_id).is_wrapper() {
            return Err(AbiError::Schema(format!("invalid nesting: {}", name)));
        }
        Ok(Cow::Owned(wrap(base_id)))
    }

    /// Number of stored descriptors.
    pub(crate) fn len(&self) -> usize {
        self.types.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(registry.len(), BuiltinKind::ALL.len() + 1);
        for kind in BuiltinKind::ALL {
            let id = registry.lookup(kind.name()).unwrap();
            assert_eq!(id, registry.builtin_id(kind));
            assert_eq!(registry.get(id).kind, TypeKind::Builtin(kind));
        }
    }

    #[test]
    fn test_extended_asset_is_struct() {
        let registry = TypeRegistry::with_builtins();
        let id = registry.lookup("extended_asset").unwrap();
        let s = registry.get(id).as_struct().unwrap();
        let names: Vec<_> = s.all_fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["quantity", "contract"]);
    }

    #[test]
    fn test_redefinition_rejected() {
        let mut registry = TypeRegistry::with_builtins();
        let err = registry
            .insert(TypeDescriptor::new("name", TypeKind::Unresolved))
            .unwrap_err();
        assert!(err.to_string().contains("redefined type"));
        assert!(registry.alias("uint8", TypeId(0)).is_err());
    }

    #[test]
    fn test_resolve_derived() {
        let registry = TypeRegistry::with_builtins();
        let asset = registry.builtin_id(BuiltinKind::Asset);
        assert_eq!(
            registry.resolve("asset[]").unwrap().into_owned(),
            TypeKind::Array(asset)
        );
        assert_eq!(
            registry.resolve("asset?").unwrap().into_owned(),
            TypeKind::Optional(asset)
        );
        assert!(registry.resolve("nope").is_err());
        assert!(registry.resolve("nope[]").is_err());
    }

    #[test]
    fn test_alias_lookup() {
        let mut registry = TypeRegistry::with_builtins();
        let name = registry.builtin_id(BuiltinKind::Name);
        registry.alias("account_name", name).unwrap();
        assert_eq!(registry.lookup("account_name"), Some(name));
    }
}
