// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Builds a [`TypeRegistry`] from a schema document.
//!
//! Declaration order in the document doesn't matter:
//! 1. every struct and variant name is registered as a placeholder;
//! 2. field, member and alias type names are resolved against the registry,
//!    registering `T[]`/`T?` derivations as they are first referenced;
//! 3. struct bases are flattened into `all_fields` and types that contain
//!    themselves without an array/optional/variant in between are rejected.

use crate::config::CodecConfig;
use crate::error::{AbiError, Result};
use crate::schema::AbiDef;
use crate::types::{
    FieldDescriptor, StructDescriptor, TypeDescriptor, TypeId, TypeKind, TypeRegistry,
    VariantDescriptor, VariantMember,
};
use std::collections::HashMap;

const EXTENSION_SUFFIX: char = '$';

pub(crate) fn build_registry(abi: &AbiDef, config: &CodecConfig) -> Result<TypeRegistry> {
    let mut loader = Loader {
        registry: TypeRegistry::with_builtins(),
        aliases: HashMap::new(),
        max_depth: config.max_resolve_depth,
    };

    // Pass 1: placeholders and pending aliases.
    let mut struct_ids = Vec::with_capacity(abi.structs.len());
    for def in &abi.structs {
        check_declared_name(&def.name)?;
        struct_ids.push(
            loader
                .registry
                .insert(TypeDescriptor::new(&def.name, TypeKind::Unresolved))?,
        );
    }
    let mut variant_ids = Vec::with_capacity(abi.variants.len());
    for def in &abi.variants {
        check_declared_name(&def.name)?;
        variant_ids.push(
            loader
                .registry
                .insert(TypeDescriptor::new(&def.name, TypeKind::Unresolved))?,
        );
    }
    for def in &abi.types {
        check_declared_name(&def.new_type_name)?;
        if loader.registry.lookup(&def.new_type_name).is_some()
            || loader
                .aliases
                .insert(def.new_type_name.as_str(), def.type_name.as_str())
                .is_some()
        {
            return Err(AbiError::Schema(format!(
                "redefined type: {}",
                def.new_type_name
            )));
        }
    }

    // Pass 2: resolve names.
    for def in &abi.types {
        loader.resolve(&def.new_type_name, 0)?;
    }
    for (def, &id) in abi.structs.iter().zip(&struct_ids) {
        let base = if def.base.is_empty() {
            None
        } else {
            Some(loader.resolve(&def.base, 0)?)
        };
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            let (type_name, is_extension) = match field.type_name.strip_suffix(EXTENSION_SUFFIX) {
                Some(inner) => (inner, true),
                None => (field.type_name.as_str(), false),
            };
            let type_id = loader.resolve(type_name, 0)?;
            let mut desc = FieldDescriptor::new(&field.name, type_id);
            desc.is_extension = is_extension;
            fields.push(desc);
        }
        loader.registry.set_kind(
            id,
            TypeKind::Struct(StructDescriptor {
                base,
                fields,
                all_fields: Vec::new(),
            }),
        );
    }
    for (def, &id) in abi.variants.iter().zip(&variant_ids) {
        let mut members = Vec::with_capacity(def.types.len());
        for type_name in &def.types {
            members.push(VariantMember {
                name: type_name.clone(),
                type_id: loader.resolve(type_name, 0)?,
            });
        }
        loader
            .registry
            .set_kind(id, TypeKind::Variant(VariantDescriptor { members }));
    }

    // Types named by actions, tables and results must exist too.
    for action in &abi.actions {
        loader.resolve(&action.type_name, 0)?;
    }
    for table in abi.tables.iter().filter(|t| !t.type_name.is_empty()) {
        loader.resolve(&table.type_name, 0)?;
    }
    for result in &abi.action_results {
        loader.resolve(&result.result_type, 0)?;
    }

    // Pass 3: flatten bases, then reject self-containment.
    for &id in &struct_ids {
        let all_fields = loader.flatten(id)?;
        if let TypeKind::Struct(mut desc) = loader.registry.get(id).kind.clone() {
            desc.all_fields = all_fields;
            loader.registry.set_kind(id, TypeKind::Struct(desc));
        }
    }
    check_containment(&loader.registry, &struct_ids)?;

    log::trace!(
        "[schema] resolved {} structs, {} variants, {} aliases",
        struct_ids.len(),
        variant_ids.len(),
        abi.types.len()
    );
    Ok(loader.registry)
}

fn check_declared_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AbiError::Schema("empty type name".into()));
    }
    if name.ends_with("[]") || name.ends_with('?') || name.contains(EXTENSION_SUFFIX) {
        return Err(AbiError::Schema(format!("invalid type name: {}", name)));
    }
    Ok(())
}

struct Loader<'a> {
    registry: TypeRegistry,
    aliases: HashMap<&'a str, &'a str>,
    max_depth: usize,
}

impl Loader<'_> {
    fn resolve(&mut self, name: &str, depth: usize) -> Result<TypeId> {
        if depth > self.max_depth {
            return Err(AbiError::Schema(format!(
                "recursion limit reached resolving {}",
                name
            )));
        }
        if let Some(id) = self.registry.lookup(name) {
            return Ok(id);
        }
        if let Some(&target) = self.aliases.get(name) {
            let id = self.resolve(target, depth + 1)?;
            self.registry.alias(name, id)?;
            log::trace!("[schema] alias {} -> {}", name, target);
            return Ok(id);
        }
        if name.contains(EXTENSION_SUFFIX) {
            return Err(AbiError::Schema(format!(
                "extension type only allowed on struct fields: {}",
                name
            )));
        }
        let (base, kind): (&str, fn(TypeId) -> TypeKind) =
            if let Some(base) = name.strip_suffix("[]") {
                (base, TypeKind::Array)
            } else if let Some(base) = name.strip_suffix('?') {
                (base, TypeKind::Optional)
            } else {
                return Err(AbiError::Schema(format!("unknown type: {}", name)));
            };
        let base_id = self.resolve(base, depth + 1)?;
        if self.registry.get(base_id).is_wrapper() {
            return Err(AbiError::Schema(format!("invalid nesting: {}", name)));
        }
        log::trace!("[schema] derived {}", name);
        self.registry
            .insert(TypeDescriptor::new(name, kind(base_id)))
    }

    /// Base fields (most-ancestral first) followed by own fields.
    fn flatten(&self, id: TypeId) -> Result<Vec<FieldDescriptor>> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if chain.contains(&cur) {
                return Err(AbiError::Schema(format!(
                    "circular base for struct {}",
                    self.registry.get(id).name
                )));
            }
            if chain.len() > self.max_depth {
                return Err(AbiError::Schema(format!(
                    "base chain of struct {} exceeds depth limit {}",
                    self.registry.get(id).name,
                    self.max_depth
                )));
            }
            let desc = self.registry.get(cur);
            let s = desc.as_struct().ok_or_else(|| {
                AbiError::Schema(format!("base {} is not a struct", desc.name))
            })?;
            chain.push(cur);
            current = s.base;
        }
        Ok(chain
            .iter()
            .rev()
            .filter_map(|&c| self.registry.get(c).as_struct())
            .flat_map(|s| s.fields.iter().cloned())
            .collect())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Resolving,
    Done,
}

/// Depth-first walk over direct struct-in-struct edges. Reaching a struct
/// that is still being resolved means it contains itself.
fn check_containment(registry: &TypeRegistry, roots: &[TypeId]) -> Result<()> {
    let mut marks = vec![Mark::Unvisited; registry.len()];
    let fields_of = |id: TypeId| {
        registry
            .get(id)
            .as_struct()
            .map(|s| s.all_fields.as_slice())
            .unwrap_or_default()
    };

    for &root in roots {
        if marks[root.index()] != Mark::Unvisited {
            continue;
        }
        marks[root.index()] = Mark::Resolving;
        let mut stack: Vec<(TypeId, usize)> = vec![(root, 0)];
        while let Some(&(id, next)) = stack.last() {
            let fields = fields_of(id);
            let Some(field) = fields.get(next) else {
                marks[id.index()] = Mark::Done;
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            let child = field.type_id;
            if !registry.get(child).is_struct() {
                continue;
            }
            match marks[child.index()] {
                Mark::Resolving => {
                    return Err(AbiError::Schema(format!(
                        "struct {} contains itself through field {}",
                        registry.get(child).name,
                        field.name
                    )));
                }
                Mark::Unvisited => {
                    marks[child.index()] = Mark::Resolving;
                    stack.push((child, 0));
                }
                Mark::Done => {}
            }
        }
    }
    Ok(())
}
