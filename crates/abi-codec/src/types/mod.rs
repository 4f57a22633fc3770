// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type descriptors and the registry that indexes them by name.

mod registry;
mod type_descriptor;

pub use registry::TypeRegistry;
pub use type_descriptor::{
    BuiltinKind, FieldDescriptor, StructDescriptor, TypeDescriptor, TypeId, TypeKind,
    VariantDescriptor, VariantMember,
};
