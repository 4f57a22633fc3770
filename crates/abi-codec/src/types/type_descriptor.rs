// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.

/// Builtin (non-composite) type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Int128,
    Uint128,
    VarUint32,
    VarInt32,
    Float32,
    Float64,
    Float128,
    TimePoint,
    TimePointSec,
    BlockTimestamp,
    Name,
    Bytes,
    String,
    Checksum160,
    Checksum256,
    Checksum512,
    PublicKey,
    PrivateKey,
    Signature,
    Symbol,
    SymbolCode,
    Asset,
}

impl BuiltinKind {
    /// Every builtin, in registration order.
    pub const ALL: [BuiltinKind; 31] = [
        Self::Bool,
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Int64,
        Self::Uint64,
        Self::Int128,
        Self::Uint128,
        Self::VarUint32,
        Self::VarInt32,
        Self::Float32,
        Self::Float64,
        Self::Float128,
        Self::TimePoint,
        Self::TimePointSec,
        Self::BlockTimestamp,
        Self::Name,
        Self::Bytes,
        Self::String,
        Self::Checksum160,
        Self::Checksum256,
        Self::Checksum512,
        Self::PublicKey,
        Self::PrivateKey,
        Self::Signature,
        Self::Symbol,
        Self::SymbolCode,
        Self::Asset,
    ];

    /// Schema-level type name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int128 => "int128",
            Self::Uint128 => "uint128",
            Self::VarUint32 => "varuint32",
            Self::VarInt32 => "varint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Float128 => "float128",
            Self::TimePoint => "time_point",
            Self::TimePointSec => "time_point_sec",
            Self::BlockTimestamp => "block_timestamp_type",
            Self::Name => "name",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Checksum160 => "checksum160",
            Self::Checksum256 => "checksum256",
            Self::Checksum512 => "checksum512",
            Self::PublicKey => "public_key",
            Self::PrivateKey => "private_key",
            Self::Signature => "signature",
            Self::Symbol => "symbol",
            Self::SymbolCode => "symbol_code",
            Self::Asset => "asset",
        }
    }

    /// Look up a builtin by its schema-level name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Index of a descriptor inside a [`TypeRegistry`](crate::types::TypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Builtin primitive or domain type.
    Builtin(BuiltinKind),
    /// `T?`: presence byte then the value.
    Optional(TypeId),
    /// `T[]`: varuint32 count then the elements.
    Array(TypeId),
    /// Tagged union over an ordered member list.
    Variant(VariantDescriptor),
    /// Struct with optional base and ordered fields.
    Struct(StructDescriptor),
    /// Declared but not yet resolved (only seen while a schema loads).
    Unresolved,
}

/// A complete type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Type name.
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a builtin type descriptor.
    pub fn builtin(kind: BuiltinKind) -> Self {
        Self::new(kind.name(), TypeKind::Builtin(kind))
    }

    /// Check if this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// True for `T[]` and `T?`, which cannot be wrapped again.
    pub fn is_wrapper(&self) -> bool {
        matches!(self.kind, TypeKind::Optional(_) | TypeKind::Array(_))
    }

    /// Get the struct descriptor, if this is a struct.
    pub fn as_struct(&self) -> Option<&StructDescriptor> {
        match &self.kind {
            TypeKind::Struct(s) => Some(s),
            _ => None,
        }
    }
}

/// Field descriptor for struct members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Field type.
    pub type_id: TypeId,
    /// Field may be omitted as part of a trailing suffix (`T$`).
    pub is_extension: bool,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            is_extension: false,
        }
    }
}

/// Struct type descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructDescriptor {
    /// Base struct, whose fields precede ours on the wire.
    pub base: Option<TypeId>,
    /// Own fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Base fields (most-ancestral first) followed by own fields.
    pub all_fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Struct without a base; `all_fields` equals `fields`.
    pub fn flat(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            base: None,
            all_fields: fields.clone(),
            fields,
        }
    }
}

/// Variant member.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantMember {
    /// Member name as written in the schema (the JSON tag).
    pub name: String,
    /// Member type.
    pub type_id: TypeId,
}

/// Variant type descriptor. The wire tag is the member's index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantDescriptor {
    /// Members in declaration order.
    pub members: Vec<VariantMember>,
}

impl VariantDescriptor {
    /// Get member index and descriptor by name.
    pub fn member(&self, name: &str) -> Option<(usize, &VariantMember)> {
        self.members.iter().enumerate().find(|(_, m)| m.name == name)
    }
}
