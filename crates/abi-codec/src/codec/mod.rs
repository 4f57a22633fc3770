// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary codecs.
//!
//! Leaf codecs (`primitive`, `name`, `time`, `asset`, `keys`) convert between
//! text/JSON literals and native values. `builtin` puts those on the wire,
//! and `composite` drives the whole conversion from a type descriptor.

pub mod asset;
pub mod buffer;
mod builtin;
mod composite;
pub mod keys;
pub mod name;
mod primitive;
pub mod time;

pub(crate) use composite::{Decoder, Encoder};
