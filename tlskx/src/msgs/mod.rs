#![allow(missing_docs)]
//! Wire formats for the ClientKeyExchange step, and the codec underneath them.

#[macro_use]
mod macros;

pub mod base;
pub mod codec;
pub mod enums;
pub mod ffdhe_groups;
pub mod handshake;
