//! Shared protocol constants for the hypersig signature workspace.
//!
//! These values are part of the wire-level definition of the scheme: every
//! implementation of the tweakable hash, message hash, and PRF must agree on
//! them for signatures to verify across crates.

#![no_std]

/// Message length in bytes, for messages that we want to sign.
pub const MESSAGE_LENGTH: usize = 32;

/// Tweak separator prepended to message-hash inputs.
pub const TWEAK_SEPARATOR_FOR_MESSAGE_HASH: u8 = 0x02;

/// Tweak separator for Merkle tree node hashing.
pub const TWEAK_SEPARATOR_FOR_TREE_HASH: u8 = 0x01;

/// Tweak separator for hash chain steps.
pub const TWEAK_SEPARATOR_FOR_CHAIN_HASH: u8 = 0x00;

/// Length of a PRF master key in bytes.
pub const PRF_KEY_LENGTH: usize = 32;

/// Domain separator mixed into every PRF invocation, ahead of the key.
pub const PRF_DOMAIN_SEP: [u8; 16] = [
    0x00, 0x01, 0x12, 0xff, 0x00, 0x01, 0xfa, 0xff, 0x00, 0xaf, 0x12, 0xff, 0x01, 0xfa, 0xff, 0x00,
];
