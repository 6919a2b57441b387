//! Core types and utilities for the tlvkit ASN.1 codec
//!
//! This crate provides the error taxonomy, the tag class enumeration and the
//! universal tag numbers shared by the encoder and decoder crates.

pub mod error;
pub mod tag_class;
pub mod universal;

pub use error::{Asn1Error, Asn1Result};
pub use tag_class::TagClass;
