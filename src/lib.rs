//! PKCS#1 v1.5 padding ([RFC 8017]) as a layer over a pluggable raw RSA
//! primitive.
//!
//! The crate supplies the padding side of RSAES-PKCS1-v1_5 and
//! RSASSA-PKCS1-v1_5: building type-02 encryption blocks and type-01
//! signature blocks, parsing them back with the boundary checks the format
//! requires, and restoring the leading zero octets a raw modular
//! exponentiation drops. The exponentiation itself is reached through the
//! [`RsaPrimitive`] trait, so any modexp backend (hardware offload, a
//! constant-time library, or the bundled [`SoftRsa`]) slots underneath
//! [`Pkcs1Pad`].
//!
//! An instance is either encryption-plus-raw-signature flavored
//! (`pkcs1pad(<rsa>)`) or bound to one digest algorithm for
//! `DigestInfo`-prefixed signatures (`pkcs1pad(<rsa>,<hash>)`):
//!
//! ```
//! use pkcs1pad::{lookup_digest_info, Pkcs1Pad, SoftRsa};
//!
//! // sha256 is one of the recognized digest names
//! assert_eq!(lookup_digest_info("sha256").unwrap().prefix.len(), 19);
//!
//! let pad = Pkcs1Pad::with_digest(SoftRsa::new(), "sha256");
//! assert_eq!(pad.alg_name(), "pkcs1pad(rsa,sha256)");
//! ```
//!
//! Keys are installed with [`Pkcs1Pad::set_pub_key`] /
//! [`Pkcs1Pad::set_priv_key`]; afterwards `encrypt`, `decrypt`, `sign` and
//! `verify` operate on caller-provided buffers and report the produced
//! length. See the individual methods for the exact length contracts.
//!
//! PKCS#1 v1.5 decryption is notoriously exposed to padding-oracle attacks;
//! the parser keeps its structural checks constant-time, but callers remain
//! responsible for not revealing decryption outcomes to attackers.
//!
//! [RFC 8017]: https://datatracker.ietf.org/doc/html/rfc8017

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod algorithms;
mod asn1;
pub mod errors;
mod padding;
#[cfg(feature = "soft")]
mod soft;
mod traits;

pub use crate::asn1::{lookup_digest_info, DigestInfo};
pub use crate::errors::{Error, Result};
pub use crate::padding::{Pkcs1Pad, MAX_KEY_SIZE};
pub use crate::traits::RsaPrimitive;

#[cfg(feature = "soft")]
pub use crate::soft::SoftRsa;
