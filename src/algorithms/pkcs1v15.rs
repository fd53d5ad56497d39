//! PKCS#1 v1.5 block construction and parsing as described in
//! [RFC 8017 § 7.2 and § 8.2].
//!
//! All functions here work on the `k - 1` octet representation: the leading
//! `0x00` octet of the encoded message is implied, because the primitive
//! strips it on output and restores it on input by virtue of integer
//! conversion.
//!
//! [RFC 8017 § 7.2 and § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017

use alloc::vec;
use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::asn1::DigestInfo;
use crate::errors::{Error, Result};

/// Fills the provided slice with random values which are guaranteed
/// to not be zero.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        while *el == 0u8 {
            rng.fill_bytes(core::slice::from_mut(el));
        }
    }
}

/// Builds the type-02 encryption block for a message of `msg.len()` octets.
///
/// The message must be no longer than the modulus length minus 11 octets.
/// Output is `k - 1` octets: `0x02 || PS || 0x00 || M` with at least eight
/// octets of nonzero random padding.
pub(crate) fn pkcs1v15_encrypt_pad<R>(rng: &mut R, msg: &[u8], k: usize) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + 11 > k {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x02 || PS || 0x00 || M
    let mut em = vec![0u8; k - 1];
    em[0] = 0x02;
    non_zero_random_bytes(rng, &mut em[1..k - msg.len() - 2]);
    em[k - msg.len() - 2] = 0x00;
    em[k - msg.len() - 1..].copy_from_slice(msg);
    Ok(em)
}

/// Parses a type-02 block and returns the embedded message.
///
/// Whether this function returns an error or not discloses secret
/// information; callers must not let an attacker distinguish padding
/// failures from other outcomes if they can submit chosen ciphertexts.
/// The structural checks are evaluated over the whole buffer and combined
/// with constant-time operations before the single aggregate branch.
#[inline]
pub(crate) fn pkcs1v15_encrypt_unpad(em: &[u8], k: usize) -> Result<&[u8]> {
    if k < 11 || em.len() != k - 1 {
        return Err(Error::InvalidEncoding);
    }

    let type_is_two = em[0].ct_eq(&0x02u8);

    // The padding must be a run of nonzero octets terminated by a zero.
    //   looking_for_index: 1 iff the zero has not been seen yet.
    //   index: offset of the first zero octet.
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;

    for (i, el) in em.iter().enumerate().skip(1) {
        let equals0 = el.ct_eq(&0u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals0);
        looking_for_index &= !equals0;
    }

    // PS spans [1, index); require at least eight octets, i.e. index >= 9.
    let valid_ps = Choice::from((((8i32 - index as i32) >> 31) & 1) as u8);
    let valid = type_is_two & !looking_for_index & valid_ps;

    if !bool::from(valid) {
        return Err(Error::InvalidEncoding);
    }

    Ok(&em[index as usize + 1..])
}

/// Builds the type-01 signature block around `prefix || msg`.
///
/// `prefix` is the DER DigestInfo header (empty for raw signatures) and
/// `msg` the digest octets. Output is `k - 1` octets:
/// `0x01 || PS || 0x00 || prefix || M` with PS all `0xFF`.
/// The block embeds the data being signed, so it is wiped on drop.
pub(crate) fn pkcs1v15_sign_pad(prefix: &[u8], msg: &[u8], k: usize) -> Result<Zeroizing<Vec<u8>>> {
    let t_len = prefix.len() + msg.len();
    if t_len + 11 > k {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x01 || PS || 0x00 || prefix || M
    let mut em = Zeroizing::new(vec![0xffu8; k - 1]);
    em[0] = 0x01;
    em[k - t_len - 2] = 0x00;
    em[k - t_len - 1..k - msg.len() - 1].copy_from_slice(prefix);
    em[k - msg.len() - 1..].copy_from_slice(msg);

    Ok(em)
}

/// Parses a type-01 block and returns the recovered `DigestInfo` payload.
///
/// When `digest_info` is given, the payload must start with its exact DER
/// prefix, which is then skipped; the returned slice holds the digest
/// octets. With no digest configured the full payload after the separator
/// is returned. Everything here is public data, so the checks may
/// short-circuit.
pub(crate) fn pkcs1v15_verify_unpad<'a>(
    em: &'a [u8],
    k: usize,
    digest_info: Option<&DigestInfo>,
) -> Result<&'a [u8]> {
    if k < 11 || em.len() != k - 1 {
        return Err(Error::BadSignature);
    }

    if em[0] != 0x01 {
        return Err(Error::BadSignature);
    }

    let mut pos = 1;
    while pos < em.len() && em[pos] == 0xff {
        pos += 1;
    }

    if pos < 9 || pos == em.len() || em[pos] != 0x00 {
        return Err(Error::BadSignature);
    }
    pos += 1;

    if let Some(info) = digest_info {
        let payload = &em[pos..];
        if payload.len() < info.prefix.len() || &payload[..info.prefix.len()] != info.prefix {
            return Err(Error::BadSignature);
        }
        pos += info.prefix.len();
    }

    Ok(&em[pos..])
}
