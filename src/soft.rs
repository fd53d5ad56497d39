//! Software RSA primitive backed by big-integer modular exponentiation.
//!
//! Keys are installed as PKCS#1 DER: `RSAPublicKey` for the public half,
//! `RSAPrivateKey` for the private half (only `n`, `e` and `d` are
//! consumed; the CRT parameters are ignored). Private-direction results
//! are re-encrypted and compared against the input to catch computation
//! faults before anything leaves this module.
//!
//! No blinding is applied; callers needing timing-attack resistance
//! should supply a hardened primitive instead.

use num_bigint::BigUint;
use num_traits::Zero;
use pkcs1::der::Decode;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Error, Result};
use crate::traits::RsaPrimitive;

/// Pure-software implementation of [`RsaPrimitive`].
#[derive(Debug, Default)]
pub struct SoftRsa {
    key: Option<SoftKey>,
}

#[derive(Debug)]
struct SoftKey {
    n: BigUint,
    e: BigUint,
    d: Option<BigUint>,
}

impl Drop for SoftKey {
    fn drop(&mut self) {
        if let Some(d) = self.d.as_mut() {
            d.zeroize();
        }
    }
}

impl SoftRsa {
    /// Creates a keyless instance.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(&self) -> Result<&SoftKey> {
        self.key.as_ref().ok_or(Error::NoKey)
    }
}

impl SoftKey {
    fn size(&self) -> usize {
        (self.n.bits() + 7) / 8
    }

    fn representative(&self, src: &[u8]) -> Result<BigUint> {
        let value = BigUint::from_bytes_be(src);
        if value >= self.n {
            return Err(Error::RepresentativeOutOfRange);
        }
        Ok(value)
    }

    /// Raw encryption: `m^e mod n`.
    fn public_op(&self, src: &[u8]) -> Result<BigUint> {
        let m = self.representative(src)?;
        Ok(m.modpow(&self.e, &self.n))
    }

    /// Raw decryption, `c^d mod n`, followed by the inverse operation as a
    /// consistency check on the result.
    fn private_op(&self, src: &[u8]) -> Result<BigUint> {
        let d = self.d.as_ref().ok_or(Error::NoKey)?;
        let c = self.representative(src)?;
        let m = c.modpow(d, &self.n);

        if m.modpow(&self.e, &self.n) != c {
            return Err(Error::Internal);
        }

        Ok(m)
    }
}

/// Copies the minimal big-endian encoding of `value` into `dst`.
fn write_output(mut value: BigUint, dst: &mut [u8]) -> Result<usize> {
    let bytes = Zeroizing::new(value.to_bytes_be());
    value.zeroize();

    if dst.len() < bytes.len() {
        return Err(Error::OutputOverflow {
            needed: bytes.len(),
        });
    }
    dst[..bytes.len()].copy_from_slice(&bytes);
    Ok(bytes.len())
}

fn validate(n: &BigUint, e: &BigUint) -> Result<()> {
    if n.is_zero() || e.is_zero() {
        return Err(Error::InvalidKey);
    }
    Ok(())
}

impl RsaPrimitive for SoftRsa {
    fn name(&self) -> &'static str {
        "rsa"
    }

    fn set_pub_key(&mut self, key: &[u8]) -> Result<()> {
        self.key = None;

        let parsed = pkcs1::RsaPublicKey::from_der(key).map_err(|_| Error::InvalidKey)?;
        let n = BigUint::from_bytes_be(parsed.modulus.as_bytes());
        let e = BigUint::from_bytes_be(parsed.public_exponent.as_bytes());
        validate(&n, &e)?;

        self.key = Some(SoftKey { n, e, d: None });
        Ok(())
    }

    fn set_priv_key(&mut self, key: &[u8]) -> Result<()> {
        self.key = None;

        let parsed = pkcs1::RsaPrivateKey::from_der(key).map_err(|_| Error::InvalidKey)?;
        let n = BigUint::from_bytes_be(parsed.modulus.as_bytes());
        let e = BigUint::from_bytes_be(parsed.public_exponent.as_bytes());
        let d = BigUint::from_bytes_be(parsed.private_exponent.as_bytes());
        validate(&n, &e)?;
        if d.is_zero() {
            return Err(Error::InvalidKey);
        }

        self.key = Some(SoftKey { n, e, d: Some(d) });
        Ok(())
    }

    fn max_size(&self) -> Result<usize> {
        Ok(self.key()?.size())
    }

    fn encrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        write_output(self.key()?.public_op(src)?, dst)
    }

    fn decrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        write_output(self.key()?.private_op(src)?, dst)
    }

    fn sign(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        write_output(self.key()?.private_op(src)?, dst)
    }

    fn verify(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        write_output(self.key()?.public_op(src)?, dst)
    }
}
