//! The padding engine: encrypt, decrypt, sign and verify over a primitive.

use alloc::format;
use alloc::string::String;
use alloc::vec;

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::pad::left_pad;
use crate::algorithms::pkcs1v15::{
    pkcs1v15_encrypt_pad, pkcs1v15_encrypt_unpad, pkcs1v15_sign_pad, pkcs1v15_verify_unpad,
};
use crate::asn1::{lookup_digest_info, DigestInfo};
use crate::errors::{Error, Result};
use crate::traits::RsaPrimitive;

/// Largest supported modulus length in octets (a 16384-bit key).
///
/// Bounds the single contiguous working buffer each operation allocates.
pub const MAX_KEY_SIZE: usize = 2048;

/// PKCS#1 v1.5 padding around a raw RSA primitive.
///
/// The engine owns the primitive and tracks the modulus length of the
/// installed key. An instance built with [`with_digest`](Self::with_digest)
/// signs and verifies `DigestInfo || digest` blocks; one built with
/// [`new`](Self::new) signs the caller's octets as-is.
///
/// Key installation takes `&mut self` while the data operations take
/// `&self`, so a key change cannot race an in-flight request.
#[derive(Debug)]
pub struct Pkcs1Pad<P> {
    child: P,
    hash_name: Option<&'static str>,
    key_size: usize,
}

impl<P: RsaPrimitive> Pkcs1Pad<P> {
    /// Wraps `child` for encryption, decryption and raw signatures.
    pub fn new(child: P) -> Self {
        Self {
            child,
            hash_name: None,
            key_size: 0,
        }
    }

    /// Wraps `child` for signatures carrying the named digest's
    /// `DigestInfo` prefix.
    ///
    /// The name is resolved against the digest table when signing or
    /// verifying, not here; an unrecognized name fails those operations.
    pub fn with_digest(child: P, hash_name: &'static str) -> Self {
        Self {
            child,
            hash_name: Some(hash_name),
            key_size: 0,
        }
    }

    /// Instance name in the `pkcs1pad(<rsa>)` / `pkcs1pad(<rsa>,<hash>)`
    /// convention.
    pub fn alg_name(&self) -> String {
        match self.hash_name {
            Some(hash) => format!("pkcs1pad({},{})", self.child.name(), hash),
            None => format!("pkcs1pad({})", self.child.name()),
        }
    }

    /// Installs a public key on the primitive and records the new modulus
    /// length. A failed install leaves the engine keyless.
    pub fn set_pub_key(&mut self, key: &[u8]) -> Result<()> {
        self.key_size = 0;
        self.child.set_pub_key(key)?;
        self.key_size = self.child.max_size()?;
        Ok(())
    }

    /// Installs a private key on the primitive and records the new modulus
    /// length. A failed install leaves the engine keyless.
    pub fn set_priv_key(&mut self, key: &[u8]) -> Result<()> {
        self.key_size = 0;
        self.child.set_priv_key(key)?;
        self.key_size = self.child.max_size()?;
        Ok(())
    }

    /// Maximum destination length: the modulus length in octets.
    ///
    /// The same value applies to all four operations even though
    /// decrypt/verify outputs are smaller.
    pub fn max_size(&self) -> Result<usize> {
        self.key_size()
    }

    fn key_size(&self) -> Result<usize> {
        match self.key_size {
            0 => Err(Error::NoKey),
            k => Ok(k),
        }
    }

    /// Encrypts `src` into `dst` and returns the ciphertext length, which
    /// is always the modulus length.
    ///
    /// `rng` supplies the nonzero random padding string and must be
    /// cryptographically strong; padding bytes are as much a part of the
    /// scheme's security as the key.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        src: &[u8],
        dst: &mut [u8],
    ) -> Result<usize> {
        let k = self.key_size()?;
        if src.len() + 11 > k {
            return Err(Error::MessageTooLong);
        }
        if dst.len() < k {
            return Err(Error::OutputOverflow { needed: k });
        }
        if k > MAX_KEY_SIZE {
            return Err(Error::Unsupported);
        }

        let in_buf = pkcs1v15_encrypt_pad(rng, src, k)?;
        let mut out_buf = Zeroizing::new(vec![0u8; k]);
        let written = self.child.encrypt(&in_buf, &mut out_buf)?;

        self.complete_encrypt_sign(&out_buf[..written], dst)
    }

    /// Decrypts a `key_size`-octet ciphertext into `dst` and returns the
    /// plaintext length.
    ///
    /// Every malformed block yields the same [`Error::InvalidEncoding`]; a
    /// too-small `dst` yields [`Error::OutputOverflow`] carrying the
    /// required length.
    pub fn decrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let k = self.key_size()?;
        if src.len() != k {
            return Err(Error::InvalidEncoding);
        }
        if k > MAX_KEY_SIZE {
            return Err(Error::Unsupported);
        }

        let mut out_buf = Zeroizing::new(vec![0u8; k]);
        let written = match self.child.decrypt(src, &mut out_buf) {
            // the decrypted value had no leading zero octet
            Err(Error::OutputOverflow { .. }) => return Err(Error::InvalidEncoding),
            other => other?,
        };

        let msg = pkcs1v15_encrypt_unpad(&out_buf[..written], k)?;
        publish(msg, dst)
    }

    /// Signs `src` (digest octets, or arbitrary octets for a raw instance)
    /// into `dst` and returns the signature length, which is always the
    /// modulus length.
    pub fn sign(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let k = self.key_size()?;
        let prefix = match self.digest_info(Error::UnknownDigest)? {
            Some(info) => info.prefix,
            None => &[],
        };
        if src.len() + prefix.len() + 11 > k {
            return Err(Error::MessageTooLong);
        }
        if dst.len() < k {
            return Err(Error::OutputOverflow { needed: k });
        }
        if k > MAX_KEY_SIZE {
            return Err(Error::Unsupported);
        }

        let in_buf = pkcs1v15_sign_pad(prefix, src, k)?;
        let mut out_buf = Zeroizing::new(vec![0u8; k]);
        let written = self.child.sign(&in_buf, &mut out_buf)?;

        self.complete_encrypt_sign(&out_buf[..written], dst)
    }

    /// Recovers the signed payload from a signature into `dst` and returns
    /// its length.
    ///
    /// This is the RFC 2313 § 10.2 recovery operation: the caller compares
    /// the recovered digest against one it computed itself. Inputs longer
    /// than `key_size` pass the length gate for compatibility with callers
    /// that over-size the buffer; the primitive then rejects any
    /// representative at or above the modulus.
    pub fn verify(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let k = self.key_size()?;
        if src.len() < k {
            return Err(Error::InvalidEncoding);
        }
        if k > MAX_KEY_SIZE {
            return Err(Error::Unsupported);
        }

        let mut out_buf = Zeroizing::new(vec![0u8; k]);
        let written = match self.child.verify(src, &mut out_buf) {
            Err(Error::OutputOverflow { .. }) => return Err(Error::InvalidEncoding),
            other => other?,
        };

        let digest_info = self.digest_info(Error::BadSignature)?;
        let payload = pkcs1v15_verify_unpad(&out_buf[..written], k, digest_info)?;
        publish(payload, dst)
    }

    /// Resolves the configured hash name, mapping a table miss to `miss`
    /// (the sign and verify paths report it differently).
    fn digest_info(&self, miss: Error) -> Result<Option<&'static DigestInfo>> {
        match self.hash_name {
            Some(name) => lookup_digest_info(name).ok_or(miss).map(Some),
            None => Ok(None),
        }
    }

    /// Completion for the private/public forward paths: the primitive's
    /// output may be short of the modulus length, so restore the missing
    /// leading zeros while copying out.
    fn complete_encrypt_sign(&self, child_out: &[u8], dst: &mut [u8]) -> Result<usize> {
        let k = self.key_size;
        left_pad(child_out, &mut dst[..k]);
        Ok(k)
    }
}

/// Copies a recovered payload to the caller, publishing the required
/// length when the destination is too small.
fn publish(payload: &[u8], dst: &mut [u8]) -> Result<usize> {
    if dst.len() < payload.len() {
        return Err(Error::OutputOverflow {
            needed: payload.len(),
        });
    }
    dst[..payload.len()].copy_from_slice(payload);
    Ok(payload.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asn1::lookup_digest_info;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Identity "modexp": strips leading zeros and echoes the input, which
    /// keeps the engine's framing visible end to end.
    struct MockRsa {
        size: usize,
        fail_with: Option<Error>,
    }

    impl MockRsa {
        fn new() -> Self {
            MockRsa {
                size: 0,
                fail_with: None,
            }
        }

        fn with_key(size: usize) -> Self {
            MockRsa {
                size,
                fail_with: None,
            }
        }

        fn xfer(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
            if let Some(err) = self.fail_with {
                return Err(err);
            }
            let start = src.iter().position(|&b| b != 0).unwrap_or(src.len());
            let out = &src[start..];
            if dst.len() < out.len() {
                return Err(Error::OutputOverflow { needed: out.len() });
            }
            dst[..out.len()].copy_from_slice(out);
            Ok(out.len())
        }
    }

    impl RsaPrimitive for MockRsa {
        fn name(&self) -> &'static str {
            "mock-rsa"
        }

        fn set_pub_key(&mut self, key: &[u8]) -> Result<()> {
            if key.is_empty() {
                return Err(Error::InvalidKey);
            }
            self.size = key.len();
            Ok(())
        }

        fn set_priv_key(&mut self, key: &[u8]) -> Result<()> {
            self.set_pub_key(key)
        }

        fn max_size(&self) -> Result<usize> {
            match self.size {
                0 => Err(Error::NoKey),
                n => Ok(n),
            }
        }

        fn encrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
            self.xfer(src, dst)
        }

        fn decrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
            self.xfer(src, dst)
        }

        fn sign(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
            self.xfer(src, dst)
        }

        fn verify(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
            self.xfer(src, dst)
        }
    }

    fn keyed_pad(k: usize) -> Pkcs1Pad<MockRsa> {
        let mut pad = Pkcs1Pad::new(MockRsa::new());
        pad.set_pub_key(&vec![0u8; k]).unwrap();
        pad
    }

    fn keyed_digest_pad(k: usize, hash_name: &'static str) -> Pkcs1Pad<MockRsa> {
        let mut pad = Pkcs1Pad::with_digest(MockRsa::new(), hash_name);
        pad.set_pub_key(&vec![0u8; k]).unwrap();
        pad
    }

    #[test]
    fn test_no_key() {
        let pad = Pkcs1Pad::new(MockRsa::new());
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut dst = [0u8; 64];

        assert_eq!(pad.encrypt(&mut rng, b"hi", &mut dst), Err(Error::NoKey));
        assert_eq!(pad.decrypt(&[0u8; 64], &mut dst), Err(Error::NoKey));
        assert_eq!(pad.sign(b"hi", &mut dst), Err(Error::NoKey));
        assert_eq!(pad.verify(&[0u8; 64], &mut dst), Err(Error::NoKey));
        assert_eq!(pad.max_size(), Err(Error::NoKey));
    }

    #[test]
    fn test_failed_install_leaves_no_key() {
        let mut pad = Pkcs1Pad::new(MockRsa::with_key(64));
        assert_eq!(pad.max_size(), Err(Error::NoKey));

        pad.set_pub_key(&[0xddu8; 64]).unwrap();
        assert_eq!(pad.max_size(), Ok(64));

        assert_eq!(pad.set_pub_key(&[]), Err(Error::InvalidKey));
        assert_eq!(pad.max_size(), Err(Error::NoKey));
    }

    #[test]
    fn test_encrypt_framing() {
        let pad = keyed_pad(64);
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut dst = [0u8; 64];

        let n = pad.encrypt(&mut rng, b"hi", &mut dst).unwrap();
        assert_eq!(n, 64);
        // normalized output: leading zero restored, then the type-02 block
        assert_eq!(dst[0], 0x00);
        assert_eq!(dst[1], 0x02);
        assert!(dst[2..61].iter().all(|&b| b != 0));
        assert_eq!(dst[61], 0x00);
        assert_eq!(&dst[62..], b"hi");
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let pad = keyed_pad(64);
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut ct = [0u8; 64];
        let mut pt = [0u8; 64];

        pad.encrypt(&mut rng, b"testing.", &mut ct).unwrap();
        let n = pad.decrypt(&ct, &mut pt).unwrap();
        assert_eq!(&pt[..n], b"testing.");
    }

    #[test]
    fn test_encrypt_bounds() {
        let pad = keyed_pad(64);
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut dst = [0u8; 64];

        assert_eq!(
            pad.encrypt(&mut rng, &[0xaa; 54], &mut dst),
            Err(Error::MessageTooLong)
        );
        assert_eq!(
            pad.encrypt(&mut rng, b"hi", &mut dst[..63]),
            Err(Error::OutputOverflow { needed: 64 })
        );
    }

    #[test]
    fn test_oversized_key_not_supported() {
        let pad = keyed_pad(MAX_KEY_SIZE + 1);
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut dst = vec![0u8; MAX_KEY_SIZE + 1];

        assert_eq!(
            pad.encrypt(&mut rng, b"hi", &mut dst),
            Err(Error::Unsupported)
        );
        assert_eq!(
            pad.decrypt(&vec![0u8; MAX_KEY_SIZE + 1], &mut dst),
            Err(Error::Unsupported)
        );
    }

    #[test]
    fn test_decrypt_length_gate() {
        let pad = keyed_pad(64);
        let mut dst = [0u8; 64];

        assert_eq!(pad.decrypt(&[0u8; 63], &mut dst), Err(Error::InvalidEncoding));
        assert_eq!(pad.decrypt(&[0u8; 65], &mut dst), Err(Error::InvalidEncoding));
    }

    #[test]
    fn test_decrypt_overflow_publishes_length() {
        let pad = keyed_pad(64);
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut ct = [0u8; 64];
        pad.encrypt(&mut rng, b"testing.", &mut ct).unwrap();

        let mut small = [0u8; 4];
        assert_eq!(
            pad.decrypt(&ct, &mut small),
            Err(Error::OutputOverflow { needed: 8 })
        );

        // the published length is sufficient on retry
        let mut exact = [0u8; 8];
        assert_eq!(pad.decrypt(&ct, &mut exact), Ok(8));
        assert_eq!(&exact, b"testing.");
    }

    #[test]
    fn test_sign_verify_roundtrip_with_digest() {
        let digest = [0xabu8; 32];
        let mut sig = [0u8; 64];
        let mut recovered = [0u8; 64];

        let pad = keyed_digest_pad(64, "sha256");
        let n = pad.sign(&digest, &mut sig).unwrap();
        assert_eq!(n, 64);

        // signature block: zero, type 01, 0xFF padding, separator,
        // DigestInfo, digest
        let prefix = lookup_digest_info("sha256").unwrap().prefix;
        assert_eq!(sig[0], 0x00);
        assert_eq!(sig[1], 0x01);
        let ps_end = 64 - 32 - prefix.len() - 1;
        assert!(sig[2..ps_end].iter().all(|&b| b == 0xff));
        assert_eq!(sig[ps_end], 0x00);
        assert_eq!(&sig[ps_end + 1..ps_end + 1 + prefix.len()], prefix);

        let n = pad.verify(&sig, &mut recovered).unwrap();
        assert_eq!(&recovered[..n], &digest[..]);
    }

    #[test]
    fn test_sign_rejects_oversized_payload() {
        let pad = keyed_digest_pad(64, "sha256");
        let mut sig = [0u8; 64];
        // 35 octets plus the 19-octet prefix exceed k - 11
        assert_eq!(pad.sign(&[0u8; 35], &mut sig), Err(Error::MessageTooLong));
    }

    #[test]
    fn test_unknown_digest() {
        let pad = keyed_digest_pad(64, "sha3-512");
        let mut dst = [0u8; 64];

        assert_eq!(pad.sign(&[0u8; 20], &mut dst), Err(Error::UnknownDigest));
        // the verify path reports a table miss as a signature failure
        assert_eq!(pad.verify(&[0u8; 64], &mut dst), Err(Error::BadSignature));
    }

    #[test]
    fn test_verify_tolerates_longer_source() {
        let pad = keyed_pad(64);
        let digest = [0x17u8; 20];
        let mut sig = [0u8; 64];
        pad.sign(&digest, &mut sig).unwrap();

        // same representative with an extra leading zero octet
        let mut wide = [0u8; 65];
        wide[1..].copy_from_slice(&sig);
        let mut recovered = [0u8; 64];
        let n = pad.verify(&wide, &mut recovered).unwrap();
        assert_eq!(&recovered[..n], &digest[..]);

        // and anything shorter than the modulus is refused outright
        assert_eq!(
            pad.verify(&sig[..63], &mut recovered),
            Err(Error::InvalidEncoding)
        );
    }

    #[test]
    fn test_primitive_errors_pass_through() {
        let mut child = MockRsa::new();
        child.fail_with = Some(Error::Busy);
        let mut pad = Pkcs1Pad::new(child);
        pad.set_pub_key(&vec![0u8; 64]).unwrap();
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut dst = [0u8; 64];

        assert_eq!(pad.encrypt(&mut rng, b"hi", &mut dst), Err(Error::Busy));
        assert_eq!(pad.sign(b"hi", &mut dst), Err(Error::Busy));
    }

    #[test]
    fn test_decrypt_remaps_overflow() {
        let mut child = MockRsa::new();
        child.fail_with = Some(Error::OutputOverflow { needed: 65 });
        let mut pad = Pkcs1Pad::new(child);
        pad.set_pub_key(&vec![0u8; 64]).unwrap();
        let mut dst = [0u8; 64];

        assert_eq!(pad.decrypt(&[0u8; 64], &mut dst), Err(Error::InvalidEncoding));
        assert_eq!(pad.verify(&[0u8; 64], &mut dst), Err(Error::InvalidEncoding));
    }

    #[test]
    fn test_alg_name() {
        assert_eq!(keyed_pad(64).alg_name(), "pkcs1pad(mock-rsa)");
        assert_eq!(
            Pkcs1Pad::with_digest(MockRsa::new(), "sha256").alg_name(),
            "pkcs1pad(mock-rsa,sha256)"
        );
    }
}
