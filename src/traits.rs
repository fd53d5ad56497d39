//! Contract between the padding engine and a raw RSA primitive.

use crate::errors::Result;

/// A raw RSA primitive: modular exponentiation under an installed key.
///
/// The engine treats key bytes as opaque; their format is the primitive's
/// business. The four data operations take the input as a big-endian octet
/// string, write the result's minimal big-endian encoding to `dst` (leading
/// zero octets stripped) and return the number of octets written. The
/// engine restores the stripped zeros itself.
///
/// Implementations must reject inputs whose integer value is not below the
/// modulus with [`Error::RepresentativeOutOfRange`].
///
/// [`Error::RepresentativeOutOfRange`]: crate::Error::RepresentativeOutOfRange
pub trait RsaPrimitive {
    /// Primitive name, used to derive the padded instance name.
    fn name(&self) -> &'static str;

    /// Installs a public key. On success [`max_size`](Self::max_size)
    /// reflects the new modulus.
    fn set_pub_key(&mut self, key: &[u8]) -> Result<()>;

    /// Installs a private key. On success [`max_size`](Self::max_size)
    /// reflects the new modulus.
    fn set_priv_key(&mut self, key: &[u8]) -> Result<()>;

    /// Modulus length in octets.
    fn max_size(&self) -> Result<usize>;

    /// Public-direction exponentiation of a plaintext block.
    fn encrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<usize>;

    /// Private-direction exponentiation of a ciphertext.
    fn decrypt(&self, src: &[u8], dst: &mut [u8]) -> Result<usize>;

    /// Private-direction exponentiation of a signature block.
    fn sign(&self, src: &[u8], dst: &mut [u8]) -> Result<usize>;

    /// Public-direction exponentiation of a signature.
    fn verify(&self, src: &[u8], dst: &mut [u8]) -> Result<usize>;
}
