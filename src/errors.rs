//! Error types.

/// Alias for [`core::result::Result`] with the `pkcs1pad` error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by the padding engine or propagated from the primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An operation was attempted before a key was installed.
    NoKey,

    /// The payload does not fit the modulus: it exceeds `k - 11` octets,
    /// minus the DigestInfo prefix length when a digest is configured.
    MessageTooLong,

    /// The destination buffer is too small; `needed` is the length the
    /// caller must provide to retry.
    OutputOverflow {
        /// Required destination length in octets.
        needed: usize,
    },

    /// Decryption produced a malformed type-02 block. Returned uniformly
    /// for every structural failure so the reason is not disclosed.
    InvalidEncoding,

    /// Verification saw a malformed type-01 block, a missing separator,
    /// short padding, or a DigestInfo mismatch.
    BadSignature,

    /// The key size exceeds the engine's single-buffer bound.
    Unsupported,

    /// The configured hash name is not in the DigestInfo table.
    UnknownDigest,

    /// The primitive rejected the supplied key bytes.
    InvalidKey,

    /// The input's integer value is not below the modulus.
    RepresentativeOutOfRange,

    /// The primitive failed an internal consistency check.
    Internal,

    /// The primitive is saturated; the request may be retried later.
    Busy,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::NoKey => write!(f, "no key installed"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::OutputOverflow { needed } => {
                write!(f, "output buffer too small, {} octets required", needed)
            }
            Error::InvalidEncoding => write!(f, "invalid encoding"),
            Error::BadSignature => write!(f, "bad signature"),
            Error::Unsupported => write!(f, "key size not supported"),
            Error::UnknownDigest => write!(f, "unknown digest algorithm"),
            Error::InvalidKey => write!(f, "invalid key"),
            Error::RepresentativeOutOfRange => {
                write!(f, "message representative out of range")
            }
            Error::Internal => write!(f, "internal error"),
            Error::Busy => write!(f, "primitive busy"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
