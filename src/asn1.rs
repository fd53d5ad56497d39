//! ASN.1 DER `DigestInfo` prefixes for EMSA-PKCS1-v1_5.
//!
//! Each prefix is the DER encoding of the `DigestInfo` SEQUENCE up to and
//! including the OCTET STRING tag and length; the digest octets themselves
//! are appended at signing time. See [RFC 8017 § 9.2, note 1].
//!
//! [RFC 8017 § 9.2, note 1]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.2

/// A hash algorithm name paired with its DER `DigestInfo` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestInfo {
    /// Lower-case algorithm name, e.g. `"sha256"`.
    pub name: &'static str,
    /// DER prefix; the digest is appended after these octets.
    pub prefix: &'static [u8],
}

static DIGEST_INFO_TABLE: &[DigestInfo] = &[
    DigestInfo {
        name: "md5",
        prefix: &[
            0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x05,
            0x05, 0x00, 0x04, 0x10,
        ],
    },
    DigestInfo {
        name: "sha1",
        prefix: &[
            0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04,
            0x14,
        ],
    },
    DigestInfo {
        name: "rmd160",
        prefix: &[
            0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x24, 0x03, 0x02, 0x01, 0x05, 0x00, 0x04,
            0x14,
        ],
    },
    DigestInfo {
        name: "sha224",
        prefix: &[
            0x30, 0x2d, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x04, 0x05, 0x00, 0x04, 0x1c,
        ],
    },
    DigestInfo {
        name: "sha256",
        prefix: &[
            0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x01, 0x05, 0x00, 0x04, 0x20,
        ],
    },
    DigestInfo {
        name: "sha384",
        prefix: &[
            0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x02, 0x05, 0x00, 0x04, 0x30,
        ],
    },
    DigestInfo {
        name: "sha512",
        prefix: &[
            0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x03, 0x05, 0x00, 0x04, 0x40,
        ],
    },
];

/// Looks up a digest algorithm by exact, case-sensitive name.
pub fn lookup_digest_info(name: &str) -> Option<&'static DigestInfo> {
    DIGEST_INFO_TABLE.iter().find(|info| info.name == name)
}
