//! Algorithm registry
//!
//! Maps case-insensitive algorithm names to digest constructors. The set is
//! closed: every name the registry accepts is a variant of [`HashAlgorithm`].

use std::fmt;
use std::str::FromStr;

use digest::Digest;
use serde::{Serialize, Serializer};

use crate::error::Error;

/// Incremental digest accumulator.
///
/// Implemented once generically for every `RustCrypto` [`Digest`] and once
/// for BLAKE3, which ships its own hasher type.
pub trait Hasher: Send {
    /// Feed the next chunk of input.
    fn update(&mut self, data: &[u8]);

    /// Consume the accumulator and return the raw digest bytes.
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Adapter from any `RustCrypto` digest to [`Hasher`].
#[derive(Debug, Default)]
pub struct DigestHasher<D>(D);

impl<D: Digest + Send> DigestHasher<D> {
    /// Fresh accumulator.
    pub fn new() -> Self {
        Self(D::new())
    }
}

impl<D: Digest + Send> Hasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.0).to_vec()
    }
}

/// BLAKE3 accumulator.
#[derive(Default)]
pub struct Blake3Hasher(blake3::Hasher);

impl fmt::Debug for Blake3Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blake3Hasher").finish_non_exhaustive()
    }
}

impl Blake3Hasher {
    /// Fresh accumulator.
    pub fn new() -> Self {
        Self(blake3::Hasher::new())
    }
}

impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }
}

/// A supported digest function.
///
/// Parse with [`str::parse`]; names are case-insensitive and `-` is accepted
/// in place of `_` (`SHA-256`, `sha3-256`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// MD5 (128-bit). Not collision resistant.
    Md5,
    /// SHA-1 (160-bit). Not collision resistant.
    Sha1,
    /// RIPEMD-160
    Ripemd160,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// SHA-512/224
    Sha512_224,
    /// SHA-512/256
    Sha512_256,
    /// SHA3-224
    Sha3_224,
    /// SHA3-256
    Sha3_256,
    /// SHA3-384
    Sha3_384,
    /// SHA3-512
    Sha3_512,
    /// BLAKE2b with 512-bit output.
    Blake2b,
    /// BLAKE2s with 256-bit output.
    Blake2s,
    /// BLAKE3 with the default 256-bit output.
    Blake3,
    /// SM3 (GB/T 32905-2016), 256-bit.
    Sm3,
}

impl HashAlgorithm {
    /// Every supported algorithm, in declaration order.
    pub const ALL: [HashAlgorithm; 17] = [
        Self::Md5,
        Self::Sha1,
        Self::Ripemd160,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_224,
        Self::Sha512_256,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Blake2b,
        Self::Blake2s,
        Self::Blake3,
        Self::Sm3,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Ripemd160 => "ripemd160",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512_224",
            Self::Sha512_256 => "sha512_256",
            Self::Sha3_224 => "sha3_224",
            Self::Sha3_256 => "sha3_256",
            Self::Sha3_384 => "sha3_384",
            Self::Sha3_512 => "sha3_512",
            Self::Blake2b => "blake2b",
            Self::Blake2s => "blake2s",
            Self::Blake3 => "blake3",
            Self::Sm3 => "sm3",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 | Self::Ripemd160 => 20,
            Self::Sha224 | Self::Sha512_224 | Self::Sha3_224 => 28,
            Self::Sha256
            | Self::Sha512_256
            | Self::Sha3_256
            | Self::Blake2s
            | Self::Blake3
            | Self::Sm3 => 32,
            Self::Sha384 | Self::Sha3_384 => 48,
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b => 64,
        }
    }

    /// Create a fresh accumulator for this algorithm.
    pub fn hasher(self) -> Box<dyn Hasher> {
        match self {
            Self::Md5 => Box::new(DigestHasher::<md5::Md5>::new()),
            Self::Sha1 => Box::new(DigestHasher::<sha1::Sha1>::new()),
            Self::Ripemd160 => Box::new(DigestHasher::<ripemd::Ripemd160>::new()),
            Self::Sha224 => Box::new(DigestHasher::<sha2::Sha224>::new()),
            Self::Sha256 => Box::new(DigestHasher::<sha2::Sha256>::new()),
            Self::Sha384 => Box::new(DigestHasher::<sha2::Sha384>::new()),
            Self::Sha512 => Box::new(DigestHasher::<sha2::Sha512>::new()),
            Self::Sha512_224 => Box::new(DigestHasher::<sha2::Sha512_224>::new()),
            Self::Sha512_256 => Box::new(DigestHasher::<sha2::Sha512_256>::new()),
            Self::Sha3_224 => Box::new(DigestHasher::<sha3::Sha3_224>::new()),
            Self::Sha3_256 => Box::new(DigestHasher::<sha3::Sha3_256>::new()),
            Self::Sha3_384 => Box::new(DigestHasher::<sha3::Sha3_384>::new()),
            Self::Sha3_512 => Box::new(DigestHasher::<sha3::Sha3_512>::new()),
            Self::Blake2b => Box::new(DigestHasher::<blake2::Blake2b512>::new()),
            Self::Blake2s => Box::new(DigestHasher::<blake2::Blake2s256>::new()),
            Self::Blake3 => Box::new(Blake3Hasher::new()),
            Self::Sm3 => Box::new(DigestHasher::<sm3::Sm3>::new()),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let algorithm = match normalized.as_str() {
            "md5" => Self::Md5,
            "sha1" | "sha_1" => Self::Sha1,
            "ripemd160" | "ripemd_160" | "rmd160" => Self::Ripemd160,
            "sha224" | "sha_224" => Self::Sha224,
            "sha256" | "sha_256" => Self::Sha256,
            "sha384" | "sha_384" => Self::Sha384,
            "sha512" | "sha_512" => Self::Sha512,
            "sha512_224" => Self::Sha512_224,
            "sha512_256" => Self::Sha512_256,
            "sha3_224" => Self::Sha3_224,
            "sha3_256" => Self::Sha3_256,
            "sha3_384" => Self::Sha3_384,
            "sha3_512" => Self::Sha3_512,
            "blake2b" | "blake2b512" | "blake2b_512" => Self::Blake2b,
            "blake2s" | "blake2s256" | "blake2s_256" => Self::Blake2s,
            "blake3" => Self::Blake3,
            "sm3" => Self::Sm3,
            _ => return Err(Error::UnsupportedAlgorithm(s.to_string())),
        };
        Ok(algorithm)
    }
}

/// Anything that names an algorithm: a parsed [`HashAlgorithm`] or a string.
///
/// Lets the digest and copy entry points take either form while validating
/// names exactly once, before any file is touched.
pub trait IntoHashAlgorithm {
    /// Resolve to a registry entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedAlgorithm`] for unknown names.
    fn into_hash_algorithm(self) -> Result<HashAlgorithm, Error>;
}

impl IntoHashAlgorithm for HashAlgorithm {
    fn into_hash_algorithm(self) -> Result<HashAlgorithm, Error> {
        Ok(self)
    }
}

impl IntoHashAlgorithm for &str {
    fn into_hash_algorithm(self) -> Result<HashAlgorithm, Error> {
        self.parse()
    }
}

impl IntoHashAlgorithm for &String {
    fn into_hash_algorithm(self) -> Result<HashAlgorithm, Error> {
        self.parse()
    }
}

impl IntoHashAlgorithm for String {
    fn into_hash_algorithm(self) -> Result<HashAlgorithm, Error> {
        self.parse()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for HashAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Canonical names of every supported algorithm, sorted case-insensitively.
pub fn available_algorithms() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = HashAlgorithm::ALL.iter().map(|a| a.name()).collect();
    names.sort_by_cached_key(|name| name.to_lowercase());
    names
}

/// Whether `name` parses to a supported algorithm.
pub fn is_supported(name: &str) -> bool {
    name.parse::<HashAlgorithm>().is_ok()
}
