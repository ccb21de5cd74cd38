use digest::Digest;
use sha2::Sha256;

/// A digest object that takes byte slices.
pub(crate) trait Chain: Sized {
    /// Hash raw bytes.
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self;

    /// Hash a byte string.
    ///
    /// Tagged hashes are fixed by BIP340 to be plain concatenations,
    /// so no length framing is added here.
    fn chain_bytes(self, bytes: &(impl AsRef<[u8]> + ?Sized)) -> Self {
        self.chain_raw_bytes(bytes.as_ref())
    }
}

/// The BIP340 tagged hash: SHA256 prefixed with two copies of `SHA256(tag)`.
pub(crate) struct TaggedHasher(Sha256);

impl Chain for TaggedHasher {
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self {
        Self(self.0.chain_update(bytes))
    }
}

impl TaggedHasher {
    pub fn new(tag: &[u8]) -> Self {
        let tag_hash = Sha256::digest(tag);
        Self(Sha256::new().chain_update(tag_hash).chain_update(tag_hash))
    }

    pub fn finalize(self) -> [u8; 32] {
        let mut output = [0u8; 32];
        output.copy_from_slice(&self.0.finalize());
        output
    }
}
