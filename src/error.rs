/// Malformed arguments passed to batch verification.
///
/// These indicate a caller error and are reported before any cryptographic work is done.
/// Signatures or keys that are well-shaped but fail to decode are not errors;
/// they make the verification return `false`.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// Batch lengths do not match: {messages} messages, {pubkeys} public keys, {signatures} signatures.
    LengthMismatch {
        /// The number of messages.
        messages: usize,
        /// The number of public keys.
        pubkeys: usize,
        /// The number of signatures.
        signatures: usize,
    },
    /// Public key {index} is {length} bytes long, expected 32.
    PublicKeyLength {
        /// The position of the public key in the batch.
        index: usize,
        /// Its actual length.
        length: usize,
    },
    /// Signature {index} is {length} bytes long, expected 64.
    SignatureLength {
        /// The position of the signature in the batch.
        index: usize,
        /// Its actual length.
        length: usize,
    },
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidInput {}
