use core::{
    fmt::Debug,
    iter::Sum,
    ops::{Add, Mul},
};

use crate::tools::hashing::{Chain, TaggedHasher};

/// The size of an x-only public key (and of the nonce half of a signature).
pub const PUBLIC_KEY_SIZE: usize = 32;
/// The size of a signature: an x-only nonce point followed by a scalar.
pub const SIGNATURE_SIZE: usize = 64;
/// The size of a SEC1-compressed point.
pub const COMPRESSED_POINT_SIZE: usize = 33;

static_assertions::const_assert_eq!(SIGNATURE_SIZE, 2 * PUBLIC_KEY_SIZE);
static_assertions::const_assert_eq!(COMPRESSED_POINT_SIZE, PUBLIC_KEY_SIZE + 1);

/// An integer modulo the (prime) group order.
pub trait GroupScalar:
    'static + Debug + Copy + Eq + Send + Sync + Add<Output = Self> + Mul<Output = Self> + Sum
{
    /// The multiplicative identity.
    const ONE: Self;

    /// Parses a big-endian integer, returning `None` if it is not below the group order.
    fn try_from_be_bytes(bytes: &[u8; 32]) -> Option<Self>;

    /// Interprets a big-endian integer modulo the group order. Never fails.
    fn from_be_bytes_reduced(bytes: &[u8; 32]) -> Self;
}

/// An element of a prime-order group.
///
/// Equality must be well-defined for every element, the identity included.
pub trait GroupPoint: 'static + Debug + Copy + Eq + Send + Sync {
    /// The scalars acting on this group.
    type Scalar: GroupScalar;

    /// Lifts an x coordinate to the point with an even y coordinate.
    /// Returns `None` if there is no such point.
    fn from_x_only_bytes(bytes: &[u8; PUBLIC_KEY_SIZE]) -> Option<Self>;

    /// Serializes the x coordinate.
    fn to_x_only_bytes(&self) -> [u8; PUBLIC_KEY_SIZE];

    /// Serializes the point in the compressed form (y parity and the x coordinate).
    fn to_compressed_bytes(&self) -> [u8; COMPRESSED_POINT_SIZE];

    /// Returns `scalar * G`.
    fn mul_by_generator(scalar: &Self::Scalar) -> Self;

    /// Returns `sum(scalar_i * point_i)`; the identity for an empty list.
    fn multi_scalar_mul(pairs: &[(Self::Scalar, Self)]) -> Self;
}

/// Schnorr signature scheme parameters.
pub trait SchnorrParams: 'static + Debug + Clone + Copy + Send + Sync + PartialEq + Eq {
    /// The scalar type of the group.
    type Scalar: GroupScalar;
    /// The group the signatures live in.
    type Point: GroupPoint<Scalar = Self::Scalar>;

    /// The tag of the hash binding a signature to its nonce, public key and message.
    const CHALLENGE_TAG: &'static [u8];
    /// The tag of the hash deriving per-signature batch coefficients.
    const RANDOMIZER_TAG: &'static [u8];

    /// Domain-separated hash of the concatenation of `chunks`.
    ///
    /// Defaults to the BIP340 tagged hash, `SHA256(SHA256(tag) || SHA256(tag) || data)`.
    fn tagged_hash(tag: &[u8], chunks: &[&[u8]]) -> [u8; 32] {
        chunks
            .iter()
            .fold(TaggedHasher::new(tag), |digest, chunk| digest.chain_bytes(chunk))
            .finalize()
    }
}
