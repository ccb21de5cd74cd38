use alloc::vec::Vec;
use core::ops::{Add, Mul, Neg, Sub};

use elliptic_curve::{
    bigint::U256, // Note that this type is different from typenum::U256
    ops::{LinearCombinationExt, Reduce},
    point::{AffineCoordinates, DecompressPoint},
    subtle::Choice,
    PrimeField,
};
use k256::{AffinePoint, FieldBytes};

#[cfg(any(test, feature = "dev"))]
use rand_core::CryptoRngCore;

use crate::params::{GroupPoint, GroupScalar, COMPRESSED_POINT_SIZE, PUBLIC_KEY_SIZE};

type BackendScalar = k256::Scalar;
type BackendPoint = k256::ProjectivePoint;

/// An integer modulo the order of the secp256k1 group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Scalar(BackendScalar);

impl Scalar {
    /// The additive identity.
    pub const ZERO: Self = Self(BackendScalar::ZERO);
    /// The multiplicative identity.
    pub const ONE: Self = Self(BackendScalar::ONE);

    #[cfg(any(test, feature = "dev"))]
    pub(crate) fn random_nonzero(rng: &mut impl CryptoRngCore) -> Self {
        Self(*k256::NonZeroScalar::random(rng).as_ref())
    }

    /// Parses a big-endian integer, failing if it is not below the group order.
    pub fn try_from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Option::from(BackendScalar::from_repr(FieldBytes::from(*bytes))).map(Self)
    }

    /// Interprets a big-endian integer (e.g. a hash digest) modulo the group order.
    pub fn from_be_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self(<BackendScalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*bytes)))
    }

    /// Serializes into a big-endian integer.
    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.0.to_bytes());
        bytes
    }

    /// Returns `true` if this is the zero scalar.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    fn to_backend(self) -> BackendScalar {
        self.0
    }
}

impl GroupScalar for Scalar {
    const ONE: Self = Scalar::ONE;

    fn try_from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::try_from_be_bytes(bytes)
    }

    fn from_be_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self::from_be_bytes_reduced(bytes)
    }
}

/// An element of the secp256k1 group, including the point at infinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point(BackendPoint);

impl Point {
    /// The standard generator.
    pub const GENERATOR: Self = Self(BackendPoint::GENERATOR);

    /// The point at infinity.
    pub const IDENTITY: Self = Self(BackendPoint::IDENTITY);

    /// Lifts an x coordinate to the point with an even y coordinate.
    ///
    /// Fails if the x coordinate is not below the field modulus,
    /// or if there is no curve point with this x coordinate.
    pub fn from_x_only_bytes(bytes: &[u8; PUBLIC_KEY_SIZE]) -> Option<Self> {
        let x = FieldBytes::from(*bytes);
        let affine: Option<AffinePoint> = AffinePoint::decompress(&x, Choice::from(0)).into();
        affine.map(|point| Self(point.into()))
    }

    /// Serializes the x coordinate of the point.
    ///
    /// The point at infinity is serialized as all zeros.
    pub fn to_x_only_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(&self.0.to_affine().x());
        bytes
    }

    /// Serializes the point in SEC1 compressed form (parity byte followed by the x coordinate).
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        let affine = self.0.to_affine();
        let mut bytes = [0u8; COMPRESSED_POINT_SIZE];
        let (tag, x) = bytes.split_at_mut(1);
        tag.fill(0x02 | affine.y_is_odd().unwrap_u8());
        x.copy_from_slice(&affine.x());
        bytes
    }

    /// Returns `true` if the affine y coordinate is even.
    pub fn has_even_y(&self) -> bool {
        !bool::from(self.0.to_affine().y_is_odd())
    }

    /// Returns `true` if this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self == &Self::IDENTITY
    }

    /// Returns `scalar * G`.
    pub fn mul_by_generator(scalar: &Scalar) -> Self {
        Self::GENERATOR * scalar
    }

    /// Returns `sum(scalar_i * point_i)`, the identity for an empty list.
    pub fn multi_scalar_mul(pairs: &[(Scalar, Point)]) -> Self {
        let backend_pairs = pairs
            .iter()
            .map(|(scalar, point)| (point.to_backend(), scalar.to_backend()))
            .collect::<Vec<_>>();
        Self(BackendPoint::lincomb_ext(backend_pairs.as_slice()))
    }

    fn to_backend(self) -> BackendPoint {
        self.0
    }
}

impl GroupPoint for Point {
    type Scalar = Scalar;

    fn from_x_only_bytes(bytes: &[u8; PUBLIC_KEY_SIZE]) -> Option<Self> {
        Self::from_x_only_bytes(bytes)
    }

    fn to_x_only_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        Self::to_x_only_bytes(self)
    }

    fn to_compressed_bytes(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        Self::to_compressed_bytes(self)
    }

    fn mul_by_generator(scalar: &Scalar) -> Self {
        Self::mul_by_generator(scalar)
    }

    fn multi_scalar_mul(pairs: &[(Scalar, Self)]) -> Self {
        Self::multi_scalar_mul(pairs)
    }
}

impl Neg for Scalar {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: Scalar) -> Scalar {
        Scalar(self.0.add(&other.0))
    }
}

impl Sub<Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: Scalar) -> Scalar {
        Scalar(self.0.sub(&other.0))
    }
}

impl Mul<Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: Scalar) -> Scalar {
        Scalar(self.0.mul(&other.0))
    }
}

impl Add<Point> for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point(self.0.add(&other.0))
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point(self.0.sub(&other.0))
    }
}

impl Mul<&Scalar> for Point {
    type Output = Point;

    fn mul(self, other: &Scalar) -> Point {
        Point(self.0.mul(&other.0))
    }
}

impl Mul<&Scalar> for &Point {
    type Output = Point;

    fn mul(self, other: &Scalar) -> Point {
        Point(self.0.mul(&other.0))
    }
}

impl core::iter::Sum for Scalar {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add).unwrap_or(Self::ZERO)
    }
}

impl core::iter::Sum for Point {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add).unwrap_or(Self::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rand_core::OsRng;

    use super::{Point, Scalar};

    // secp256k1 group order and field modulus
    const ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xBA, 0xAE,
        0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
    ];
    const MODULUS: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFC, 0x2F,
    ];

    #[test]
    fn checked_scalar_decoding_rejects_the_order() {
        assert!(Scalar::try_from_be_bytes(&ORDER).is_none());
        assert!(Scalar::try_from_be_bytes(&[0xFF; 32]).is_none());

        let mut below = ORDER;
        below[31] -= 1;
        assert_eq!(Scalar::try_from_be_bytes(&below), Some(-Scalar::ONE));
        assert_eq!(Scalar::try_from_be_bytes(&[0; 32]), Some(Scalar::ZERO));
    }

    #[test]
    fn wrapping_scalar_decoding_reduces() {
        assert_eq!(Scalar::from_be_bytes_reduced(&ORDER), Scalar::ZERO);

        let mut above = ORDER;
        above[31] += 1;
        assert_eq!(Scalar::from_be_bytes_reduced(&above), Scalar::ONE);
    }

    #[test]
    fn x_only_decoding() {
        let generator_x = Point::GENERATOR.to_x_only_bytes();
        assert_eq!(Point::from_x_only_bytes(&generator_x), Some(Point::GENERATOR));

        // An x coordinate equal to the field modulus is out of range.
        assert!(Point::from_x_only_bytes(&MODULUS).is_none());

        // x = 0 is not on the curve (7 is not a square modulo p).
        assert!(Point::from_x_only_bytes(&[0; 32]).is_none());
    }

    #[test]
    fn x_only_decoding_picks_even_y() {
        for _ in 0..16 {
            let point = Point::mul_by_generator(&Scalar::random_nonzero(&mut OsRng));
            let lifted = Point::from_x_only_bytes(&point.to_x_only_bytes()).unwrap();
            assert!(lifted.has_even_y());
            if point.has_even_y() {
                assert_eq!(lifted, point);
            } else {
                assert_eq!(lifted, Point::IDENTITY - point);
            }
        }
    }

    #[test]
    fn compressed_encoding() {
        let point = Point::mul_by_generator(&Scalar::random_nonzero(&mut OsRng));
        let compressed = point.to_compressed_bytes();
        let expected_tag = if point.has_even_y() { 0x02 } else { 0x03 };
        assert_eq!(compressed[0], expected_tag);
        assert_eq!(compressed[1..], point.to_x_only_bytes());
    }

    #[test]
    fn empty_sums_are_identities() {
        assert_eq!(core::iter::empty::<Scalar>().sum::<Scalar>(), Scalar::ZERO);
        assert_eq!(Point::mul_by_generator(&Scalar::ZERO), Point::IDENTITY);
        assert_eq!(Point::multi_scalar_mul(&[]), Point::IDENTITY);
    }

    fn random_pairs(size: usize) -> Vec<(Scalar, Point)> {
        (0..size)
            .map(|_| {
                let scalar = Scalar::random_nonzero(&mut OsRng);
                let point = Point::mul_by_generator(&Scalar::random_nonzero(&mut OsRng));
                (scalar, point)
            })
            .collect()
    }

    #[test]
    fn multi_scalar_mul_matches_naive_sum() {
        for size in [1, 2, 3, 7, 32] {
            let pairs = random_pairs(size);
            let expected = pairs.iter().map(|(scalar, point)| point * scalar).sum::<Point>();
            assert_eq!(Point::multi_scalar_mul(&pairs), expected);
        }
    }

    #[test]
    fn multi_scalar_mul_edge_scalars() {
        let point = Point::mul_by_generator(&Scalar::random_nonzero(&mut OsRng));

        assert_eq!(Point::multi_scalar_mul(&[(Scalar::ZERO, point)]), Point::IDENTITY);
        assert_eq!(Point::multi_scalar_mul(&[(Scalar::ONE, point)]), point);
        assert_eq!(
            Point::multi_scalar_mul(&[(-Scalar::ONE, point)]),
            Point::IDENTITY - point
        );
        assert_eq!(
            Point::multi_scalar_mul(&[(Scalar::ONE, point), (-Scalar::ONE, point)]),
            Point::IDENTITY
        );
    }

    #[test]
    fn multi_scalar_mul_absorbs_identity_points() {
        let mut pairs = random_pairs(3);
        let expected = Point::multi_scalar_mul(&pairs);
        pairs.push((Scalar::random_nonzero(&mut OsRng), Point::IDENTITY));
        assert_eq!(Point::multi_scalar_mul(&pairs), expected);
    }
}
