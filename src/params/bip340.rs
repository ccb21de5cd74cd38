//! Scheme parameters for BIP340 over the secp256k1 curve (as implemented by [`k256`]).

use super::traits::SchnorrParams;
use crate::curve::{Point, Scalar};

/// Schnorr signatures and batch verification as specified in
/// [BIP340](https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bip340;

impl SchnorrParams for Bip340 {
    type Scalar = Scalar;
    type Point = Point;
    const CHALLENGE_TAG: &'static [u8] = b"BIP0340/challenge";
    const RANDOMIZER_TAG: &'static [u8] = b"BIP0340/batch_verify_randomize";
}
