//! Development tooling: BIP340 signing and one-by-one verification.
//!
//! These are used to produce test data for the batch verifier and to check it against,
//! and are not intended for production use (in particular, signing is not constant-time).

use rand_core::CryptoRngCore;

use crate::{
    batch::split_signature,
    curve::{Point, Scalar},
    params::{Bip340, SchnorrParams, PUBLIC_KEY_SIZE, SIGNATURE_SIZE},
    tools::hashing::{Chain, TaggedHasher},
};

const AUX_TAG: &[u8] = b"BIP0340/aux";
const NONCE_TAG: &[u8] = b"BIP0340/nonce";

/// Generates a random secret key.
pub fn random_secret_key(rng: &mut impl CryptoRngCore) -> [u8; 32] {
    Scalar::random_nonzero(rng).to_be_bytes()
}

/// Returns the x-only public key for a secret key,
/// or `None` if the secret key is zero or not below the group order.
pub fn x_only_public_key(secret_key: &[u8; 32]) -> Option<[u8; PUBLIC_KEY_SIZE]> {
    let secret = Scalar::try_from_be_bytes(secret_key).filter(|secret| !secret.is_zero())?;
    Some(Point::mul_by_generator(&secret).to_x_only_bytes())
}

fn challenge(nonce: &[u8; PUBLIC_KEY_SIZE], public_key: &[u8; PUBLIC_KEY_SIZE], message: &[u8]) -> Scalar {
    Scalar::from_be_bytes_reduced(&Bip340::tagged_hash(
        Bip340::CHALLENGE_TAG,
        &[nonce, public_key, message],
    ))
}

/// Signs a message as specified by BIP340.
///
/// Returns `None` if the secret key is zero or not below the group order,
/// or (with negligible probability) if the derived nonce is zero.
pub fn sign(secret_key: &[u8; 32], message: &[u8], aux_rand: &[u8; 32]) -> Option<[u8; SIGNATURE_SIZE]> {
    let secret = Scalar::try_from_be_bytes(secret_key).filter(|secret| !secret.is_zero())?;
    let public = Point::mul_by_generator(&secret);
    let secret = if public.has_even_y() { secret } else { -secret };
    let public_key = public.to_x_only_bytes();

    let mut masked_secret = TaggedHasher::new(AUX_TAG).chain_bytes(aux_rand).finalize();
    for (masked, byte) in masked_secret.iter_mut().zip(secret.to_be_bytes()) {
        *masked ^= byte;
    }

    let nonce_seed = TaggedHasher::new(NONCE_TAG)
        .chain_bytes(&masked_secret)
        .chain_bytes(&public_key)
        .chain_bytes(message)
        .finalize();
    let k = Some(Scalar::from_be_bytes_reduced(&nonce_seed)).filter(|k| !k.is_zero())?;
    let commitment = Point::mul_by_generator(&k);
    let k = if commitment.has_even_y() { k } else { -k };
    let nonce = commitment.to_x_only_bytes();

    let e = challenge(&nonce, &public_key, message);
    let s = k + e * secret;

    let mut signature = [0u8; SIGNATURE_SIZE];
    let (nonce_half, s_half) = signature.split_at_mut(PUBLIC_KEY_SIZE);
    nonce_half.copy_from_slice(&nonce);
    s_half.copy_from_slice(&s.to_be_bytes());
    Some(signature)
}

/// Verifies a single signature as specified by BIP340.
pub fn verify_single(message: &[u8], public_key: &[u8; PUBLIC_KEY_SIZE], signature: &[u8; SIGNATURE_SIZE]) -> bool {
    let Some(public) = Point::from_x_only_bytes(public_key) else {
        return false;
    };
    let Some((nonce, s)) = split_signature(signature) else {
        return false;
    };
    let Some(s) = Scalar::try_from_be_bytes(s) else {
        return false;
    };

    let e = challenge(nonce, public_key, message);
    let commitment = Point::mul_by_generator(&s) - public * &e;

    // An out-of-range `nonce` can never match the x coordinate of a point.
    !commitment.is_identity() && commitment.has_even_y() && &commitment.to_x_only_bytes() == nonce
}
