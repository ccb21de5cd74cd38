//! Batch verification of Schnorr signatures.
//!
//! Instead of checking `s_i * G == R_i + e_i * P_i` for every signature,
//! a single combined equation is checked:
//!
//! `(sum a_i * s_i) * G == sum (a_i * R_i + (a_i * e_i) * P_i)`
//!
//! where the coefficients `a_i` are derived by hashing the signature, the message
//! and the public key (with `a_0 = 1`). Without the coefficients, two invalid signatures
//! could be crafted so that their errors cancel out in the sum.
//! The coefficients are derived deterministically rather than sampled from an RNG,
//! so the result depends only on the inputs.
//!
//! A failed batch does not tell which of the signatures is invalid;
//! callers needing that have to verify them one by one.

use alloc::{boxed::Box, vec::Vec};
use core::marker::PhantomData;

use derive_where::derive_where;

use crate::{
    error::InvalidInput,
    params::{Bip340, GroupPoint, GroupScalar, SchnorrParams, PUBLIC_KEY_SIZE, SIGNATURE_SIZE},
};

const SCALAR_SIZE: usize = SIGNATURE_SIZE - PUBLIC_KEY_SIZE;

/// Splits a signature into its nonce (x-only point) and scalar halves.
/// Returns `None` if the signature is not exactly [`SIGNATURE_SIZE`] bytes long.
pub(crate) fn split_signature(signature: &[u8]) -> Option<(&[u8; PUBLIC_KEY_SIZE], &[u8; SCALAR_SIZE])> {
    let (nonce, s) = signature.split_first_chunk::<PUBLIC_KEY_SIZE>()?;
    Some((nonce, s.try_into().ok()?))
}

/// A well-shaped (but not yet decoded) signed message.
#[derive(Debug, Clone, Copy)]
struct ItemRef<'a> {
    message: &'a [u8],
    public_key: &'a [u8; PUBLIC_KEY_SIZE],
    nonce: &'a [u8; PUBLIC_KEY_SIZE],
    s: &'a [u8; SCALAR_SIZE],
}

/// A signed message with all the values the batch equation needs.
#[derive_where(Debug, Clone, Copy)]
struct DecodedItem<P: SchnorrParams> {
    public_key: P::Point,
    nonce: P::Point,
    s: P::Scalar,
    challenge: P::Scalar,
    randomizer: P::Scalar,
}

impl<P: SchnorrParams> DecodedItem<P> {
    fn new(index: usize, item: &ItemRef<'_>) -> Option<Self> {
        let Some(public_key) = P::Point::from_x_only_bytes(item.public_key) else {
            tracing::trace!("Failed to decode a public key");
            return None;
        };
        let Some(nonce) = P::Point::from_x_only_bytes(item.nonce) else {
            tracing::trace!("Failed to decode a signature nonce");
            return None;
        };
        let Some(s) = P::Scalar::try_from_be_bytes(item.s) else {
            tracing::trace!("Signature scalar is out of range");
            return None;
        };

        let challenge = P::Scalar::from_be_bytes_reduced(&P::tagged_hash(
            P::CHALLENGE_TAG,
            &[&nonce.to_x_only_bytes(), &public_key.to_x_only_bytes(), item.message],
        ));

        // The first coefficient is fixed to 1, which excludes the trivial all-zero combination
        // and saves a multiplication.
        let randomizer = if index == 0 {
            P::Scalar::ONE
        } else {
            P::Scalar::from_be_bytes_reduced(&P::tagged_hash(
                P::RANDOMIZER_TAG,
                &[item.nonce, item.s, item.message, &public_key.to_compressed_bytes()],
            ))
        };

        Some(Self {
            public_key,
            nonce,
            s,
            challenge,
            randomizer,
        })
    }
}

fn verify_items<P: SchnorrParams>(items: &[ItemRef<'_>]) -> bool {
    tracing::debug!(batch_size = items.len(), "Verifying a batch of Schnorr signatures");

    // Any decoding failure makes the whole batch invalid, without saying which item failed.
    let Some(decoded) = items
        .iter()
        .enumerate()
        .map(|(index, item)| DecodedItem::<P>::new(index, item))
        .collect::<Option<Vec<_>>>()
    else {
        return false;
    };

    let s_combined = decoded
        .iter()
        .map(|item| item.randomizer * item.s)
        .sum::<P::Scalar>();
    let lhs = P::Point::mul_by_generator(&s_combined);

    let pairs = decoded
        .iter()
        .flat_map(|item| {
            [
                (item.randomizer, item.nonce),
                (item.randomizer * item.challenge, item.public_key),
            ]
        })
        .collect::<Vec<_>>();
    let rhs = P::Point::multi_scalar_mul(&pairs);

    let verified = lhs == rhs;
    tracing::trace!(verified, "Evaluated the batch equation");
    verified
}

fn check_shapes<'a, M, K, S>(
    messages: &'a [M],
    pubkeys: &'a [K],
    signatures: &'a [S],
) -> Result<Vec<ItemRef<'a>>, InvalidInput>
where
    M: AsRef<[u8]>,
    K: AsRef<[u8]>,
    S: AsRef<[u8]>,
{
    if messages.len() != pubkeys.len() || messages.len() != signatures.len() {
        return Err(InvalidInput::LengthMismatch {
            messages: messages.len(),
            pubkeys: pubkeys.len(),
            signatures: signatures.len(),
        });
    }

    let pubkeys = pubkeys
        .iter()
        .enumerate()
        .map(|(index, pubkey)| {
            let pubkey = pubkey.as_ref();
            <&[u8; PUBLIC_KEY_SIZE]>::try_from(pubkey).map_err(|_| InvalidInput::PublicKeyLength {
                index,
                length: pubkey.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let signatures = signatures
        .iter()
        .enumerate()
        .map(|(index, signature)| {
            let signature = signature.as_ref();
            split_signature(signature).ok_or(InvalidInput::SignatureLength {
                index,
                length: signature.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(messages
        .iter()
        .zip(pubkeys)
        .zip(signatures)
        .map(|((message, public_key), (nonce, s))| ItemRef {
            message: message.as_ref(),
            public_key,
            nonce,
            s,
        })
        .collect())
}

/// Verifies a batch of Schnorr signatures with the given scheme parameters.
///
/// `messages[i]` is expected to be signed by `pubkeys[i]` (an x-only key, [`PUBLIC_KEY_SIZE`] bytes)
/// with `signatures[i]` ([`SIGNATURE_SIZE`] bytes).
///
/// Returns `Ok(true)` if the batch is valid (an empty batch is valid),
/// `Ok(false)` if the batch equation does not hold or any key or signature fails to decode,
/// and an error if the arguments are malformed.
pub fn verify_batch<P, M, K, S>(messages: &[M], pubkeys: &[K], signatures: &[S]) -> Result<bool, InvalidInput>
where
    P: SchnorrParams,
    M: AsRef<[u8]>,
    K: AsRef<[u8]>,
    S: AsRef<[u8]>,
{
    let items = check_shapes(messages, pubkeys, signatures)?;
    Ok(verify_items::<P>(&items))
}

/// Verifies a batch of BIP340 signatures. See [`verify_batch`] for details.
pub fn verify<M, K, S>(messages: &[M], pubkeys: &[K], signatures: &[S]) -> Result<bool, InvalidInput>
where
    M: AsRef<[u8]>,
    K: AsRef<[u8]>,
    S: AsRef<[u8]>,
{
    verify_batch::<Bip340, _, _, _>(messages, pubkeys, signatures)
}

/// A signed message that owns its data, to be queued in a [`BatchVerifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    message: Box<[u8]>,
    public_key: [u8; PUBLIC_KEY_SIZE],
    nonce: [u8; PUBLIC_KEY_SIZE],
    s: [u8; SCALAR_SIZE],
}

impl BatchItem {
    /// Creates a new item, checking the sizes of the public key and the signature.
    ///
    /// The error refers to the item as index 0.
    pub fn new(
        message: impl AsRef<[u8]>,
        public_key: impl AsRef<[u8]>,
        signature: impl AsRef<[u8]>,
    ) -> Result<Self, InvalidInput> {
        let public_key = public_key.as_ref();
        let public_key =
            <[u8; PUBLIC_KEY_SIZE]>::try_from(public_key).map_err(|_| InvalidInput::PublicKeyLength {
                index: 0,
                length: public_key.len(),
            })?;

        let signature = signature.as_ref();
        let (nonce, s) = split_signature(signature).ok_or(InvalidInput::SignatureLength {
            index: 0,
            length: signature.len(),
        })?;

        Ok(Self {
            message: message.as_ref().into(),
            public_key,
            nonce: *nonce,
            s: *s,
        })
    }

    fn as_item_ref(&self) -> ItemRef<'_> {
        ItemRef {
            message: &self.message,
            public_key: &self.public_key,
            nonce: &self.nonce,
            s: &self.s,
        }
    }
}

/// An accumulator of signed messages to be verified together.
///
/// Shapes are checked when items are created, so the verification itself cannot fail
/// with an error. The result is the same as [`verify_batch`] over the queued items in queue order.
#[derive_where(Debug, Clone, Default)]
pub struct BatchVerifier<P: SchnorrParams = Bip340> {
    items: Vec<BatchItem>,
    phantom: PhantomData<P>,
}

impl<P: SchnorrParams> BatchVerifier<P> {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Adds an item to the batch.
    pub fn queue(&mut self, item: BatchItem) {
        self.items.push(item);
    }

    /// The number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if all the queued signatures are valid (or if the batch is empty).
    pub fn verify(&self) -> bool {
        let items = self.items.iter().map(BatchItem::as_item_ref).collect::<Vec<_>>();
        verify_items::<P>(&items)
    }
}
