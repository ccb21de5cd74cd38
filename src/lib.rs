#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    missing_docs,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::indexing_slicing))]

/*!
## Features

`std`: implements `std::error::Error` for [`InvalidInput`].

`dev`: BIP340 signing and single-signature verification for generating and cross-checking
test data. See the [`dev`] module.
*/

extern crate alloc;

mod batch;
mod curve;
mod error;
mod params;
mod tools;

#[cfg(any(test, feature = "dev"))]
pub mod dev;

pub use batch::{verify, verify_batch, BatchItem, BatchVerifier};
pub use curve::{Point, Scalar};
pub use error::InvalidInput;
pub use params::{
    Bip340, GroupPoint, GroupScalar, SchnorrParams, COMPRESSED_POINT_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE,
};
