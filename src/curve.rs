//! Adapter to the secp256k1 backend.
//! The `elliptic_curve` traits are not quite stable yet,
//! so all the code touching them is kept here.

mod arithmetic;

pub use arithmetic::{Point, Scalar};
