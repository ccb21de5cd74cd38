mod bip340;
mod traits;

pub use bip340::Bip340;
pub use traits::{GroupPoint, GroupScalar, SchnorrParams, COMPRESSED_POINT_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
