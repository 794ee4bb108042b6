/*
    This module implements the taproot output key tweak (BIP-341)
    used for single key (BIP-86) taproot outputs.

    Q = P + int(TapTweakHash(P_x || merkle_root))*G

    For BIP-86 outputs there is no script tree and the merkle root is empty.
*/

use crate::{
    hash::tagged_hash,
    key::{
        KeyError,
        SchnorrPublicKey
    }
};

pub trait TaprootTaggedHash {
    fn from_slice(slice: &[u8]) -> [u8; 32];
}

/// Macro to create tagged hash types
macro_rules! taproot_tagged_hashes {
    ($name: ident, $tag: expr) => {
        pub struct $name;

        impl TaprootTaggedHash for $name {
            fn from_slice(slice: &[u8]) -> [u8; 32] {
                tagged_hash($tag, slice)
            }
        }
    }
}

taproot_tagged_hashes!(TapTweakHash, "TapTweak");

impl TapTweakHash {
    /// Create the TapTweakHash from a schnorr public key and an optional
    /// script tree merkle root.
    pub fn from_key_and_tweak(key: &SchnorrPublicKey, merkle_root: Option<[u8; 32]>) -> [u8; 32] {
        let mut data = key.as_bytes().to_vec();
        if let Some(root) = merkle_root {
            data.extend_from_slice(&root);
        }
        TapTweakHash::from_slice(&data)
    }
}

impl SchnorrPublicKey {
    /**
        Tweak an internal key into a taproot output key.
    */
    pub fn tap_tweak(&self, merkle_root: Option<[u8; 32]>) -> Result<SchnorrPublicKey, KeyError> {
        let tweak = TapTweakHash::from_key_and_tweak(self, merkle_root);
        self.add_tweak(&tweak)
    }
}

/**
    Output key of a key path only taproot output.
*/
pub fn taproot_output_key(internal_key: &SchnorrPublicKey) -> Result<SchnorrPublicKey, KeyError> {
    internal_key.tap_tweak(None)
}
