/*
    This module implements hierarchical deterministic wallets
    under the BIP 32 standard.

    Address keys are derived along the fixed path
        m / purpose' / coin_type' / account' / chain / index

    Based on chapter 5 of the bitcoin book. (https://github.com/bitcoinbook/bitcoinbook/)
*/

pub mod ckd;
pub mod extended_keys;
pub mod path;
#[allow(clippy::module_inception)]
pub mod hdwallet;

pub use ckd::ChildKeyError;
pub use extended_keys::{
    ExtendedKey,
    Xprv,
    Xpub
};
pub use path::{
    ChildOptions,
    DerivationPath,
    Path,
    Segment,
    HARDENED_OFFSET,
    EXTERNAL_CHAIN,
    INTERNAL_CHAIN
};
pub use hdwallet::{
    AddressEntry,
    HDWallet,
    WalletType
};

use log::debug;

use crate::address::EncodingError;

/**
    Errors from parsing extended keys, seeds and path strings.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HDWError {
    BadChar(usize),
    BadKey,
    BadChecksum,
    BadPrefix([u8; 4]),
    BadPath(String),
    BadSeed(usize),
    Derivation(ChildKeyError)
}

impl From<ChildKeyError> for HDWError {
    fn from(e: ChildKeyError) -> Self {
        HDWError::Derivation(e)
    }
}

/**
    A failed walk along a derivation path.

    Names the full path, the segment that failed, the child that was attempted
    and the underlying reason.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationError {
    pub path: DerivationPath,
    pub segment: Segment,
    pub attempted: ChildOptions,
    pub reason: ChildKeyError
}

impl DerivationError {
    /**
        The wire index of the attempted child, if the nominal value was in range.
    */
    pub fn child_number(&self) -> Option<u32> {
        self.attempted.child_number().ok()
    }
}

/**
    Per index failure of a batch of addresses.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    Derivation(DerivationError),
    Encoding(EncodingError)
}

impl From<DerivationError> for AddressError {
    fn from(e: DerivationError) -> Self {
        AddressError::Derivation(e)
    }
}

impl From<EncodingError> for AddressError {
    fn from(e: EncodingError) -> Self {
        AddressError::Encoding(e)
    }
}

/**
    Derive the key at the given address path from the master key.

    Each segment is applied in order. Purpose, coin type and account are always hardened,
    chain and index never are. The first failing segment aborts the walk.
*/
pub fn derive<K: ExtendedKey>(master: &K, path: &DerivationPath) -> Result<K, DerivationError> {
    let mut key = master.clone();
    for (segment, child) in path.segments() {
        key = key.get_xchild(child).map_err(|reason| DerivationError {
            path: *path,
            segment,
            attempted: child,
            reason
        })?;
    }
    debug!("derived key at {}", path);

    Ok(key)
}

/**
    Same as derive() with the path given as its five nominal values.
*/
pub fn derive_at<K: ExtendedKey>(
    master: &K,
    purpose: u32,
    coin_type: u32,
    account: u32,
    chain: u32,
    index: u32
) -> Result<K, DerivationError> {
    derive(master, &DerivationPath::new(purpose, coin_type, account, chain, index))
}
