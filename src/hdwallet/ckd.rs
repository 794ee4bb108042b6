/*
    This module implements child key deriveration
    from parent extended private and public keys
    under the BIP32 standard.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

use log::trace;

use crate::{
    hash::hmac_sha512,
    hdwallet::{
        ChildOptions,
        ExtendedKey, Xprv, Xpub
    },
    key::KeyError,
    util::try_into
};

/**
    Enum for handling deriveration errors.
    Indexes are nominal for the range errors and the attempted child number otherwise.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKeyError {
    IndexTooLarge(u32),
    IndexReserved(u32),
    CantHarden,
    InvalidTweak(u32),
    InvalidChildKey(u32),
    MaxDepthExceeded
}

/**
    Splits the HMAC-SHA512 output into the tweak (left 32 bytes)
    and the child chaincode (right 32 bytes).
*/
fn ckd_hmac(data: &[u8], chaincode: &[u8; 32]) -> ([u8; 32], [u8; 32]) {
    let hash: [u8; 64] = hmac_sha512(data, chaincode);
    let left_bytes: [u8; 32] = try_into(hash[0..32].to_vec());
    let child_chaincode: [u8; 32] = try_into(hash[32..64].to_vec());

    (left_bytes, child_chaincode)
}

fn tweak_error(index: u32) -> impl Fn(KeyError) -> ChildKeyError {
    move |e| match e {
        KeyError::InvalidTweak => ChildKeyError::InvalidTweak(index),
        _ => ChildKeyError::InvalidChildKey(index)
    }
}

/**
    Function to derive new child xprv keys from parent xprv keys.
*/
pub fn derive_xprv(parent: &Xprv, options: ChildOptions) -> Result<Xprv, ChildKeyError> {
    let index: u32 = options.child_number()?;
    let depth: u8 = parent.depth.checked_add(1).ok_or(ChildKeyError::MaxDepthExceeded)?;

    let mut data: Vec<u8> = Vec::with_capacity(37);
    match options {
        //Normal child is [parent pub bytes || index bytes]
        ChildOptions::Normal(_) => data.extend_from_slice(&parent.get_pub().as_bytes()),

        //Hardened child is [0x00 || parent priv bytes || index bytes]
        ChildOptions::Hardened(_) => {
            data.push(0x00);
            data.extend_from_slice(&parent.get_prv().as_bytes());
        }
    }
    data.extend_from_slice(&index.to_be_bytes());

    //Hash the data with the parent chaincode as the key
    let (left_bytes, child_chaincode) = ckd_hmac(&data, &parent.chaincode());

    //child key = (left bytes + parent key) mod n
    let child_key = parent.get_prv().add_tweak(&left_bytes).map_err(tweak_error(index))?;
    trace!("derived private child {} at depth {}", options, depth);

    Ok(
        Xprv::construct(
            child_key,
            child_chaincode,
            depth,
            parent.fingerprint(),
            index.to_be_bytes(),
            parent.network
        )
    )
}

/**
    Function to derive new child xpub keys from parent xpub keys.
    Hardened children cannot be derived from public keys.
*/
pub fn derive_xpub(parent: &Xpub, options: ChildOptions) -> Result<Xpub, ChildKeyError> {
    let index: u32 = options.child_number()?;
    if options.is_hardened() { return Err(ChildKeyError::CantHarden) }
    let depth: u8 = parent.depth.checked_add(1).ok_or(ChildKeyError::MaxDepthExceeded)?;

    let mut data: Vec<u8> = parent.get_pub().as_bytes().to_vec();
    data.extend_from_slice(&index.to_be_bytes());

    let (left_bytes, child_chaincode) = ckd_hmac(&data, &parent.chaincode());

    //child key = left bytes * G + parent key
    let child_key = parent.get_pub().add_exp_tweak(&left_bytes).map_err(tweak_error(index))?;
    trace!("derived public child {} at depth {}", options, depth);

    Ok(
        Xpub::construct(
            child_key,
            child_chaincode,
            depth,
            parent.fingerprint(),
            index.to_be_bytes(),
            parent.network
        )
    )
}
