/*
    Module that bundles together the text encodings used for
    bitcoin addresses and extended keys.
*/

pub mod base58;
pub mod bech32;
