/*
    This module contains the default imports for the library.

    Import the library using:
        use hdaddr::prelude::*;
    to quickly import the essential parts of the library.
*/

pub use crate::{

    key::{
        PubKey,
        PrivKey,
        SchnorrPublicKey,
        Key
    },

    address::{
        Address,
        EncodingError,
        Payload,
        encode,
        encode_legacy,
        encode_nested_segwit,
        encode_native_segwit,
        encode_taproot
    },

    hdwallet::{
        derive,
        derive_at,
        AddressEntry,
        AddressError,
        ChildKeyError,
        ChildOptions,
        DerivationError,
        DerivationPath,
        ExtendedKey,
        HDWallet,
        HDWError,
        Path,
        Segment,
        WalletType,
        Xprv, Xpub,
        EXTERNAL_CHAIN,
        INTERNAL_CHAIN
    },

    network::Network,

    util::encode_02x,

    script::RedeemScript

};
