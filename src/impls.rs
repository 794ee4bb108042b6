/**
    This module combines all the boilerplate
    implementations of fmt::Display and std::error::Error.
*/

use crate::{
    address::{
        Address,
        EncodingError
    },
    encoding::{
        base58::Base58Error,
        bech32::Bech32Err
    },
    hdwallet::{
        AddressError,
        ChildKeyError,
        DerivationError,
        ExtendedKey,
        HDWError,
        WalletType,
        Xprv,
        Xpub
    },
    key::{
        Key,
        KeyError,
        PubKey,
        SchnorrPublicKey
    },
    network::Network
};
use std::{
    error::Error,
    fmt
};

/*
    key module impls
*/
impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl fmt::Display for SchnorrPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BadSlice(x) => write!(f, "bad key length: {} bytes", x),
            Self::InvalidKey => write!(f, "invalid key"),
            Self::InvalidTweak => write!(f, "tweak is not below the curve order")
        }
    }
}

impl Error for KeyError {}

/*
    network module impls
*/
impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.params().name)
    }
}

/*
    encoding module impls
*/
impl fmt::Display for Base58Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BadChar(c, i) => write!(f, "bad base58 character '{}' at {}", c, i),
            Self::NonAscii(i) => write!(f, "non ascii character at {}", i),
            Self::TooShort(x) => write!(f, "{} bytes is too short for base58check", x),
            Self::BadChecksum => write!(f, "bad base58check checksum"),
            Self::Other(x) => write!(f, "{}", x)
        }
    }
}

impl Error for Base58Error {}

impl fmt::Display for Bech32Err {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BadHrp(x) => write!(f, "unexpected human readable part: {}", x),
            Self::BadVersion(x) => write!(f, "bad witness version: {}", x),
            Self::BadVariant => write!(f, "checksum variant does not match witness version"),
            Self::InvalidLength(x) => write!(f, "invalid witness program length: {}", x),
            Self::InvalidData(x) => write!(f, "{}", x)
        }
    }
}

impl Error for Bech32Err {}

/*
    address module impls
*/
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            WalletType::P2PKH => "legacy (P2PKH)",
            WalletType::P2SH_P2WPKH => "nested segwit (P2SH-P2WPKH)",
            WalletType::P2WPKH => "native segwit (P2WPKH)",
            WalletType::P2TR => "taproot (P2TR)"
        };

        write!(f, "{}", name)
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidPublicKey(x) => write!(f, "{}: invalid public key", x),
            Self::InvalidTweak(x) => write!(f, "{}: invalid taproot tweak", x),
            Self::Bech32(e) => write!(f, "bech32: {}", e),
            Self::BadNetwork(x) => write!(f, "address belongs to another network: {}", x),
            Self::BadPayload(x) => write!(f, "bad address payload: {}", x),
            Self::BadChecksum => write!(f, "bad address checksum")
        }
    }
}

impl Error for EncodingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bech32(e) => Some(e),
            _ => None
        }
    }
}

/*
    hdwallet module impls
*/
impl fmt::Display for Xprv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl fmt::Display for Xpub {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl fmt::Display for ChildKeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::IndexTooLarge(x) => write!(f, "index {} is too large to harden", x),
            Self::IndexReserved(x) => write!(f, "index {} is reserved for hardened children", x),
            Self::CantHarden => write!(f, "cannot produce hardened child public key"),
            Self::InvalidTweak(x) => write!(f, "tweak of child {} is not below the curve order", x),
            Self::InvalidChildKey(x) => write!(f, "child {} is an invalid key", x),
            Self::MaxDepthExceeded => write!(f, "maximum depth exceeded")
        }
    }
}

impl Error for ChildKeyError {}

impl fmt::Display for HDWError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BadChar(x) => write!(f, "bad character at {}", x),
            Self::BadKey => write!(f, "bad extended key"),
            Self::BadChecksum => write!(f, "bad extended key checksum"),
            Self::BadPrefix(x) => write!(f, "unknown version bytes {:02x?}", x),
            Self::BadPath(x) => write!(f, "bad derivation path: {}", x),
            Self::BadSeed(x) => write!(f, "seed must be 16 to 64 bytes, got {}", x),
            Self::Derivation(e) => write!(f, "{}", e)
        }
    }
}

impl Error for HDWError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Derivation(e) => Some(e),
            _ => None
        }
    }
}

impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "derivation of {} failed at {} {}: {}", self.path, self.segment, self.attempted, self.reason)
    }
}

impl Error for DerivationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.reason)
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Derivation(e) => write!(f, "{}", e),
            Self::Encoding(e) => write!(f, "{}", e)
        }
    }
}

impl Error for AddressError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Derivation(e) => Some(e),
            Self::Encoding(e) => Some(e)
        }
    }
}
