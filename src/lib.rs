/*
    Library to derive deterministic keys and addresses for Bitcoin.

    A BIP-32 master private key is walked down the path
        m / purpose' / coin_type' / account' / chain / index
    and the resulting public key is encoded as one of the four
    single key output types:
        - legacy        P2PKH        (purpose 44)
        - nested segwit P2SH-P2WPKH  (purpose 49)
        - native segwit P2WPKH       (purpose 84)
        - taproot       P2TR         (purpose 86)

    References:
        - The Bitcoin Book (https://github.com/bitcoinbook/bitcoinbook/)
            most of the general concepts come from here

        - learn me a bitcoin (https://learnmeabitcoin.com/)
            for great visualisation of the concepts inroduced in the book

        - BIP-32, BIP-44, BIP-49, BIP-84, BIP-86, BIP-173, BIP-341 and BIP-350
*/

//Outward facing modules
pub mod key;
pub mod address;
pub mod hdwallet;
pub mod network;
pub mod script;
pub mod taproot;
pub mod encoding;
pub mod prelude;
pub mod util;

//Modules for internal use
mod hash;
mod impls;

//Dependencies
use secp256k1::{PublicKey, Secp256k1, SecretKey, XOnlyPublicKey, Scalar};
use hmac::{Mac, NewMac, Hmac};
use sha2::{Sha256, Sha512, Digest};
use ripemd160::Ripemd160;
