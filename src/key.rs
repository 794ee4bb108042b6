/*
    Wrappers around secp256k1 keys.

    PrivKey and PubKey are the ECDSA style keys used by BIP-32 derivation.
    SchnorrPublicKey is the 32 byte x-only key used by taproot.
*/

use crate::{
    Secp256k1,
    PublicKey,
    SecretKey,
    XOnlyPublicKey,
    Scalar,
    encoding::base58::Base58,
    hash,
    network::Network,
    util::encode_02x
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    BadSlice(usize),
    InvalidKey,
    InvalidTweak
}

pub trait Key {
    /**
        Use a predefined byte array as a key.
    */
    fn from_slice(byte_array: &[u8]) -> Result<Self, KeyError>
    where Self: Sized;

    /**
        Serialized key bytes.
        32 bytes for private keys, 33 for compressed public keys.
    */
    fn to_bytes(&self) -> Vec<u8>;

    fn hex(&self) -> String {
        encode_02x(&self.to_bytes())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivKey(SecretKey);

//Never print secret material
impl std::fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivKey(..)")
    }
}

impl PrivKey {
    pub fn as_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    /**
        Returns (self + tweak) mod n.

        Fails if the tweak is not smaller than the curve order or
        if the sum is zero.
    */
    pub fn add_tweak(&self, tweak: &[u8; 32]) -> Result<Self, KeyError> {
        let scalar = Scalar::from_be_bytes(*tweak).map_err(|_| KeyError::InvalidTweak)?;
        let tweaked = self.0.add_tweak(&scalar).map_err(|_| KeyError::InvalidKey)?;

        Ok(Self(tweaked))
    }

    /*
        Export the private key in wallet-import-format (Base58Check encoded with prefix)
        for a compressed public key.
    */
    pub fn export_as_wif(&self, network: Network) -> String {
        let mut key: Vec<u8> = self.as_bytes().to_vec();
        key.push(0x01);

        Base58::new(&[network.params().wif_prefix], &key).check_encode()
    }
}

impl Key for PrivKey {
    fn from_slice(byte_array: &[u8]) -> Result<Self, KeyError> {
        if byte_array.len() != 32 { return Err(KeyError::BadSlice(byte_array.len())) }
        match SecretKey::from_slice(byte_array) {
            Ok(x) => Ok(Self(x)),
            Err(_) => Err(KeyError::InvalidKey)
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PubKey(PublicKey);

impl PubKey {
    /**
        Finds the public key of a secret key.

        Is the result of the point G on the secp256k1 curve multipled k times, where k is the private key.
    */
    pub fn from_priv_key(k: &PrivKey) -> Self {
        Self(PublicKey::from_secret_key(&Secp256k1::new(), &k.0))
    }

    /**
        Returns the compressed public key (0x02/0x03 prefix and x coordinate)
    */
    pub fn as_bytes(&self) -> [u8; 33] {
        self.0.serialize()
    }

    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(self.as_bytes())
    }

    /**
        Returns self + tweak*G.
        Used for non-hardened derivation from public parents.
    */
    pub fn add_exp_tweak(&self, tweak: &[u8; 32]) -> Result<Self, KeyError> {
        let scalar = Scalar::from_be_bytes(*tweak).map_err(|_| KeyError::InvalidTweak)?;
        let tweaked = self.0.add_exp_tweak(&Secp256k1::new(), &scalar).map_err(|_| KeyError::InvalidKey)?;

        Ok(Self(tweaked))
    }

    /**
        The x-only key of self, for use in taproot.
    */
    pub fn schnorr(&self) -> SchnorrPublicKey {
        SchnorrPublicKey(self.0.x_only_public_key().0)
    }
}

impl Key for PubKey {
    /**
        Accepts compressed (33 byte) or uncompressed (65 byte) serializations.
    */
    fn from_slice(byte_array: &[u8]) -> Result<Self, KeyError> {
        if byte_array.len() != 33 && byte_array.len() != 65 { return Err(KeyError::BadSlice(byte_array.len())) }
        match PublicKey::from_slice(byte_array) {
            Ok(x) => Ok(Self(x)),
            Err(_) => Err(KeyError::InvalidKey)
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchnorrPublicKey(XOnlyPublicKey);

impl SchnorrPublicKey {
    pub fn as_bytes(&self) -> [u8; 32] {
        self.0.serialize()
    }

    /**
        Returns the x-only key of P + tweak*G, where P is the even y point of self.
    */
    pub fn add_tweak(&self, tweak: &[u8; 32]) -> Result<Self, KeyError> {
        let scalar = Scalar::from_be_bytes(*tweak).map_err(|_| KeyError::InvalidTweak)?;
        let (tweaked, _parity) = self.0.add_tweak(&Secp256k1::new(), &scalar).map_err(|_| KeyError::InvalidKey)?;

        Ok(Self(tweaked))
    }
}

impl Key for SchnorrPublicKey {
    fn from_slice(byte_array: &[u8]) -> Result<Self, KeyError> {
        if byte_array.len() != 32 { return Err(KeyError::BadSlice(byte_array.len())) }
        match XOnlyPublicKey::from_slice(byte_array) {
            Ok(x) => Ok(Self(x)),
            Err(_) => Err(KeyError::InvalidKey)
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}
