/*
    This module implements extended keys that are
    used in BIP32 hierarchal deterministic wallets.

    An extended key is a key together with a 32 byte chaincode and
    the metadata that places it in the derivation tree.

    Serialized form (78 bytes, then Base58Check encoded):
        version(4) | depth(1) | parent fingerprint(4) | child number(4) | chaincode(32) | key(33)
*/

use std::str::FromStr;

use crate::{
    key::{
        Key,
        PrivKey,
        PubKey
    },
    encoding::base58::{
        Base58,
        Base58Error
    },
    hdwallet::{
        ckd::{
            derive_xprv,
            derive_xpub
        },
        ChildKeyError,
        ChildOptions,
        HDWError,
        Path
    },
    hash,
    network::Network,
    util::{
        try_into,
        as_u32_be
    }
};

const SERIALIZED_LEN: usize = 78;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xprv {
    key: PrivKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: [u8; 4],
    pub network: Network
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xpub {
    key: PubKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: [u8; 4],
    pub network: Network
}

pub trait ExtendedKey: Sized + Clone {
    /**
        Returns the chaincode (right 32 bytes) of the extended key
    */
    fn chaincode(&self) -> [u8; 32];

    /**
        Derives the child key of self
    */
    fn get_xchild(&self, options: ChildOptions) -> Result<Self, ChildKeyError>;

    /**
        Return the non extended public key of self.
    */
    fn get_pub(&self) -> PubKey;

    /**
        Serialize the extended key with the version bytes of its network
    */
    fn serialize(&self) -> String;

    /**
        First four bytes of the Hash160 of the public key.
        Children store this as their parent fingerprint.
    */
    fn fingerprint(&self) -> [u8; 4] {
        try_into(hash::hash160(self.get_pub().as_bytes())[0..4].to_vec())
    }

    /**
        Derive the key at the given path, one child at a time.
        eg. [44', 0', 0', 0] would represent the path m/44'/0'/0'/0
    */
    fn derive_from_path(&self, path: &Path) -> Result<Self, ChildKeyError> {
        path.children.iter().try_fold(self.clone(), |key, child| key.get_xchild(*child))
    }
}

/**
    Builds the 78 byte payload shared by xprv and xpub serialization
*/
fn serialize_payload(depth: u8, fingerprint: &[u8; 4], index: &[u8; 4], chaincode: &[u8; 32], key: &[u8; 33]) -> Vec<u8> {
    let mut payload: Vec<u8> = Vec::with_capacity(SERIALIZED_LEN - 4);
    payload.push(depth);
    payload.extend_from_slice(fingerprint);
    payload.extend_from_slice(index);
    payload.extend_from_slice(chaincode);
    payload.extend_from_slice(key);

    payload
}

/**
    Decodes and checks a serialized extended key.
    Returns the version and the payload with the version removed.
*/
fn deserialize_payload(key: &str) -> Result<([u8; 4], Vec<u8>), HDWError> {
    let bytes = Base58::check_decode(key).map_err(|e| match e {
        Base58Error::BadChar(_, i) => HDWError::BadChar(i),
        Base58Error::BadChecksum => HDWError::BadChecksum,
        _ => HDWError::BadKey
    })?;
    if bytes.len() != SERIALIZED_LEN { return Err(HDWError::BadKey) }

    let version: [u8; 4] = try_into(bytes[0..4].to_vec());
    let payload = bytes[4..].to_vec();

    //A master key has no parent and no child number
    let depth = payload[0];
    if depth == 0 && (payload[1..5] != [0u8; 4] || payload[5..9] != [0u8; 4]) {
        return Err(HDWError::BadKey)
    }

    Ok((version, payload))
}

impl Xprv {
    pub fn construct(key: PrivKey, chaincode: [u8; 32], depth: u8, pf: [u8; 4], index: [u8; 4], network: Network) -> Self {
        Self {
            key,
            chaincode,
            depth,
            parent_fingerprint: pf,
            index,
            network
        }
    }

    /**
        Create the master private key from a seed.
        Seeds must be between 128 and 512 bits.
    */
    pub fn from_seed(seed: &[u8], network: Network) -> Result<Xprv, HDWError> {
        if seed.len() < 16 || seed.len() > 64 { return Err(HDWError::BadSeed(seed.len())) }

        let mprivkey_bytes: [u8; 64] = hash::hmac_sha512(seed, b"Bitcoin seed");
        let key = PrivKey::from_slice(&mprivkey_bytes[0..32]).map_err(|_| HDWError::BadKey)?;

        Ok(Xprv::construct(
            key,
            try_into(mprivkey_bytes[32..64].to_vec()),
            0x00,
            [0x00; 4],
            [0x00; 4],
            network
        ))
    }

    /**
        Return the private key part of self
    */
    pub fn get_prv(&self) -> PrivKey {
        self.key
    }

    pub fn child_number(&self) -> u32 {
        as_u32_be(&self.index)
    }

    /**
        Find the corresponding xpub
    */
    pub fn get_xpub(&self) -> Xpub {
        Xpub::construct(
            self.get_pub(),
            self.chaincode,
            self.depth,
            self.parent_fingerprint,
            self.index,
            self.network
        )
    }
}

impl ExtendedKey for Xprv {
    fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Xprv, ChildKeyError> {
        derive_xprv(self, options)
    }

    fn get_pub(&self) -> PubKey {
        PubKey::from_priv_key(&self.key)
    }

    fn serialize(&self) -> String {
        //Private keys are padded with 0x00 to 33 bytes
        let mut key = [0u8; 33];
        key[1..].copy_from_slice(&self.key.as_bytes());
        let payload = serialize_payload(self.depth, &self.parent_fingerprint, &self.index, &self.chaincode, &key);

        Base58::new(&self.network.params().xprv_version, &payload).check_encode()
    }
}

impl FromStr for Xprv {
    type Err = HDWError;

    /**
        Import an extended private key from a "xprv[...]" or "tprv[...]" string.
    */
    fn from_str(key: &str) -> Result<Self, HDWError> {
        let (version, payload) = deserialize_payload(key)?;
        let network = Network::from_xprv_version(version).ok_or(HDWError::BadPrefix(version))?;

        //Private key data starts with 0x00
        if payload[41] != 0x00 { return Err(HDWError::BadKey) }
        let key = PrivKey::from_slice(&payload[42..74]).map_err(|_| HDWError::BadKey)?;

        Ok(Self::construct(
            key,
            try_into(payload[9..41].to_vec()),
            payload[0],
            try_into(payload[1..5].to_vec()),
            try_into(payload[5..9].to_vec()),
            network
        ))
    }
}

impl Xpub {
    pub fn construct(key: PubKey, chaincode: [u8; 32], depth: u8, pf: [u8; 4], index: [u8; 4], network: Network) -> Self {
        Self {
            key,
            chaincode,
            depth,
            parent_fingerprint: pf,
            index,
            network
        }
    }

    pub fn child_number(&self) -> u32 {
        as_u32_be(&self.index)
    }
}

impl ExtendedKey for Xpub {
    fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Xpub, ChildKeyError> {
        derive_xpub(self, options)
    }

    fn get_pub(&self) -> PubKey {
        self.key
    }

    fn serialize(&self) -> String {
        let payload = serialize_payload(self.depth, &self.parent_fingerprint, &self.index, &self.chaincode, &self.key.as_bytes());

        Base58::new(&self.network.params().xpub_version, &payload).check_encode()
    }
}

impl FromStr for Xpub {
    type Err = HDWError;

    fn from_str(key: &str) -> Result<Self, HDWError> {
        let (version, payload) = deserialize_payload(key)?;
        let network = Network::from_xpub_version(version).ok_or(HDWError::BadPrefix(version))?;
        let key = PubKey::from_slice(&payload[41..74]).map_err(|_| HDWError::BadKey)?;

        Ok(Self::construct(
            key,
            try_into(payload[9..41].to_vec()),
            payload[0],
            try_into(payload[1..5].to_vec()),
            try_into(payload[5..9].to_vec()),
            network
        ))
    }
}

#[cfg(test)]
mod tests {
    /*
        Tests for child key deriveration are implemented in ckd.rs
    */

    use super::*;
    use crate::util::{
        decode_02x,
        encode_02x
    };

    //Data generated on learnmeabitcoin.com/technical/hd-wallets
    const TEST_MPRIV: &str = "081549973bafbba825b31bcc402a3c4ed8e3185c2f3a31c75e55f423e9629aa3";
    const TEST_MCC: &str = "1d7d2a4c940be028b945302ad79dd2ce2afe5ed55e1a2937a5af57f8401e73dd";
    const TEST_XPRV: &str = "xprv9s21ZrQH143K2MPKHPWh91wRxLKehoCNsRrwizj2xNaj9zD5SHMNiHJesDEYgJAavgNE1fDWLgYNneHeSA8oVeVXVYomhP1wxdzZtKsLJbc";
    const TEST_XPUB: &str = "xpub661MyMwAqRbcEqTnPR3hW9tAWNA97FvEEenYXP8eWi7i2nYDypfdG5d8iWfK8YgesKi2EE5mk9THcTqnveDWwZVMuctjmxeEaUKgtg7CEEc";

    #[test]
    fn extended_keys_test() -> Result<(), HDWError> {
        let master = Xprv::from_str(TEST_XPRV)?;

        //Test if the parsed and expected key and chaincode are equal
        assert_eq!(encode_02x(&master.get_prv().as_bytes()), TEST_MPRIV);
        assert_eq!(master.chaincode().to_vec(), decode_02x(TEST_MCC));
        assert_eq!(master.network, Network::Bitcoin);
        assert_eq!(master.depth, 0);

        //compression prefix of the master public key
        assert!(matches!(master.get_pub().as_bytes()[0], 0x02 | 0x03));

        Ok(())
    }

    #[test]
    fn serialize_extended_keys() -> Result<(), HDWError> {
        let master = Xprv::from_str(TEST_XPRV)?;
        assert_eq!(master.serialize(), TEST_XPRV);
        assert_eq!(master.get_xpub().serialize(), TEST_XPUB);
        assert_eq!(Xpub::from_str(TEST_XPUB)?, master.get_xpub());

        Ok(())
    }

    #[test]
    fn create_xkeys_from_str() {
        //XPRV
        let test_data: Vec<(&str, bool)> = vec![
            (TEST_XPRV, true),
            ("this is definately not a extended private key", false),
            (TEST_XPUB, false),
        ];
        for (key, ok) in test_data {
            assert_eq!(Xprv::from_str(key).is_ok(), ok, "{}", key);
        }

        //XPUB
        let test_data: Vec<(&str, bool)> = vec![
            (TEST_XPUB, true),
            ("this is definately not a extended private key", false),
            (TEST_XPRV, false),
        ];
        for (key, ok) in test_data {
            assert_eq!(Xpub::from_str(key).is_ok(), ok, "{}", key);
        }
    }

    #[test]
    fn xprv_given_as_xpub_reports_prefix() {
        assert_eq!(Xprv::from_str(TEST_XPUB), Err(HDWError::BadPrefix([0x04, 0x88, 0xB2, 0x1E])));
    }

    #[test]
    fn derive_from_path_tests() -> Result<(), HDWError> {
        let master = Xprv::from_str(TEST_XPRV)?;
        let path: Path = Path::from_str("m/44'/0'/0'/0")?;
        let at_path = master.derive_from_path(&path)?;

        assert_eq!(at_path.serialize(), "xprvA2RVpXN1QL4okLkV3NT6ADt7UcqauZdi6Tyv2wBscQ3kq9zvvfsxBBgQTcoj7GZCa7wkmmeLvQHdqVJEQ1D4PGoDgYV8CZj9w9jqGNbGCaT");
        assert_eq!(at_path.get_xpub().serialize(), "xpub6FQrE2tuEhd6xppx9Pz6XMpr2eg5K2MZTguWqKbVAjajhxL5UDCCiyztJtCFDrAqPoQfmbVeVX5BKXQ7vxgR42DtsVa3g2YMLZQjbEnxbqi");

        Ok(())
    }

    #[test]
    fn testnet_round_trip() -> Result<(), HDWError> {
        let master = Xprv::from_seed(&[0x42; 32], Network::Testnet)?;
        let serialized = master.serialize();
        assert!(serialized.starts_with("tprv"));
        assert_eq!(Xprv::from_str(&serialized)?, master);
        assert!(master.get_xpub().serialize().starts_with("tpub"));

        Ok(())
    }

    #[test]
    fn seed_length_is_checked() {
        assert_eq!(Xprv::from_seed(&[0u8; 15], Network::Bitcoin), Err(HDWError::BadSeed(15)));
        assert_eq!(Xprv::from_seed(&[0u8; 65], Network::Bitcoin), Err(HDWError::BadSeed(65)));
    }
}
