/*
    Address encoding for the four single key output types.

    Legacy        P2PKH         Base58Check(p2pkh prefix || Hash160(pubkey))
    Nested segwit P2SH-P2WPKH   Base58Check(p2sh prefix || Hash160(0x0014 || Hash160(pubkey)))
    Native segwit P2WPKH        Bech32(hrp, 0, Hash160(pubkey))
    Taproot       P2TR          Bech32m(hrp, 1, x-only output key)

    Every encoder only needs the public key of the given extended key
    and the network parameters.
*/

use crate::{
    encoding::{
        base58::{
            Base58,
            Base58Error
        },
        bech32::{
            self,
            Bech32Err
        }
    },
    hdwallet::{
        ExtendedKey,
        WalletType
    },
    key::{
        Key,
        PubKey
    },
    network::Network,
    script::{
        RedeemScript,
        WitnessProgram
    },
    taproot::taproot_output_key,
    util::try_into
};

/**
    An encoded address and the output type it was built for.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub value: String,
    pub r#type: WalletType
}

/**
    What an address commits to once decoded.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    PubkeyHash([u8; 20]),
    ScriptHash([u8; 20]),
    WitnessProgram(WitnessProgram)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    InvalidPublicKey(WalletType),
    InvalidTweak(WalletType),
    Bech32(Bech32Err),
    BadNetwork(String),
    BadPayload(String),
    BadChecksum
}

impl From<Bech32Err> for EncodingError {
    fn from(e: Bech32Err) -> Self {
        EncodingError::Bech32(e)
    }
}

impl From<Base58Error> for EncodingError {
    fn from(e: Base58Error) -> Self {
        match e {
            Base58Error::BadChecksum => EncodingError::BadChecksum,
            x => EncodingError::BadPayload(format!("{:?}", x))
        }
    }
}

/**
    Extracts the compressed public key and re-parses it so that
    a malformed serialization is caught before any hashing.
*/
fn checked_pubkey<K: ExtendedKey>(key: &K, r#type: WalletType) -> Result<PubKey, EncodingError> {
    let bytes = key.get_pub().as_bytes();
    if bytes[0] != 0x02 && bytes[0] != 0x03 { return Err(EncodingError::InvalidPublicKey(r#type)) }

    PubKey::from_slice(&bytes).map_err(|_| EncodingError::InvalidPublicKey(r#type))
}

/**
    P2PKH address of the key.
*/
pub fn encode_legacy<K: ExtendedKey>(key: &K, network: Network) -> Result<Address, EncodingError> {
    let pubkey = checked_pubkey(key, WalletType::P2PKH)?;

    Ok(Address {
        value: Base58::new(&[network.params().p2pkh_prefix], &pubkey.hash160()).check_encode(),
        r#type: WalletType::P2PKH
    })
}

/**
    P2SH-P2WPKH address of the key.
    The redeem script is the P2WPKH script pub key.
*/
pub fn encode_nested_segwit<K: ExtendedKey>(key: &K, network: Network) -> Result<Address, EncodingError> {
    let pubkey = checked_pubkey(key, WalletType::P2SH_P2WPKH)?;
    let redeem_script = RedeemScript::p2wpkh(&pubkey);

    Ok(Address {
        value: Base58::new(&[network.params().p2sh_prefix], &redeem_script.hash()).check_encode(),
        r#type: WalletType::P2SH_P2WPKH
    })
}

/**
    P2WPKH address of the key.
*/
pub fn encode_native_segwit<K: ExtendedKey>(key: &K, network: Network) -> Result<Address, EncodingError> {
    let pubkey = checked_pubkey(key, WalletType::P2WPKH)?;

    Ok(Address {
        value: WitnessProgram::p2wpkh(&pubkey).to_address(network)?,
        r#type: WalletType::P2WPKH
    })
}

/**
    Key path only P2TR address of the key (BIP-86).
    The x-only internal key is tweaked with an empty script tree.
*/
pub fn encode_taproot<K: ExtendedKey>(key: &K, network: Network) -> Result<Address, EncodingError> {
    let pubkey = checked_pubkey(key, WalletType::P2TR)?;
    let output_key = taproot_output_key(&pubkey.schnorr()).map_err(|_| EncodingError::InvalidTweak(WalletType::P2TR))?;

    Ok(Address {
        value: WitnessProgram::p2tr(&output_key).to_address(network)?,
        r#type: WalletType::P2TR
    })
}

/**
    Encode the key as the given output type.
*/
pub fn encode<K: ExtendedKey>(key: &K, r#type: WalletType, network: Network) -> Result<Address, EncodingError> {
    match r#type {
        WalletType::P2PKH => encode_legacy(key, network),
        WalletType::P2SH_P2WPKH => encode_nested_segwit(key, network),
        WalletType::P2WPKH => encode_native_segwit(key, network),
        WalletType::P2TR => encode_taproot(key, network)
    }
}

impl Address {
    /**
        Decode an address string of the given network into its payload.
    */
    pub fn decode(address: &str, network: Network) -> Result<Payload, EncodingError> {
        let params = network.params();

        //Segwit addresses of the network start with its human readable part and the separator
        let segwit_prefix = format!("{}1", params.bech32_hrp);
        if address.to_lowercase().starts_with(&segwit_prefix) {
            return match WitnessProgram::from_address(address, network) {
                Ok(program) => Ok(Payload::WitnessProgram(program)),
                Err(Bech32Err::BadHrp(hrp)) => Err(EncodingError::BadNetwork(hrp)),
                Err(e) => Err(EncodingError::Bech32(e))
            }
        }

        let bytes = match Base58::check_decode(address) {
            Ok(x) => x,
            //A valid segwit address of another network
            Err(e) => return match bech32::decode(address) {
                Ok((hrp, _, _)) => Err(EncodingError::BadNetwork(hrp)),
                Err(_) => Err(e.into())
            }
        };
        if bytes.len() != 21 { return Err(EncodingError::BadPayload(format!("{} bytes", bytes.len()))) }
        let hash: [u8; 20] = try_into(bytes[1..].to_vec());

        match bytes[0] {
            x if x == params.p2pkh_prefix => Ok(Payload::PubkeyHash(hash)),
            x if x == params.p2sh_prefix => Ok(Payload::ScriptHash(hash)),
            x => Err(EncodingError::BadNetwork(format!("version byte {:#04x}", x)))
        }
    }

    /**
        The payload of self.
    */
    pub fn payload(&self, network: Network) -> Result<Payload, EncodingError> {
        Self::decode(&self.value, network)
    }

    /**
        The output script that pays to self.
    */
    pub fn script_pubkey(&self, network: Network) -> Result<RedeemScript, EncodingError> {
        Ok(self.payload(network)?.script_pubkey())
    }
}

impl Payload {
    pub fn script_pubkey(&self) -> RedeemScript {
        match self {
            Payload::PubkeyHash(hash) => RedeemScript::p2pkh_from_hash(hash),
            Payload::ScriptHash(hash) => RedeemScript::p2sh_from_hash(hash),
            Payload::WitnessProgram(program) => program.to_scriptpubkey()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hdwallet::{
            derive_at,
            Xprv
        },
        key::PrivKey,
        util::{
            decode_02x,
            encode_02x
        }
    };
    use std::str::FromStr;

    //Root key of the "abandon abandon ... about" mnemonic
    const ROOT: &str = "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu";

    fn leaf(purpose: u32, chain: u32, index: u32) -> Xprv {
        derive_at(&Xprv::from_str(ROOT).unwrap(), purpose, 0, 0, chain, index).unwrap()
    }

    #[test]
    fn bip44_vector() {
        assert_eq!(encode_legacy(&leaf(44, 0, 0), Network::Bitcoin).unwrap().value, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
    }

    #[test]
    fn bip49_vectors() {
        assert_eq!(encode_nested_segwit(&leaf(49, 0, 0), Network::Bitcoin).unwrap().value, "37VucYSaXLCAsxYyAPfbSi9eh4iEcbShgf");

        let testnet_root = Xprv::from_str("tprv8ZgxMBicQKsPe5YMU9gHen4Ez3ApihUfykaqUorj9t6FDqy3nP6eoXiAo2ssvpAjoLroQxHqr3R5nE3a5dU3DHTjTgJDd7zrbniJr6nrCzd").unwrap();
        let key = derive_at(&testnet_root, 49, 1, 0, 0, 0).unwrap();
        assert_eq!(encode_nested_segwit(&key, Network::Testnet).unwrap().value, "2Mww8dCYPUpKHofjgcXcBCEGmniw9CoaiD2");
    }

    #[test]
    fn bip84_vectors() {
        let vectors = [
            (0, 0, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"),
            (0, 1, "bc1qnjg0jd8228aq7egyzacy8cys3knf9xvrerkf9g"),
            (1, 0, "bc1q8c6fshw2dlwun7ekn9qwf37cu2rn755upcp6el")
        ];
        for (chain, index, expected) in vectors {
            assert_eq!(encode_native_segwit(&leaf(84, chain, index), Network::Bitcoin).unwrap().value, expected);
        }
    }

    #[test]
    fn bip86_vectors() {
        let vectors = [
            (0, 0, "bc1p5cyxnuxmeuwuvkwfem96lqzszd02n6xdcjrs20cac6yqjjwudpxqkedrcr"),
            (0, 1, "bc1p4qhjn9zdvkux4e44uhx8tc55attvtyu358kutcqkudyccelu0was9fqzwh"),
            (1, 0, "bc1p3qkhfews2uk44qtvauqyr2ttdsw7svhkl9nkm9s9c3x4ax5h60wqwruhk7")
        ];
        for (chain, index, expected) in vectors {
            assert_eq!(encode_taproot(&leaf(86, chain, index), Network::Bitcoin).unwrap().value, expected);
        }
    }

    #[test]
    fn generator_point_addresses() {
        //Private key 1, public key G
        let mut one = [0u8; 32];
        one[31] = 1;
        let key = Xprv::construct(PrivKey::from_slice(&one).unwrap(), [0u8; 32], 0, [0; 4], [0; 4], Network::Bitcoin);

        assert_eq!(encode_legacy(&key, Network::Bitcoin).unwrap().value, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(encode_legacy(&key, Network::Testnet).unwrap().value, "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r");
        assert_eq!(encode_native_segwit(&key, Network::Bitcoin).unwrap().value, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        assert!(encode_native_segwit(&key, Network::Regtest).unwrap().value.starts_with("bcrt1q"));
    }

    #[test]
    fn decode_recovers_payload() {
        let key = leaf(84, 0, 3);
        let hash = key.get_pub().hash160();

        let legacy = encode_legacy(&key, Network::Bitcoin).unwrap();
        assert_eq!(Address::decode(&legacy.value, Network::Bitcoin), Ok(Payload::PubkeyHash(hash)));

        let nested = encode_nested_segwit(&key, Network::Bitcoin).unwrap();
        let redeem = RedeemScript::p2wpkh(&key.get_pub());
        assert_eq!(nested.payload(Network::Bitcoin), Ok(Payload::ScriptHash(redeem.hash())));

        let native = encode_native_segwit(&key, Network::Bitcoin).unwrap();
        assert_eq!(native.payload(Network::Bitcoin), Ok(Payload::WitnessProgram(WitnessProgram::p2wpkh(&key.get_pub()))));

        let taproot = encode_taproot(&key, Network::Bitcoin).unwrap();
        let output_key = taproot_output_key(&key.get_pub().schnorr()).unwrap();
        match taproot.payload(Network::Bitcoin).unwrap() {
            Payload::WitnessProgram(p) => {
                assert_eq!(p.version, 1);
                assert_eq!(p.program, output_key.as_bytes().to_vec());
            },
            x => panic!("unexpected payload {:?}", x)
        }
    }

    #[test]
    fn script_pubkeys() {
        let p2pkh = Address::decode("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", Network::Bitcoin).unwrap();
        assert_eq!(encode_02x(&p2pkh.script_pubkey().code), "76a914751e76e8199196d454941c45d1b3a323f1433bd688ac");

        let native = Address {
            value: "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".to_string(),
            r#type: WalletType::P2WPKH
        };
        assert_eq!(native.script_pubkey(Network::Bitcoin).unwrap().code, decode_02x("0014751e76e8199196d454941c45d1b3a323f1433bd6"));
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            Address::decode("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4", Network::Testnet),
            Err(EncodingError::BadNetwork("bc".to_string()))
        );
        assert!(matches!(
            Address::decode("mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r", Network::Bitcoin),
            Err(EncodingError::BadNetwork(_))
        ));
        assert_eq!(Address::decode("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMh", Network::Bitcoin), Err(EncodingError::BadChecksum));
        assert!(matches!(
            Address::decode("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5", Network::Bitcoin),
            Err(EncodingError::Bech32(_))
        ));
    }

    #[test]
    fn segwit_detection_follows_network_hrp() {
        let key = leaf(84, 0, 0);
        let regtest = encode_native_segwit(&key, Network::Regtest).unwrap();
        let testnet = encode_native_segwit(&key, Network::Testnet).unwrap();

        assert_eq!(Address::decode(&regtest.value, Network::Bitcoin), Err(EncodingError::BadNetwork("bcrt".to_string())));
        assert_eq!(Address::decode(&testnet.value, Network::Regtest), Err(EncodingError::BadNetwork("tb".to_string())));
        assert_eq!(regtest.payload(Network::Regtest), Ok(Payload::WitnessProgram(WitnessProgram::p2wpkh(&key.get_pub()))));
        assert_eq!(testnet.payload(Network::Signet), regtest.payload(Network::Regtest));
    }

    #[test]
    fn formats_diverge_for_random_keys() {
        use rand::RngCore;

        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        let master = Xprv::from_seed(&seed, Network::Bitcoin).unwrap();

        let addresses: Vec<String> = [
            (44, WalletType::P2PKH),
            (49, WalletType::P2SH_P2WPKH),
            (84, WalletType::P2WPKH),
            (86, WalletType::P2TR)
        ]
            .iter()
            .map(|(purpose, r#type)| {
                let key = derive_at(&master, *purpose, 0, 0, 0, 0).unwrap();
                let address = encode(&key, *r#type, Network::Bitcoin).unwrap();
                assert_eq!(address.r#type, *r#type);
                address.value
            })
            .collect();

        assert!(addresses[0].starts_with('1'));
        assert!(addresses[1].starts_with('3'));
        assert!(addresses[2].starts_with("bc1q"));
        assert!(addresses[3].starts_with("bc1p"));
    }
}
