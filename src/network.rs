/*
    Network parameters.

    Every constant that differs between bitcoin networks lives here:
    the version bytes used by Base58Check addresses, WIF keys and BIP-32
    extended keys, and the human readable part used by segwit addresses.
    The caller always selects the network explicitly.
*/

use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Network {
    Bitcoin,
    Testnet,
    Signet,
    Regtest
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParams {
    pub name: &'static str,
    pub p2pkh_prefix: u8,
    pub p2sh_prefix: u8,
    pub wif_prefix: u8,
    pub bech32_hrp: &'static str,
    pub xprv_version: [u8; 4],
    pub xpub_version: [u8; 4],
    pub coin_type: u32
}

pub const BITCOIN: NetworkParams = NetworkParams {
    name: "bitcoin",
    p2pkh_prefix: 0x00,
    p2sh_prefix: 0x05,
    wif_prefix: 0x80,
    bech32_hrp: "bc",
    xprv_version: [0x04, 0x88, 0xAD, 0xE4],
    xpub_version: [0x04, 0x88, 0xB2, 0x1E],
    coin_type: 0
};

pub const TESTNET: NetworkParams = NetworkParams {
    name: "testnet",
    p2pkh_prefix: 0x6F,
    p2sh_prefix: 0xC4,
    wif_prefix: 0xEF,
    bech32_hrp: "tb",
    xprv_version: [0x04, 0x35, 0x83, 0x94],
    xpub_version: [0x04, 0x35, 0x87, 0xCF],
    coin_type: 1
};

//Signet shares every constant with testnet
pub const SIGNET: NetworkParams = NetworkParams {
    name: "signet",
    ..TESTNET
};

pub const REGTEST: NetworkParams = NetworkParams {
    name: "regtest",
    bech32_hrp: "bcrt",
    ..TESTNET
};

impl Network {
    /**
        Returns the constant parameter set of the network
    */
    pub fn params(&self) -> &'static NetworkParams {
        match self {
            Network::Bitcoin => &BITCOIN,
            Network::Testnet => &TESTNET,
            Network::Signet => &SIGNET,
            Network::Regtest => &REGTEST
        }
    }

    /**
        Find the network an extended private key version belongs to.
        Testnet, signet and regtest share version bytes so testnet is returned for all of them.
    */
    pub fn from_xprv_version(version: [u8; 4]) -> Option<Self> {
        if version == BITCOIN.xprv_version {
            Some(Network::Bitcoin)
        } else if version == TESTNET.xprv_version {
            Some(Network::Testnet)
        } else {
            None
        }
    }

    pub fn from_xpub_version(version: [u8; 4]) -> Option<Self> {
        if version == BITCOIN.xpub_version {
            Some(Network::Bitcoin)
        } else if version == TESTNET.xpub_version {
            Some(Network::Testnet)
        } else {
            None
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bitcoin" | "mainnet" | "main" => Ok(Network::Bitcoin),
            "testnet" | "test" => Ok(Network::Testnet),
            "signet" => Ok(Network::Signet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(format!("unknown network: {}", s))
        }
    }
}
