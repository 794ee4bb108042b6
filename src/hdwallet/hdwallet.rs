use std::ops::Range;

use log::debug;

use crate::{
    address::{
        self,
        Address
    },
    hdwallet::{
        derive,
        AddressError,
        DerivationError,
        DerivationPath,
        Xprv
    },
    network::Network
};

/**
    Output types the wallet can produce addresses for.
    Each one has its own purpose level in the derivation path.
*/
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletType {
    P2PKH,
    P2SH_P2WPKH,
    P2WPKH,
    P2TR
}

impl WalletType {
    pub const ALL: [WalletType; 4] = [WalletType::P2PKH, WalletType::P2SH_P2WPKH, WalletType::P2WPKH, WalletType::P2TR];

    /**
        BIP-44, 49, 84 and 86 purpose of the output type
    */
    pub fn purpose(&self) -> u32 {
        match self {
            WalletType::P2PKH => 44,
            WalletType::P2SH_P2WPKH => 49,
            WalletType::P2WPKH => 84,
            WalletType::P2TR => 86
        }
    }

    pub fn from_purpose(purpose: u32) -> Option<Self> {
        match purpose {
            44 => Some(WalletType::P2PKH),
            49 => Some(WalletType::P2SH_P2WPKH),
            84 => Some(WalletType::P2WPKH),
            86 => Some(WalletType::P2TR),
            _ => None
        }
    }
}

/**
    One entry of an address batch.
    Failures are kept per index so the rest of the batch is still usable.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEntry {
    pub path: DerivationPath,
    pub result: Result<Address, AddressError>
}

/**
    Address wallet over a master private key.
    Network, coin type and account are fixed for the wallet.
*/
#[derive(Debug, Clone)]
pub struct HDWallet {
    mpriv_key: Xprv,
    pub network: Network,
    pub coin_type: u32,
    pub account: u32
}

impl HDWallet {
    /**
        Creates a wallet for account 0 with the coin type of the network.
    */
    pub fn new(mpriv_key: Xprv, network: Network) -> Self {
        Self {
            mpriv_key,
            network,
            coin_type: network.params().coin_type,
            account: 0
        }
    }

    pub fn with_account(mut self, account: u32) -> Self {
        self.account = account;
        self
    }

    pub fn with_coin_type(mut self, coin_type: u32) -> Self {
        self.coin_type = coin_type;
        self
    }

    /**
        Returns the stored extended master private key.
    */
    pub fn mpriv_key(&self) -> Xprv {
        self.mpriv_key
    }

    pub fn path_at(&self, r#type: WalletType, chain: u32, index: u32) -> DerivationPath {
        DerivationPath::new(r#type.purpose(), self.coin_type, self.account, chain, index)
    }

    pub fn key_at(&self, r#type: WalletType, chain: u32, index: u32) -> Result<Xprv, DerivationError> {
        derive(&self.mpriv_key, &self.path_at(r#type, chain, index))
    }

    pub fn address_at(&self, r#type: WalletType, chain: u32, index: u32) -> Result<Address, AddressError> {
        let key = self.key_at(r#type, chain, index)?;
        Ok(address::encode(&key, r#type, self.network)?)
    }

    /**
        Creates the addresses of one chain for a range of indexes.
        Every index is derived from the master key, one entry per index.
    */
    pub fn addresses(&self, r#type: WalletType, chain: u32, range: Range<u32>) -> Vec<AddressEntry> {
        debug!("{:?} chain {} indexes {}..{}", r#type, chain, range.start, range.end);

        range
            .map(|index| AddressEntry {
                path: self.path_at(r#type, chain, index),
                result: self.address_at(r#type, chain, index)
            })
            .collect()
    }
}
