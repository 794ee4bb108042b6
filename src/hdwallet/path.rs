/*
    Derivation paths.

    Path is a general BIP-32 path parsed from strings such as "m/0'/1/2h".
    DerivationPath is the fixed five level grammar used for address wallets:
        m / purpose' / coin_type' / account' / chain / index
*/

use std::{
    fmt,
    str::FromStr
};
use crate::hdwallet::{
    ChildKeyError,
    HDWError
};

/// Child numbers at or above this value are hardened.
pub const HARDENED_OFFSET: u32 = 1 << 31;

/// Chain index of receiving addresses.
pub const EXTERNAL_CHAIN: u32 = 0;
/// Chain index of change addresses.
pub const INTERNAL_CHAIN: u32 = 1;

/**
    Enum to pattern match child key deriveration options.
    The value is always the nominal index, without the hardened offset.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildOptions {
    Normal(u32),
    Hardened(u32)
}

impl ChildOptions {
    /**
        The child number that is fed into the derivation function.
        Hardened children get 2^31 added. Nominal values of 2^31 and above are rejected for both
        kinds since they would either alias a hardened child or overflow.
    */
    pub fn child_number(&self) -> Result<u32, ChildKeyError> {
        match *self {
            ChildOptions::Normal(x) if x >= HARDENED_OFFSET => Err(ChildKeyError::IndexReserved(x)),
            ChildOptions::Normal(x) => Ok(x),
            ChildOptions::Hardened(x) if x >= HARDENED_OFFSET => Err(ChildKeyError::IndexTooLarge(x)),
            ChildOptions::Hardened(x) => Ok(x + HARDENED_OFFSET)
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildOptions::Hardened(_))
    }
}

impl fmt::Display for ChildOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChildOptions::Normal(x) => write!(f, "{}", x),
            ChildOptions::Hardened(x) => write!(f, "{}'", x)
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub children: Vec<ChildOptions>
}

impl Path {
    pub fn empty() -> Self {
        Self {
            children: vec![]
        }
    }
}

impl FromStr for Path {
    type Err = HDWError;

    fn from_str(path: &str) -> Result<Self, HDWError> {
        let mut children = path.split('/');
        if children.next() != Some("m") {
            return Err(HDWError::BadPath(path.to_string()))
        }

        let mut p: Vec<ChildOptions> = vec![];
        for child in children {
            //A trailing ' or h marks a hardened child
            let option = match child.strip_suffix(|c: char| c == '\'' || c == 'h' || c == 'H') {
                Some(hardened) => hardened.parse().map(ChildOptions::Hardened),
                None => child.parse().map(ChildOptions::Normal)
            };

            match option {
                Ok(x) if x.child_number().is_ok() => p.push(x),
                _ => return Err(HDWError::BadPath(path.to_string()))
            }
        }

        Ok(Self {
            children: p
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.children {
            write!(f, "/{}", child)?;
        }

        Ok(())
    }
}


/// Level of the fixed address derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Purpose,
    CoinType,
    Account,
    Chain,
    Index
}

/**
    A BIP-44 style address path. Values are nominal: the hardened offset is
    applied to purpose, coin type and account during derivation and never to
    chain and index.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    pub purpose: u32,
    pub coin_type: u32,
    pub account: u32,
    pub chain: u32,
    pub index: u32
}

impl DerivationPath {
    pub const fn new(purpose: u32, coin_type: u32, account: u32, chain: u32, index: u32) -> Self {
        Self { purpose, coin_type, account, chain, index }
    }

    /**
        The five derivation steps in the order they are applied.
    */
    pub fn segments(&self) -> [(Segment, ChildOptions); 5] {
        [
            (Segment::Purpose, ChildOptions::Hardened(self.purpose)),
            (Segment::CoinType, ChildOptions::Hardened(self.coin_type)),
            (Segment::Account, ChildOptions::Hardened(self.account)),
            (Segment::Chain, ChildOptions::Normal(self.chain)),
            (Segment::Index, ChildOptions::Normal(self.index))
        ]
    }

    pub fn to_path(&self) -> Path {
        Path {
            children: self.segments().iter().map(|(_, child)| *child).collect()
        }
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Segment::Purpose => "purpose",
            Segment::CoinType => "coin type",
            Segment::Account => "account",
            Segment::Chain => "chain",
            Segment::Index => "index"
        };

        write!(f, "{}", name)
    }
}
