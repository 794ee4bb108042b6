/*
    Output scripts for the supported address types.

    Only the standard templates are built here, no script interpreter.
*/

pub mod builder;
pub mod witness_program;

pub use builder::{
    Builder as ScriptBuilder,
    Opcode,
    opcodes
};
pub use witness_program::WitnessProgram;

use crate::{
    hash,
    key::{
        PubKey,
        SchnorrPublicKey
    }
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RedeemScript {
    pub code: Vec<u8>
}

impl RedeemScript {
    /**
        Create a new instance of self
    */
    pub fn new(code: Vec<u8>) -> Self {
        Self {
            code
        }
    }

    /**
        Hash the script with Hash160
    */
    pub fn hash(&self) -> [u8; 20] {
        hash::hash160(&self.code)
    }

    /// P2PKH script pub key
    /// OP_DUP OP_HASH160 <Pubkey Hash> OP_EQUALVERIFY OP_CHECKSIG
    pub fn p2pkh_from_hash(hash: &[u8; 20]) -> Self {
        ScriptBuilder::new()
            .push_opcode(opcodes::OP_DUP)
            .push_opcode(opcodes::OP_HASH160)
            .push_slice(hash)
            .push_opcode(opcodes::OP_EQUALVERIFY)
            .push_opcode(opcodes::OP_CHECKSIG)
            .into_script()
    }

    /// P2SH script pub key
    /// OP_HASH160 <Hash160(redeemScript)> OP_EQUAL
    pub fn p2sh_from_hash(hash: &[u8; 20]) -> Self {
        ScriptBuilder::new()
            .push_opcode(opcodes::OP_HASH160)
            .push_slice(hash)
            .push_opcode(opcodes::OP_EQUAL)
            .into_script()
    }

    /// P2WPKH script pub key, also the redeem script of nested segwit
    /// 0x0014 <20-byte-pubkey-hash>
    pub fn p2wpkh(pubkey: &PubKey) -> Self {
        WitnessProgram::p2wpkh(pubkey).to_scriptpubkey()
    }

    /// P2TR script pub key
    /// 0x5120 <32-byte-output-key>
    pub fn p2tr(output_key: &SchnorrPublicKey) -> Self {
        WitnessProgram::p2tr(output_key).to_scriptpubkey()
    }
}
