/*

    Script builder module.

*/

use super::RedeemScript;

#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub code: Vec<u8>
}

impl Builder {
    /// Return a new instance of self
    pub fn new() -> Self  {
        Self { code: Vec::new() }
    }

    /// Push an opcode into self
    pub fn push_opcode(mut self, opcode: Opcode) -> Self {
        self.code.push(opcode.into_u8());
        self
    }

    /// Push data with its length prefix. Only direct pushes (up to 75 bytes) are needed
    /// by the output templates.
    pub fn push_slice(mut self, slice: &[u8]) -> Self {
        debug_assert!(slice.len() <= 75);
        self.code.push(slice.len() as u8);
        self.code.extend_from_slice(slice);
        self
    }

    /// Convert self into a redeem script
    pub fn into_script(self) -> RedeemScript {
        RedeemScript::new(self.code)
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    code: u8
}

impl Opcode {
    pub fn into_u8(self) -> u8 {
        self.code
    }

    /// OP_0 for version 0, OP_1 to OP_16 otherwise
    pub fn witness_version(version: u8) -> Self {
        match version {
            0 => opcodes::OP_0,
            v => Opcode { code: 0x50 + v }
        }
    }
}

impl From<u8> for Opcode {
    fn from(code: u8) -> Self {
        Self { code }
    }
}

// Opcode constants
pub mod opcodes {
    use super::Opcode;

    /// Push an empty array onto the stack
    pub const OP_0: Opcode = Opcode {code: 0x00};
    /// Duplicate the top stack item
    pub const OP_DUP: Opcode = Opcode {code: 0x76};
    /// Pop and push its Hash160
    pub const OP_HASH160: Opcode = Opcode {code: 0xa9};
    /// Push 1 if the top two items are equal, 0 otherwise
    pub const OP_EQUAL: Opcode = Opcode {code: 0x87};
    /// OP_EQUAL followed by OP_VERIFY
    pub const OP_EQUALVERIFY: Opcode = Opcode {code: 0x88};
    /// Check a signature against a public key
    pub const OP_CHECKSIG: Opcode = Opcode {code: 0xac};
}
