use crate::{
    script::{
        RedeemScript,
        ScriptBuilder,
        Opcode
    },
    encoding::bech32::{
        self,
        Bech32Err
    },
    key::{
        PubKey,
        SchnorrPublicKey
    },
    network::Network
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WitnessProgram {
    pub version: u8,
    pub program: Vec<u8>
}

impl WitnessProgram {
    /**
        For P2WPKH, version is 0 and the program is the Hash160 of the public key.
    */
    pub fn p2wpkh(pubkey: &PubKey) -> Self {
        Self { version: 0, program: pubkey.hash160().to_vec() }
    }

    /**
        For P2TR, version is 1 and the program is the x-only tweaked output key.
    */
    pub fn p2tr(output_key: &SchnorrPublicKey) -> Self {
        Self { version: 1, program: output_key.as_bytes().to_vec() }
    }

    /**
        Segwit address of the program. Bech32 for v0, Bech32m otherwise.
    */
    pub fn to_address(&self, network: Network) -> Result<String, Bech32Err> {
        bech32::encode(network.params().bech32_hrp, self.version, &self.program)
    }

    /**
        Parse a segwit address, checking that it belongs to the network.
    */
    pub fn from_address(address: &str, network: Network) -> Result<Self, Bech32Err> {
        let (hrp, version, program) = bech32::decode(address)?;
        if hrp != network.params().bech32_hrp { return Err(Bech32Err::BadHrp(hrp)) }

        Ok(Self { version, program })
    }

    pub fn to_scriptpubkey(&self) -> RedeemScript {
        //Redeem script = version opcode | push(program)
        ScriptBuilder::new()
            .push_opcode(Opcode::witness_version(self.version))
            .push_slice(&self.program)
            .into_script()
    }
}
