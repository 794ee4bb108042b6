/*
    Segwit address encoding (BIP-173 / BIP-350).

    Witness version 0 programs are encoded with the Bech32 checksum,
    every later version with Bech32m.
*/

use bech32::{
    self,
    u5,
    FromBase32,
    ToBase32,
    Variant
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bech32Err {
    BadHrp(String),
    BadVersion(u8),
    BadVariant,
    InvalidLength(usize),
    InvalidData(String)
}

impl From<bech32::Error> for Bech32Err {
    fn from(e: bech32::Error) -> Self {
        Bech32Err::InvalidData(e.to_string())
    }
}

/**
    Checksum variant mandated for a witness version
*/
pub fn variant_for(witness_version: u8) -> Variant {
    match witness_version {
        0 => Variant::Bech32,
        _ => Variant::Bech32m
    }
}

/**
    Checks the program length rules for a witness version.
    v0 programs are either 20 (P2WPKH) or 32 (P2WSH) bytes, others 2 to 40 bytes.
*/
fn check_program(witness_version: u8, program: &[u8]) -> Result<(), Bech32Err> {
    if witness_version > 16 { return Err(Bech32Err::BadVersion(witness_version)) }
    if program.len() < 2 || program.len() > 40 { return Err(Bech32Err::InvalidLength(program.len())) }
    if witness_version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(Bech32Err::InvalidLength(program.len()))
    }

    Ok(())
}

/**
    Encode a witness program as a segwit address with the given human readable part.
*/
pub fn encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String, Bech32Err> {
    check_program(witness_version, program)?;

    let mut data: Vec<u5> = vec![u5::try_from_u8(witness_version)?];
    data.extend_from_slice(&program.to_base32());

    Ok(bech32::encode(hrp, data, variant_for(witness_version))?)
}

/**
    Decode a segwit address into (hrp, witness version, witness program).
    Rejects addresses whose checksum variant does not match the witness version.
*/
pub fn decode(address: &str) -> Result<(String, u8, Vec<u8>), Bech32Err> {
    let (hrp, data, variant) = bech32::decode(address)?;
    if data.is_empty() { return Err(Bech32Err::InvalidLength(0)) }

    let witness_version = data[0].to_u8();
    if variant != variant_for(witness_version) { return Err(Bech32Err::BadVariant) }

    let program = Vec::<u8>::from_base32(&data[1..])?;
    check_program(witness_version, &program)?;

    Ok((hrp, witness_version, program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{decode_02x, encode_02x};

    #[test]
    /// BIP-173 P2WPKH example for the generator point public key
    fn bip173_p2wpkh() -> Result<(), Bech32Err> {
        let program = decode_02x("751e76e8199196d454941c45d1b3a323f1433bd6");
        assert_eq!(encode("bc", 0, &program)?, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        assert_eq!(encode("tb", 0, &program)?, "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx");

        let (hrp, version, decoded) = decode("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4")?;
        assert_eq!(hrp, "bc");
        assert_eq!(version, 0);
        assert_eq!(decoded, program);

        Ok(())
    }

    #[test]
    /// BIP-341 wallet test vector, key path only
    fn bip350_p2tr() -> Result<(), Bech32Err> {
        let program = decode_02x("53a1f6e454df1aa2776a2814a721372d6258050de330b3c6d10ee8f4e0dda343");
        let address = "bc1p2wsldez5mud2yam29q22wgfh9439spgduvct83k3pm50fcxa5dps59h4z5";
        assert_eq!(encode("bc", 1, &program)?, address);

        let (_, version, decoded) = decode(address)?;
        assert_eq!(version, 1);
        assert_eq!(encode_02x(&decoded), encode_02x(&program));

        Ok(())
    }

    #[test]
    fn variant_mismatch_is_rejected() {
        //A v1 program encoded with the bech32 (not bech32m) checksum
        let program = [0x11u8; 32];
        let mut data: Vec<u5> = vec![u5::try_from_u8(1).unwrap()];
        data.extend_from_slice(&program.to_base32());
        let wrong = bech32::encode("bc", data, Variant::Bech32).unwrap();

        assert_eq!(decode(&wrong), Err(Bech32Err::BadVariant));
    }

    #[test]
    fn program_length_rules() {
        assert_eq!(encode("bc", 0, &[0u8; 21]), Err(Bech32Err::InvalidLength(21)));
        assert_eq!(encode("bc", 1, &[0u8; 41]), Err(Bech32Err::InvalidLength(41)));
        assert_eq!(encode("bc", 17, &[0u8; 32]), Err(Bech32Err::BadVersion(17)));
    }
}
