/*
    Base58 and Base58Check encoding.

    The raw base conversion is done by the bs58 crate, the checksum
    (first four bytes of Sha256d over version || payload) is computed here.
*/

use crate::hash;

#[derive(Debug)]
pub struct Base58 {
    prefix: Vec<u8>,
    payload: Vec<u8>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    BadChar(char, usize),
    NonAscii(usize),
    TooShort(usize),
    BadChecksum,
    Other(String)
}

impl Base58 {
    /**
        Data to be encoded. The prefix is the version byte(s) and may be empty.
    */
    pub fn new(prefix: &[u8], payload: &[u8]) -> Base58 {
        Base58 {
            prefix: prefix.to_vec(),
            payload: payload.to_vec()
        }
    }

    /// Check encode data by appending the checksum and then encoding it.
    pub fn check_encode(&self) -> String {
        //Concatenate: prefix | payload | checksum
        let mut bytes: Vec<u8> = self.prefix.clone();
        bytes.extend_from_slice(&self.payload);
        let checksum = hash::sha256d(&bytes);
        bytes.extend_from_slice(&checksum[0..4]);

        bs58::encode(bytes).into_string()
    }

    /// Decodes a base58 string into a byte vector.
    /// DOES NOT remove the checksum or version prefix if present.
    pub fn decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        bs58::decode(encoded).into_vec().map_err(|e| match e {
            bs58::decode::Error::InvalidCharacter { character, index } => Base58Error::BadChar(character, index),
            bs58::decode::Error::NonAsciiCharacter { index } => Base58Error::NonAscii(index),
            x => Base58Error::Other(x.to_string())
        })
    }

    /// Checks if a base58 check encoded string has a valid checksum
    pub fn validate_checksum(encoded: &str) -> Result<bool, Base58Error> {
        let bytes = Base58::decode(encoded)?;
        if bytes.len() < 4 { return Err(Base58Error::TooShort(bytes.len())) }

        let (data, checksum) = bytes.split_at(bytes.len() - 4);
        Ok(hash::sha256d(data)[0..4] == *checksum)
    }

    /// Returns the decoded payload with the checksum removed.
    /// Version prefix is NOT removed as it is variable length depending on context.
    pub fn check_decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
        if !Self::validate_checksum(encoded)? { return Err(Base58Error::BadChecksum) }

        let mut bytes = Base58::decode(encoded)?;
        bytes.truncate(bytes.len() - 4);
        Ok(bytes)
    }
}


#[cfg(test)]
mod tests {
    use crate::util::decode_02x;
    use super::*;

    #[test]
    /// Sourced from https://tools.ietf.org/id/draft-msporny-base58-01.html
    fn base58_ietf_test_vectors() {
        let hello_world = b"Hello World!";
        let fox = b"The quick brown fox jumps over the lazy dog.";
        let int = [0x00, 0x00, 0x28, 0x7f, 0xb4, 0xcd];

        assert_eq!(Base58::decode("2NEpo7TZRRrLZSi2U").unwrap(), hello_world.to_vec());
        assert_eq!(Base58::decode("USm3fpXnKG5EUBx2ndxBDMPVciP5hGey2Jh4NDv6gmeo1LkMeiKrLJUUBk6Z").unwrap(), fox.to_vec());
        assert_eq!(Base58::decode("11233QC4").unwrap(), int.to_vec());
    }

    #[test]
    /// Sourced from the Bitcoin Core repository (src/test/data/base58_encode_decode.json)
    fn base58_bitcoin_core_test_vectors() {
        let test_data: [(&str, &str); 8] = [
            ("", ""),
            ("61", "2g"),
            ("626262", "a3gV"),
            ("636363", "aPEr"),
            ("73696d706c792061206c6f6e6720737472696e67", "2cFupjhnEsSn59qHXstmK2ffpLv2"),
            ("00eb15231dfceb60925886b67d065299925915aeb172c06647", "1NS17iag9jJgTHD1VXjvLCEnZuQ3rJDE9L"),
            ("516b6fcd0f", "ABnLTmg"),
            ("00000000000000000000", "1111111111"),
        ];

        for case in test_data {
            assert_eq!(Base58::decode(case.1).unwrap(), decode_02x(case.0));
        }
    }

    #[test]
    fn base58_check_encode() {
        //hash160 of 0204664c60ceabd82967055ccbd0f56a1585dfbd42032656efa501c463b16fbdfe
        let address = "124ERAK4SqHMNWXycHPautn5zDYRKr3b2E";
        let decoded = Base58::check_decode(address).expect("Decode failed");
        assert_eq!(decoded.len(), 21);
        assert_eq!(decoded[0], 0x00);

        let reencoded = Base58::new(&decoded[0..1], &decoded[1..]).check_encode();
        assert_eq!(reencoded, address);
    }

    #[test]
    fn bad_checksum_and_chars() {
        //Last character changed
        assert_eq!(Base58::check_decode("124ERAK4SqHMNWXycHPautn5zDYRKr3b2F"), Err(Base58Error::BadChecksum));
        assert!(matches!(Base58::decode("0OIl"), Err(Base58Error::BadChar('0', 0))));
        assert!(matches!(Base58::validate_checksum("2g"), Err(Base58Error::TooShort(1))));
    }
}
