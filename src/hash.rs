/*
    Hash module includes the hash functions necessary to derive
    child keys and to hash public keys and scripts into addresses.
*/

use crate::{
    Ripemd160, Sha256, Sha512, Digest,
    Hmac, Mac, NewMac,
    util::try_into
};

/*
    Takes in a byte array and returns the ripemd160 hash of it
*/
pub fn ripemd160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    try_into(Ripemd160::digest(input.as_ref()).to_vec())
}

/*
    Takes in a byte array and returns the sha256 hash of it
*/
pub fn sha256<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    try_into(Sha256::digest(input.as_ref()).to_vec())
}

/**
    Ripemd160( Sha256( data ) )
*/
pub fn hash160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    ripemd160(sha256(input))
}

/**
    Sha256( Sha256( data ) ), used for Base58Check checksums
*/
pub fn sha256d<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    sha256(sha256(input))
}

/**
    HMAC-SHA512 of the data using the given key.
    Used for master key generation and child key derivation.
*/
pub fn hmac_sha512(data: &[u8], key: &[u8]) -> [u8; 64] {
    let mut mac = Hmac::<Sha512>::new_from_slice(key)
        .expect("HMAC takes keys of any length");
    mac.update(data);

    try_into(mac.finalize().into_bytes().to_vec())
}

/**
    BIP-340 tagged hash:
    Sha256( Sha256(tag) || Sha256(tag) || data )
*/
pub fn tagged_hash(tag: &str, data: &[u8]) -> [u8; 32] {
    let tag_hash = sha256(tag.as_bytes());
    let mut preimage: Vec<u8> = Vec::with_capacity(64 + data.len());
    preimage.extend_from_slice(&tag_hash);
    preimage.extend_from_slice(&tag_hash);
    preimage.extend_from_slice(data);

    sha256(preimage)
}
