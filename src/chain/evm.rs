//! EVM 系列地址派生 (ETH, BNB, MATIC, AVAX ...)

use k256::elliptic_curve::sec1::ToEncodedPoint;
use sha3::{Digest, Keccak256};

use crate::domain::address::{Address, AddressBuilder};
use crate::domain::asset_config::AssetConfig;
use crate::error::{Result, XcError};

#[derive(Debug, Clone, Default)]
pub struct EvmAddressBuilder;

impl EvmAddressBuilder {
    pub fn new(_config: &AssetConfig) -> Result<Self> {
        Ok(Self)
    }
}

impl AddressBuilder for EvmAddressBuilder {
    /// 接受 33 字节压缩或 65 字节未压缩的 secp256k1 公钥
    fn get_address_from_public_key(&self, public_key: &[u8]) -> Result<Address> {
        let key = k256::PublicKey::from_sec1_bytes(public_key)
            .map_err(|e| XcError::invalid_input(format!("invalid secp256k1 public key: {}", e)))?;

        let point = key.to_encoded_point(false); // 未压缩格式
        let hash = Keccak256::digest(&point.as_bytes()[1..]); // 去掉 0x04 前缀
        Ok(Address::new(to_checksum_address(&hash[12..]))) // 取后 20 字节
    }
}

/// EIP-55 校验和编码
pub fn to_checksum_address(address_bytes: &[u8]) -> String {
    let lower = hex::encode(address_bytes);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(2 + lower.len());
    checksummed.push_str("0x");
    for (i, ch) in lower.chars().enumerate() {
        let hash_nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if ch.is_ascii_alphabetic() && hash_nibble >= 8 {
            checksummed.push(ch.to_ascii_uppercase());
        } else {
            checksummed.push(ch);
        }
    }
    checksummed
}
