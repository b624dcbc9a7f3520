//! Solana 地址派生：ed25519 公钥的 Base58 编码

use crate::domain::address::{Address, AddressBuilder};
use crate::domain::asset_config::AssetConfig;
use crate::error::{Result, XcError};

const PUBLIC_KEY_LEN: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct SolanaAddressBuilder;

impl SolanaAddressBuilder {
    pub fn new(_config: &AssetConfig) -> Result<Self> {
        Ok(Self)
    }
}

impl AddressBuilder for SolanaAddressBuilder {
    fn get_address_from_public_key(&self, public_key: &[u8]) -> Result<Address> {
        if public_key.len() != PUBLIC_KEY_LEN {
            return Err(XcError::invalid_input(format!(
                "solana public key must be {} bytes, got {}",
                PUBLIC_KEY_LEN,
                public_key.len()
            )));
        }
        Ok(Address::new(bs58::encode(public_key).into_string()))
    }
}
