//! Cosmos 地址派生：bech32(prefix, ripemd160(sha256(compressed_pubkey)))

use ::bitcoin::hashes::{hash160, Hash};

use crate::domain::address::{Address, AddressBuilder};
use crate::domain::asset_config::AssetConfig;
use crate::error::{Result, XcError};

const COMPRESSED_KEY_LEN: usize = 33;

#[derive(Debug, Clone)]
pub struct CosmosAddressBuilder {
    hrp: bech32::Hrp,
}

impl CosmosAddressBuilder {
    pub fn new(config: &AssetConfig) -> Result<Self> {
        if config.chain_prefix.is_empty() {
            return Err(XcError::invalid_input(format!(
                "chain_prefix is required for {}",
                config.asset
            )));
        }
        let hrp = bech32::Hrp::parse(&config.chain_prefix).map_err(|e| {
            XcError::invalid_input(format!("invalid bech32 prefix {}: {}", config.chain_prefix, e))
        })?;
        Ok(Self { hrp })
    }
}

impl AddressBuilder for CosmosAddressBuilder {
    fn get_address_from_public_key(&self, public_key: &[u8]) -> Result<Address> {
        if public_key.len() != COMPRESSED_KEY_LEN {
            return Err(XcError::invalid_input(format!(
                "cosmos public key must be {} bytes (compressed), got {}",
                COMPRESSED_KEY_LEN,
                public_key.len()
            )));
        }
        let hash = hash160::Hash::hash(public_key).to_byte_array();
        let address = bech32::encode::<bech32::Bech32>(self.hrp, &hash)
            .map_err(|e| XcError::encoding(format!("bech32 encoding failed: {}", e)))?;
        Ok(Address::new(address))
    }
}
