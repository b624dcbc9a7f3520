//! 链适配器
//!
//! 每个链族一个实现；按 NativeAsset 的链族分发，不在调用处比较字符串。

pub mod bitcoin;
pub mod cosmos;
pub mod evm;
pub mod solana;

use crate::domain::address::AddressBuilder;
use crate::domain::asset_config::AssetConfig;
use crate::domain::chain_config::ChainFamily;
use crate::error::{Result, XcError};

pub use self::bitcoin::BitcoinAddressBuilder;
pub use cosmos::CosmosAddressBuilder;
pub use evm::EvmAddressBuilder;
pub use solana::SolanaAddressBuilder;

/// 地址派生器工厂；该链族缺少必需配置时报错
pub fn new_address_builder(config: &AssetConfig) -> Result<Box<dyn AddressBuilder>> {
    let native = config.native_asset()?;
    let family = native.family();
    tracing::debug!(asset_id = %config.id, ?family, "creating address builder");

    match family {
        ChainFamily::Evm => Ok(Box::new(EvmAddressBuilder::new(config)?)),
        ChainFamily::Bitcoin => Ok(Box::new(BitcoinAddressBuilder::new(config)?)),
        ChainFamily::Cosmos => Ok(Box::new(CosmosAddressBuilder::new(config)?)),
        ChainFamily::Solana => Ok(Box::new(SolanaAddressBuilder::new(config)?)),
        ChainFamily::Substrate | ChainFamily::Oasis => {
            tracing::warn!(%native, ?family, "address derivation not implemented");
            Err(XcError::not_implemented(format!(
                "address derivation for {}",
                native
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(asset: &str, prefix: &str) -> AssetConfig {
        let mut config = AssetConfig {
            asset: asset.to_string(),
            chain_prefix: prefix.to_string(),
            ..Default::default()
        };
        config.resolve().unwrap();
        config
    }

    #[test]
    fn test_factory_dispatch() {
        assert!(new_address_builder(&resolved("ETH", "")).is_ok());
        assert!(new_address_builder(&resolved("MATIC", "")).is_ok());
        assert!(new_address_builder(&resolved("BTC", "")).is_ok());
        assert!(new_address_builder(&resolved("SOL", "")).is_ok());
        assert!(new_address_builder(&resolved("ATOM", "cosmos")).is_ok());
    }

    #[test]
    fn test_factory_errors() {
        let missing_prefix = new_address_builder(&resolved("LUNA", "")).err().unwrap();
        assert_eq!(missing_prefix.code(), "invalid_input");

        for asset in ["ACA", "KAR", "ROSE", "BCH", "DOGE"] {
            let err = new_address_builder(&resolved(asset, "")).err().unwrap();
            assert_eq!(err.code(), "not_implemented", "{}", asset);
        }

        let unresolved = AssetConfig::default();
        assert!(new_address_builder(&unresolved).is_err());
    }
}
