//! Bitcoin 地址派生
//!
//! 同一把公钥对应三种地址：P2WPKH（默认）、P2SH-P2WPKH、P2PKH

use ::bitcoin::{Address as BtcAddress, Network, PublicKey};

use crate::domain::address::{Address, AddressBuilder, AddressType, PartialDerivation, PossibleAddress};
use crate::domain::asset_config::AssetConfig;
use crate::domain::chain_config::NativeAsset;
use crate::error::{Result, XcError};

#[derive(Debug, Clone)]
pub struct BitcoinAddressBuilder {
    network: Network,
}

impl BitcoinAddressBuilder {
    pub fn new(config: &AssetConfig) -> Result<Self> {
        let native = config.native_asset()?;
        if native != NativeAsset::Btc {
            // BCH/DOGE 使用不同的地址编码
            return Err(XcError::not_implemented(format!(
                "address derivation for {}",
                native
            )));
        }

        let network = if config.is_testnet() {
            Network::Testnet
        } else {
            Network::Bitcoin
        };
        Ok(Self { network })
    }

    fn parse_key(public_key: &[u8]) -> Result<PublicKey> {
        PublicKey::from_slice(public_key)
            .map_err(|e| XcError::invalid_input(format!("invalid bitcoin public key: {}", e)))
    }

    fn derive(&self, key: &PublicKey, address_type: AddressType) -> Result<Address> {
        let address = match address_type {
            AddressType::Default => BtcAddress::p2wpkh(key, self.network)
                .map_err(|e| XcError::invalid_input(format!("p2wpkh: {}", e)))?,
            AddressType::NestedSegwit => BtcAddress::p2shwpkh(key, self.network)
                .map_err(|e| XcError::invalid_input(format!("p2sh-p2wpkh: {}", e)))?,
            AddressType::Legacy => BtcAddress::p2pkh(key, self.network),
        };
        Ok(Address::new(address.to_string()))
    }
}

impl AddressBuilder for BitcoinAddressBuilder {
    /// 压缩公钥返回 P2WPKH；未压缩公钥只有 P2PKH 形式
    fn get_address_from_public_key(&self, public_key: &[u8]) -> Result<Address> {
        let key = Self::parse_key(public_key)?;
        if key.compressed {
            self.derive(&key, AddressType::Default)
        } else {
            self.derive(&key, AddressType::Legacy)
        }
    }

    fn get_all_possible_addresses_from_public_key(
        &self,
        public_key: &[u8],
    ) -> std::result::Result<Vec<PossibleAddress>, PartialDerivation> {
        let key = Self::parse_key(public_key).map_err(|source| PartialDerivation {
            attempted: vec![PossibleAddress::default()],
            source,
        })?;

        let variants: &[AddressType] = if key.compressed {
            &[AddressType::Default, AddressType::NestedSegwit, AddressType::Legacy]
        } else {
            &[AddressType::Legacy]
        };

        let mut attempted = Vec::with_capacity(variants.len());
        for &address_type in variants {
            match self.derive(&key, address_type) {
                Ok(address) => attempted.push(PossibleAddress::new(address, address_type)),
                Err(source) => {
                    attempted.push(PossibleAddress::new(Address::default(), address_type));
                    return Err(PartialDerivation { attempted, source });
                }
            }
        }
        Ok(attempted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const UNCOMPRESSED_G: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    fn config(asset: &str, net: &str) -> AssetConfig {
        let mut config = AssetConfig {
            asset: asset.to_string(),
            net: net.to_string(),
            ..Default::default()
        };
        config.resolve().unwrap();
        config
    }

    #[test]
    fn test_all_mainnet_variants() {
        let builder = BitcoinAddressBuilder::new(&config("BTC", "mainnet")).unwrap();
        let key = hex::decode(COMPRESSED_G).unwrap();

        let all = builder.get_all_possible_addresses_from_public_key(&key).unwrap();
        let pairs: Vec<(&str, AddressType)> = all
            .iter()
            .map(|p| (p.address.as_str(), p.address_type))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4", AddressType::Default),
                ("3JvL6Ymt8MVWiCNHC7oWU6nLeHNJKLZGLN", AddressType::NestedSegwit),
                ("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", AddressType::Legacy),
            ]
        );
        assert_eq!(
            builder.get_address_from_public_key(&key).unwrap().as_str(),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
    }

    #[test]
    fn test_uncompressed_key_is_legacy_only() {
        let builder = BitcoinAddressBuilder::new(&config("BTC", "mainnet")).unwrap();
        let key = hex::decode(UNCOMPRESSED_G).unwrap();

        let all = builder.get_all_possible_addresses_from_public_key(&key).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].address_type, AddressType::Legacy);
        assert_eq!(all[0].address.as_str(), "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
    }

    #[test]
    fn test_testnet_prefix() {
        let builder = BitcoinAddressBuilder::new(&config("BTC", "testnet")).unwrap();
        let key = hex::decode(COMPRESSED_G).unwrap();
        let address = builder.get_address_from_public_key(&key).unwrap();
        assert!(address.as_str().starts_with("tb1q"));
    }

    #[test]
    fn test_other_utxo_chains_not_implemented() {
        let err = BitcoinAddressBuilder::new(&config("DOGE", "mainnet")).unwrap_err();
        assert_eq!(err.code(), "not_implemented");
    }

    #[test]
    fn test_bad_key_returns_partial_default() {
        let builder = BitcoinAddressBuilder::new(&config("BTC", "mainnet")).unwrap();
        let err = builder
            .get_all_possible_addresses_from_public_key(&[1, 2, 3])
            .unwrap_err();
        assert_eq!(err.attempted, vec![PossibleAddress::default()]);
        assert_eq!(err.source.code(), "invalid_input");
    }
}
