//! 资产配置与注册表
//!
//! AssetConfig 在进程启动时由静态配置构建一次，之后只读；按 AssetID 查找。

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::asset::{parse_asset_and_native, AssetId, AssetType};
use crate::domain::chain_config::{ChainType, NativeAsset};
use crate::error::{Result, XcError};

/// 资产配置
///
/// ```toml
/// [[chains]]
/// asset = "ETH"
/// net = "mainnet"
/// url = "http://127.0.0.1:8545"
///
/// [[chains]]
/// asset = "USDC"
/// chain = "ETH"
/// net = "mainnet"
/// contract = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"
/// decimals = 6
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub asset: String,
    pub net: String,
    pub url: String,
    /// 凭据引用：`env:VAR`、`file:PATH` 或明文
    pub auth: String,
    pub provider: String,
    pub chain_id: i64,
    pub chain_id_str: String,
    pub chain_name: String,
    /// Bech32 地址前缀 (Cosmos 系列)
    pub chain_prefix: String,
    /// 链上手续费币种 (例如 uatom)
    pub chain_coin: String,
    pub explorer_url: String,

    // Tokens
    pub chain: String,
    pub contract: String,
    pub decimals: Option<u32>,
    pub name: String,

    // 派生字段，不参与序列化
    #[serde(skip)]
    pub id: AssetId,
    #[serde(skip)]
    pub auth_secret: String,
    #[serde(skip)]
    pub native_asset: Option<NativeAsset>,
    #[serde(skip)]
    pub asset_type: Option<AssetType>,
}

impl AssetConfig {
    /// 计算派生字段（id、native_asset、asset_type、auth_secret）
    ///
    /// 配置文件里未写 chain 的原生资产（如 `asset = "atom"`）按大小写不敏感识别为该链本身。
    pub fn resolve(&mut self) -> Result<()> {
        let chain = match NativeAsset::lookup(&self.asset) {
            Some(native) if self.chain.is_empty() => native.symbol().to_string(),
            _ => self.chain.clone(),
        };
        let (symbol, native) = parse_asset_and_native(&self.asset, &chain)
            .ok_or_else(|| XcError::invalid_input("asset config has neither asset nor chain"))?;

        let native_asset = NativeAsset::lookup(&native).ok_or_else(|| {
            XcError::invalid_input(format!(
                "asset {} refers to unsupported chain {}",
                self.asset, native
            ))
        })?;

        let asset_type = if NativeAsset::lookup(&symbol) == Some(native_asset) {
            AssetType::Native
        } else {
            AssetType::Token
        };

        if asset_type == AssetType::Token && self.decimals.is_none() {
            return Err(XcError::invalid_input(format!(
                "token {} must configure decimals",
                self.asset
            )));
        }

        self.id = AssetId::canonicalize(&self.asset, &chain);
        self.native_asset = Some(native_asset);
        self.asset_type = Some(asset_type);
        self.auth_secret = resolve_secret(&self.auth)?;
        Ok(())
    }

    /// 已解析的原生资产（链）
    pub fn native_asset(&self) -> Result<NativeAsset> {
        self.native_asset
            .ok_or_else(|| XcError::invalid_input(format!("asset config {} not resolved", self.asset)))
    }

    pub fn chain_type(&self) -> ChainType {
        self.native_asset
            .map(NativeAsset::chain_type)
            .unwrap_or(ChainType::Unknown)
    }

    pub fn is_token(&self) -> bool {
        self.asset_type == Some(AssetType::Token)
    }

    pub fn is_testnet(&self) -> bool {
        matches!(
            self.net.to_lowercase().as_str(),
            "testnet" | "devnet" | "regtest" | "signet"
        )
    }

    /// 精度：未配置时原生资产使用注册表默认值
    pub fn decimals(&self) -> u32 {
        self.decimals
            .or_else(|| match (self.asset_type, self.native_asset) {
                (Some(AssetType::Native), Some(native)) => Some(native.default_decimals()),
                _ => None,
            })
            .unwrap_or(0)
    }
}

/// 解析凭据引用
fn resolve_secret(auth: &str) -> Result<String> {
    if let Some(var) = auth.strip_prefix("env:") {
        return std::env::var(var)
            .map_err(|_| XcError::invalid_input(format!("auth env variable {} is not set", var)));
    }
    if let Some(path) = auth.strip_prefix("file:") {
        return std::fs::read_to_string(path)
            .map(|s| s.trim().to_string())
            .map_err(|e| XcError::invalid_input(format!("failed to read auth file {}: {}", path, e)));
    }
    Ok(auth.to_string())
}

impl fmt::Display for AssetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 不输出 auth_secret
        write!(
            f,
            "net: {}, url: {}, auth: {}, provider: {}",
            self.net, self.url, self.auth, self.provider
        )
    }
}

impl fmt::Debug for AssetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetConfig")
            .field("id", &self.id)
            .field("asset", &self.asset)
            .field("chain", &self.chain)
            .field("net", &self.net)
            .field("url", &self.url)
            .field("auth", &self.auth)
            .field("auth_secret", &"<redacted>")
            .field("provider", &self.provider)
            .field("chain_id", &self.chain_id)
            .field("chain_prefix", &self.chain_prefix)
            .field("chain_coin", &self.chain_coin)
            .field("contract", &self.contract)
            .field("decimals", &self.decimals)
            .field("native_asset", &self.native_asset)
            .field("asset_type", &self.asset_type)
            .finish()
    }
}

/// 资产配置注册表（按 AssetID 索引，构建后只读）
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<AssetId, AssetConfig>,
}

impl AssetRegistry {
    /// 解析并注册所有资产配置；AssetID 重复时报错
    pub fn new(configs: impl IntoIterator<Item = AssetConfig>) -> Result<Self> {
        let mut registry = Self::default();
        for config in configs {
            registry.register(config)?;
        }
        Ok(registry)
    }

    /// 注册单个资产配置
    pub fn register(&mut self, mut config: AssetConfig) -> Result<()> {
        config.resolve()?;
        if self.assets.contains_key(&config.id) {
            return Err(XcError::invalid_input(format!(
                "duplicate asset id: {}",
                config.id
            )));
        }
        tracing::debug!(asset_id = %config.id, native = ?config.native_asset, "registered asset");
        self.assets.insert(config.id.clone(), config);
        Ok(())
    }

    pub fn get(&self, id: &AssetId) -> Option<&AssetConfig> {
        self.assets.get(id)
    }

    /// 先规范化再查找，接受任意用户输入形式
    pub fn get_by_asset(&self, asset: &str, native_hint: &str) -> Option<&AssetConfig> {
        self.get(&AssetId::canonicalize(asset, native_hint))
    }

    pub fn list_all(&self) -> Vec<&AssetConfig> {
        let mut all: Vec<&AssetConfig> = self.assets.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(asset: &str) -> AssetConfig {
        AssetConfig {
            asset: asset.to_string(),
            net: "mainnet".to_string(),
            ..Default::default()
        }
    }

    fn token(asset: &str, chain: &str, decimals: u32) -> AssetConfig {
        AssetConfig {
            asset: asset.to_string(),
            chain: chain.to_string(),
            contract: "contract".to_string(),
            decimals: Some(decimals),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_native() {
        let mut config = native("atom");
        config.resolve().unwrap();
        assert_eq!(config.id.as_str(), "ATOM");
        assert_eq!(config.native_asset().unwrap(), NativeAsset::Atom);
        assert_eq!(config.asset_type, Some(AssetType::Native));
        assert_eq!(config.decimals(), 6);
        assert_eq!(config.chain_type(), ChainType::Account);

        let mut sol = native("sol");
        sol.resolve().unwrap();
        assert_eq!(sol.id.as_str(), "SOL");
        assert_eq!(sol.asset_type, Some(AssetType::Native));
    }

    #[test]
    fn test_resolve_token() {
        let mut usdc = token("USDC", "", 6);
        usdc.resolve().unwrap();
        assert_eq!(usdc.id.as_str(), "USDC");
        assert_eq!(usdc.native_asset().unwrap(), NativeAsset::Eth);
        assert!(usdc.is_token());

        let mut usdc_sol = token("USDC", "SOL", 6);
        usdc_sol.resolve().unwrap();
        assert_eq!(usdc_sol.id.as_str(), "USDC.SOL");
        assert_eq!(usdc_sol.native_asset().unwrap(), NativeAsset::Sol);
        assert_eq!(usdc_sol.decimals(), 6);
    }

    #[test]
    fn test_resolve_rejects_unknown_chain_and_missing_decimals() {
        let mut unknown = token("USDC", "FOO", 6);
        assert!(unknown.resolve().is_err());

        let mut no_decimals = token("USDC", "SOL", 6);
        no_decimals.decimals = None;
        assert!(no_decimals.resolve().is_err());

        let mut empty = AssetConfig::default();
        assert!(empty.resolve().is_err());
    }

    #[test]
    fn test_auth_secret_from_env() {
        std::env::set_var("IRONCHAIN_TEST_AUTH_SECRET", "s3cret");
        let mut config = native("SOL");
        config.auth = "env:IRONCHAIN_TEST_AUTH_SECRET".to_string();
        config.resolve().unwrap();
        assert_eq!(config.auth_secret, "s3cret");

        // 不应出现在任何输出中
        assert!(!format!("{}", config).contains("s3cret"));
        assert!(!format!("{:?}", config).contains("s3cret"));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = AssetRegistry::new(vec![
            native("ETH"),
            native("SOL"),
            token("USDC", "ETH", 6),
            token("USDC", "SOL", 6),
        ])
        .unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.get_by_asset("usdc.sol", "").unwrap().native_asset(),
            Ok(NativeAsset::Sol)
        );
        assert_eq!(
            registry.get_by_asset("USDC", "").unwrap().native_asset(),
            Ok(NativeAsset::Eth)
        );
        assert!(registry.get(&AssetId::canonicalize("BTC", "")).is_none());

        let ids: Vec<&str> = registry.list_all().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["ETH", "SOL", "USDC", "USDC.SOL"]);
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let result = AssetRegistry::new(vec![token("USDC", "", 6), token("USDC", "ETH", 6)]);
        assert!(result.is_err());
    }
}
