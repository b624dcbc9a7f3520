//! 原生资产注册表
//!
//! 定义所有支持的链（每条链一个原生资产）及其账本模型、链族和默认精度。
//! 新增一条链：在 NativeAsset 中增加一个变体，并在 NATIVE_ASSETS 中增加一行。

use std::{collections::HashMap, fmt, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::XcError;

/// 链的账本模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    Unknown,
    /// UTXO 模型 (Bitcoin, Bitcoin Cash, Dogecoin)
    Utxo,
    /// 账户/消息模型 (Ethereum, Cosmos, Solana ...)
    Account,
}

/// 链族：决定由哪个适配器处理地址与交易
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Bitcoin,
    Evm,
    Cosmos,
    Substrate,
    Oasis,
    Solana,
}

/// 原生资产（在本系统中，一个原生资产即代表一条链）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NativeAsset {
    // UTXO
    Bch,
    Btc,
    Doge,

    // Account-based
    Aca,
    ArbEth,
    Atom,
    AurEth,
    Avax,
    Bnb,
    Celo,
    Etc,
    Eth,
    Ftm,
    Kar,
    Klay,
    Luna,
    Matic,
    OptEth,
    Rose,
    Sol,
}

/// 默认链：未指定链的代币归属于该链，且其 AssetID 不带后缀
pub const DEFAULT_CHAIN: NativeAsset = NativeAsset::Eth;

/// 原生资产静态信息
#[derive(Debug, Clone)]
pub struct NativeAssetInfo {
    pub asset: NativeAsset,
    /// 链符号（保留历史大小写，如 ArbETH）
    pub symbol: &'static str,
    pub name: &'static str,
    pub chain_type: ChainType,
    pub family: ChainFamily,
    /// 默认精度（配置未给出 decimals 时使用）
    pub decimals: u32,
}

const fn entry(
    asset: NativeAsset,
    symbol: &'static str,
    name: &'static str,
    chain_type: ChainType,
    family: ChainFamily,
    decimals: u32,
) -> NativeAssetInfo {
    NativeAssetInfo {
        asset,
        symbol,
        name,
        chain_type,
        family,
        decimals,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 支持的链
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

static NATIVE_ASSETS: [NativeAssetInfo; 20] = [
    // UTXO
    entry(NativeAsset::Bch, "BCH", "Bitcoin Cash", ChainType::Utxo, ChainFamily::Bitcoin, 8),
    entry(NativeAsset::Btc, "BTC", "Bitcoin", ChainType::Utxo, ChainFamily::Bitcoin, 8),
    entry(NativeAsset::Doge, "DOGE", "Dogecoin", ChainType::Utxo, ChainFamily::Bitcoin, 8),
    // Account-based
    entry(NativeAsset::Aca, "ACA", "Acala", ChainType::Account, ChainFamily::Substrate, 12),
    entry(NativeAsset::ArbEth, "ArbETH", "Arbitrum Ether", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Atom, "ATOM", "Atom (Cosmos)", ChainType::Account, ChainFamily::Cosmos, 6),
    entry(NativeAsset::AurEth, "AurETH", "Aurora", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Avax, "AVAX", "Avalanche", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Bnb, "BNB", "Binance Coin", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Celo, "CELO", "Celo", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Etc, "ETC", "Ethereum Classic", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Eth, "ETH", "Ether", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Ftm, "FTM", "Fantom", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Kar, "KAR", "Karura", ChainType::Account, ChainFamily::Substrate, 12),
    entry(NativeAsset::Klay, "KLAY", "Klaytn", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Luna, "LUNA", "Luna (Terra)", ChainType::Account, ChainFamily::Cosmos, 6),
    entry(NativeAsset::Matic, "MATIC", "Matic PoS (Polygon)", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::OptEth, "OptETH", "Optimism", ChainType::Account, ChainFamily::Evm, 18),
    entry(NativeAsset::Rose, "ROSE", "Rose (Oasis)", ChainType::Account, ChainFamily::Oasis, 9),
    entry(NativeAsset::Sol, "SOL", "Solana", ChainType::Account, ChainFamily::Solana, 9),
];

/// 大写符号 -> 注册表条目（进程内只构建一次，之后只读）
static SYMBOL_INDEX: Lazy<HashMap<String, &'static NativeAssetInfo>> = Lazy::new(|| {
    NATIVE_ASSETS
        .iter()
        .map(|info| (info.symbol.to_uppercase(), info))
        .collect()
});

impl NativeAsset {
    /// 按符号查找（大小写不敏感）
    pub fn lookup(symbol: &str) -> Option<NativeAsset> {
        SYMBOL_INDEX
            .get(&symbol.to_uppercase())
            .map(|info| info.asset)
    }

    /// 精确符号匹配（大小写敏感），用于资产分类与 AssetID 规范化
    ///
    /// `sol` 不是原生资产符号，而是一个默认链上的代币名。
    pub fn is_native(symbol: &str) -> bool {
        NATIVE_ASSETS.iter().any(|info| info.symbol == symbol)
    }

    pub fn all() -> impl Iterator<Item = NativeAsset> {
        NATIVE_ASSETS.iter().map(|info| info.asset)
    }

    pub fn info(self) -> &'static NativeAssetInfo {
        // 表与枚举同序
        &NATIVE_ASSETS[self as usize]
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn chain_type(self) -> ChainType {
        self.info().chain_type
    }

    pub fn family(self) -> ChainFamily {
        self.info().family
    }

    pub fn default_decimals(self) -> u32 {
        self.info().decimals
    }
}

impl fmt::Display for NativeAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for NativeAsset {
    type Err = XcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NativeAsset::lookup(s)
            .ok_or_else(|| XcError::invalid_input(format!("unsupported native asset: {}", s)))
    }
}

impl TryFrom<String> for NativeAsset {
    type Error = XcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NativeAsset> for String {
    fn from(value: NativeAsset) -> Self {
        value.symbol().to_string()
    }
}

/// 任意符号的链类型；非原生资产返回 Unknown
pub fn chain_type_of(symbol: &str) -> ChainType {
    NativeAsset::lookup(symbol)
        .map(NativeAsset::chain_type)
        .unwrap_or(ChainType::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_enum_order() {
        for (index, info) in NATIVE_ASSETS.iter().enumerate() {
            assert_eq!(info.asset as usize, index, "{} out of order", info.symbol);
            assert_eq!(info.asset.info().symbol, info.symbol);
        }
        assert_eq!(NativeAsset::all().count(), 20);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(NativeAsset::lookup("BTC"), Some(NativeAsset::Btc));
        assert_eq!(NativeAsset::lookup("sol"), Some(NativeAsset::Sol));
        assert_eq!(NativeAsset::lookup("ArbETH"), Some(NativeAsset::ArbEth));
        assert_eq!(NativeAsset::lookup("ARBETH"), Some(NativeAsset::ArbEth));
        assert_eq!(NativeAsset::lookup("USDC"), None);
        assert_eq!(NativeAsset::lookup(""), None);
    }

    #[test]
    fn test_is_native_is_exact() {
        assert!(NativeAsset::is_native("SOL"));
        assert!(NativeAsset::is_native("ArbETH"));
        assert!(!NativeAsset::is_native("sol"));
        assert!(!NativeAsset::is_native("ARBETH"));
        assert!(!NativeAsset::is_native(""));
    }

    #[test]
    fn test_chain_types() {
        assert_eq!(NativeAsset::Btc.chain_type(), ChainType::Utxo);
        assert_eq!(NativeAsset::Doge.chain_type(), ChainType::Utxo);
        assert_eq!(NativeAsset::Atom.chain_type(), ChainType::Account);
        assert_eq!(NativeAsset::Sol.chain_type(), ChainType::Account);
        assert_eq!(chain_type_of("USDC"), ChainType::Unknown);
        assert_eq!(chain_type_of("bch"), ChainType::Utxo);
    }

    #[test]
    fn test_families_and_decimals() {
        assert_eq!(NativeAsset::Eth.family(), ChainFamily::Evm);
        assert_eq!(NativeAsset::Luna.family(), ChainFamily::Cosmos);
        assert_eq!(NativeAsset::Btc.default_decimals(), 8);
        assert_eq!(NativeAsset::Atom.default_decimals(), 6);
        assert_eq!(NativeAsset::Eth.default_decimals(), 18);
        assert_eq!(DEFAULT_CHAIN.symbol(), "ETH");
    }

    #[test]
    fn test_serde_by_symbol() {
        let json = serde_json::to_string(&NativeAsset::OptEth).unwrap();
        assert_eq!(json, "\"OptETH\"");
        let back: NativeAsset = serde_json::from_str("\"atom\"").unwrap();
        assert_eq!(back, NativeAsset::Atom);
        assert!(serde_json::from_str::<NativeAsset>("\"FOO\"").is_err());
    }
}
