//! 资产标识模型
//!
//! 用户输入的资产符号（"USDC"、"USDC.SOL"、"sol"）在这里被规范化为唯一的 AssetID。
//! 规则：原生资产或默认链上的代币使用裸符号，其余代币使用 `SYMBOL.CHAIN`。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chain_config::{chain_type_of, ChainType, NativeAsset, DEFAULT_CHAIN};

/// 资产符号与链后缀之间的分隔符
pub const ASSET_SEPARATOR: char = '.';

/// 资产类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Native,
    Token,
}

/// 用户或配置给出的资产符号（尚未消歧）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asset(String);

impl Asset {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 类型只由原生资产注册表的成员测试决定
    pub fn asset_type(&self) -> AssetType {
        asset_type_of(&self.0)
    }

    pub fn chain_type(&self) -> ChainType {
        chain_type_of(&self.0)
    }
}

impl From<NativeAsset> for Asset {
    fn from(native: NativeAsset) -> Self {
        Self(native.symbol().to_string())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn asset_type_of(symbol: &str) -> AssetType {
    if NativeAsset::is_native(symbol) {
        AssetType::Native
    } else {
        AssetType::Token
    }
}

/// 资产的规范化内部标识
///
/// 例如：`ETH`、`USDC`（默认链代币）、`USDC.SOL`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// 由 (asset, native_hint) 计算规范 AssetID
    ///
    /// # 示例
    /// ```rust
    /// # use ironchain::domain::asset::AssetId;
    /// assert_eq!(AssetId::canonicalize("USDC", "").as_str(), "USDC");
    /// assert_eq!(AssetId::canonicalize("USDC", "ETH").as_str(), "USDC");
    /// assert_eq!(AssetId::canonicalize("USDC", "SOL").as_str(), "USDC.SOL");
    /// assert_eq!(AssetId::canonicalize("USDC.SOL", "").as_str(), "USDC.SOL");
    /// ```
    pub fn canonicalize(asset: &str, native_hint: &str) -> AssetId {
        let Some((asset, native)) = parse_asset_and_native(asset, native_hint) else {
            // 两者皆空：表示"未指定资产"，不是错误
            return AssetId::default();
        };

        let asset = asset.to_uppercase();
        let valid_native = NativeAsset::is_native(&asset);

        // 原生资产，例如 BTC、ETH、SOL
        if asset == native {
            return AssetId(asset);
        }
        // 默认链上的代币省略链后缀
        if native == DEFAULT_CHAIN.symbol() && !valid_native {
            return AssetId(asset);
        }
        // 其他代币，例如 USDC.SOL
        AssetId(format!("{}{}{}", asset, ASSET_SEPARATOR, native))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 便捷函数，等价于 [`AssetId::canonicalize`]
pub fn get_asset_id(asset: &str, native_hint: &str) -> AssetId {
    AssetId::canonicalize(asset, native_hint)
}

/// 拆分 asset 与 native_hint
///
/// 返回 (asset, 大写的 native)；两者皆空时返回 None。
/// asset 本身保持原始大小写，由调用方决定是否大写化。
pub(crate) fn parse_asset_and_native(asset: &str, native_hint: &str) -> Option<(String, String)> {
    if asset.is_empty() && native_hint.is_empty() {
        return None;
    }

    let mut asset = if asset.is_empty() {
        native_hint.to_string()
    } else {
        asset.to_string()
    };
    let mut native = native_hint.to_string();

    // "USDC.SOL" 与 ("USDC", "SOL") 等价
    let split = match asset.split(ASSET_SEPARATOR).collect::<Vec<_>>().as_slice() {
        [symbol, suffix] if NativeAsset::is_native(suffix) => {
            Some((symbol.to_string(), suffix.to_string()))
        }
        _ => None,
    };
    if let Some((symbol, suffix)) = split {
        asset = symbol;
        if native.is_empty() {
            native = suffix;
        }
    }

    if native.is_empty() {
        if NativeAsset::is_native(&asset) {
            native = asset.clone();
        } else {
            tracing::trace!(asset = %asset, "no chain given for token, defaulting to {}", DEFAULT_CHAIN);
            native = DEFAULT_CHAIN.symbol().to_string();
        }
    }

    Some((asset, native.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(asset: &str, native: &str) -> String {
        AssetId::canonicalize(asset, native).to_string()
    }

    #[test]
    fn test_default_chain_omission() {
        assert_eq!(id("USDC", ""), "USDC");
        assert_eq!(id("USDC", "ETH"), "USDC");
        assert_eq!(id("USDC", "SOL"), "USDC.SOL");
        assert_eq!(id("USDC.SOL", ""), "USDC.SOL");
        assert_eq!(id("USDC.ETH", ""), "USDC");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(id("", ""), "");
        assert!(AssetId::canonicalize("", "").is_empty());
    }

    #[test]
    fn test_native_shorthand() {
        assert_eq!(id("", "SOL"), "SOL");
        assert_eq!(id("", "sol"), "SOL");
        assert_eq!(id("ETH", "ETH"), "ETH");
    }

    #[test]
    fn test_lowercase_native_symbol_is_a_token() {
        // 分类按精确符号进行：小写的 sol 先被当作默认链代币，大写化后才与 SOL 同名
        assert_eq!(id("sol", ""), "SOL.ETH");
        assert_eq!(id("btc", ""), "BTC.ETH");
        assert_eq!(id("usdc.sol", ""), "USDC.SOL");
        assert_eq!(id("sol", "sol"), "SOL");
    }

    #[test]
    fn test_native_self_identity() {
        for native in NativeAsset::all() {
            let symbol = native.symbol();
            let expected = symbol.to_uppercase();
            assert_eq!(id(symbol, ""), expected, "{}", symbol);
            assert_eq!(id(symbol, symbol), expected, "{}", symbol);
            if symbol == expected {
                assert_eq!(id(symbol, ""), symbol);
            }
        }
    }

    #[test]
    fn test_case_normalization() {
        assert_eq!(id("usdc", "sol"), "USDC.SOL");
        assert_eq!(id("usdc.sol", ""), "USDC.SOL");
        assert_eq!(id("usdc", "eth"), "USDC");
    }

    #[test]
    fn test_native_asset_as_token_on_other_chain() {
        // 跨链包装资产
        assert_eq!(id("ETH", "SOL"), "ETH.SOL");
        assert_eq!(id("SOL", "ETH"), "SOL.ETH");
        assert_eq!(id("ETH.SOL", ""), "ETH.SOL");
    }

    #[test]
    fn test_explicit_hint_wins_over_suffix() {
        assert_eq!(id("USDC.SOL", "ATOM"), "USDC.ATOM");
    }

    #[test]
    fn test_unrecognized_suffix_is_kept_verbatim() {
        assert_eq!(id("USDC.FOO", ""), "USDC.FOO");
        assert_eq!(id("A.B.SOL", ""), "A.B.SOL");
        assert_eq!(id("USDC", "FOO"), "USDC.FOO");
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            ("USDC", ""),
            ("USDC", "ETH"),
            ("USDC", "SOL"),
            ("usdc.sol", ""),
            ("sol", ""),
            ("btc", ""),
            ("", "atom"),
            ("ETH", "SOL"),
            ("SOL", "ETH"),
            ("ArbETH", ""),
            ("USDT", "ArbETH"),
            ("USDC", "FOO"),
            ("A.B.SOL", ""),
            (".SOL", ""),
            ("", ""),
        ];
        for (asset, native) in inputs {
            let once = AssetId::canonicalize(asset, native);
            let twice = AssetId::canonicalize(once.as_str(), "");
            assert_eq!(once, twice, "({:?}, {:?})", asset, native);
        }
    }

    #[test]
    fn test_asset_type_classification() {
        assert_eq!(Asset::new("BTC").asset_type(), AssetType::Native);
        assert_eq!(Asset::new("sol").asset_type(), AssetType::Token);
        assert_eq!(Asset::new("ArbETH").asset_type(), AssetType::Native);
        assert_eq!(Asset::new("USDC").asset_type(), AssetType::Token);
        assert_eq!(Asset::from(NativeAsset::Atom).asset_type(), AssetType::Native);
        assert_eq!(Asset::new("DOGE").chain_type(), ChainType::Utxo);
        assert_eq!(Asset::new("USDC").chain_type(), ChainType::Unknown);
    }
}
