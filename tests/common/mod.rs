//! 测试辅助模块
//! 提供测试工具和辅助函数

#![allow(dead_code)]

use ironchain::domain::AssetConfig;

/// secp256k1 生成元 G（私钥 = 1）的压缩公钥
pub const COMPRESSED_G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

/// 同一把公钥的未压缩形式
pub const UNCOMPRESSED_G: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

pub fn key(hex_key: &str) -> Vec<u8> {
    hex::decode(hex_key).expect("valid hex test key")
}

/// 已解析的 Cosmos Hub 配置
pub fn atom_config() -> AssetConfig {
    let mut config = AssetConfig {
        asset: "ATOM".to_string(),
        net: "mainnet".to_string(),
        chain_id_str: "cosmoshub-4".to_string(),
        chain_prefix: "cosmos".to_string(),
        chain_coin: "uatom".to_string(),
        ..Default::default()
    };
    config.resolve().expect("ATOM config resolves");
    config
}

/// 已解析的原生资产配置
pub fn native_config(asset: &str, net: &str) -> AssetConfig {
    let mut config = AssetConfig {
        asset: asset.to_string(),
        net: net.to_string(),
        ..Default::default()
    };
    config.resolve().expect("native config resolves");
    config
}
