//! IronChain 命令行入口
//!
//! 用法：`ironchain <asset> <public-key-hex>`
//! 打印该资产所在链上、由公钥派生出的所有地址（JSON）。

use anyhow::{bail, Context, Result};
use ironchain::{
    chain::new_address_builder,
    config::Config,
    infrastructure::logging::{init_default_logging, init_logging},
};

fn main() -> Result<()> {
    // 1. 加载配置（CONFIG_PATH 指向的文件优先，否则使用环境变量）
    let config = Config::from_env_and_file(std::env::var("CONFIG_PATH").ok())?;

    // 2. 初始化日志
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        init_default_logging();
    }
    config.validate()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [asset, public_key] = args.as_slice() else {
        bail!("usage: ironchain <asset> <public-key-hex>");
    };

    // 3. 解析资产：已配置的资产优先，否则按原生资产处理
    let registry = config.asset_registry()?;
    let asset_config = match registry.get_by_asset(asset, "") {
        Some(found) => found.clone(),
        None => {
            tracing::info!(%asset, "asset not configured, using native defaults");
            let mut fallback = ironchain::domain::AssetConfig {
                asset: asset.clone(),
                ..Default::default()
            };
            fallback.resolve()?;
            fallback
        }
    };

    let public_key = hex::decode(public_key.trim_start_matches("0x"))
        .context("public key must be hex encoded")?;

    // 4. 派生地址
    let builder = new_address_builder(&asset_config)?;
    let addresses = builder
        .get_all_possible_addresses_from_public_key(&public_key)
        .map_err(|e| {
            tracing::warn!(attempted = ?e.attempted, "address derivation failed");
            e
        })?;

    println!("{}", serde_json::to_string_pretty(&addresses)?);
    Ok(())
}
