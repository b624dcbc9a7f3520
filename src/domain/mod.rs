//! Domain 模块
//!
//! 链无关的核心模型：金额、资产标识、地址派生契约、交易契约

pub mod address;
pub mod amount;
pub mod asset;
pub mod asset_config;
pub mod chain_config;
pub mod tx;

// Re-exports
// 重新导出常用类型
pub use address::{Address, AddressBuilder, AddressType, ContractAddress, PartialDerivation, PossibleAddress};
pub use amount::{AmountBlockchain, AmountHumanReadable};
pub use asset::{get_asset_id, Asset, AssetId, AssetType};
pub use asset_config::{AssetConfig, AssetRegistry};
pub use chain_config::{ChainFamily, ChainType, NativeAsset, DEFAULT_CHAIN};
pub use tx::{
    project_tx_info, TransferView, Tx, TxBuilder, TxConfirmation, TxDataToSign, TxHash, TxInfo,
    TxInput, TxSignature,
};
