//! IronChain - 多链交易抽象层
//!
//! 链无关的地址、资产、金额与交易模型；各链族在统一契约之后提供具体实现。
//! 核心层不持有私钥，只准备待签名载荷并接收外部签名。

pub mod chain;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// 重新导出常用类型
pub use error::{Result, XcError};

// 统一模块导出
pub mod prelude {
    pub use crate::{
        chain::new_address_builder,
        config::Config,
        domain::{
            Address, AddressBuilder, AmountBlockchain, AmountHumanReadable, AssetConfig, AssetId,
            AssetRegistry, NativeAsset, TransferView, Tx, TxBuilder, TxInfo,
        },
        error::{Result, XcError},
    };
}
