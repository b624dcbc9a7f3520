//! 交易契约
//!
//! 生命周期：Unbuilt -> Built（可取 sighash）-> Signed -> 序列化/哈希，只进不退。

use std::{any::Any, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::address::{Address, ContractAddress};
use crate::domain::amount::AmountBlockchain;
use crate::error::Result;

/// 交易哈希（十六进制）；空字符串表示交易尚未最终确定
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 外部签名方需要签名的字节
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxDataToSign(pub Vec<u8>);

/// 外部签名方产出的签名字节
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxSignature(pub Vec<u8>);

impl TxDataToSign {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TxSignature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for TxSignature {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for TxDataToSign {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// 每个链适配器的交易都实现此接口
///
/// 单个实例不可在多个签名流程之间共享（`add_signature` 需要 `&mut self`）。
pub trait Tx: Send {
    /// 序列化字节的内容哈希；无法序列化时返回空哈希而不是错误
    fn hash(&self) -> TxHash;

    /// 待签名载荷；未构建时返回 NotInitialized
    fn sighash(&self) -> Result<TxDataToSign>;

    /// 写入（唯一的）签名槽；重复调用覆盖之前的签名
    fn add_signature(&mut self, signature: TxSignature) -> Result<()>;

    /// 链原生编码
    fn serialize(&self) -> Result<Vec<u8>>;
}

/// 从链原生交易中提取的转账视图
///
/// 无法识别的消息类型返回零值，不是错误。
pub trait TransferView {
    fn from(&self) -> Address;
    fn to(&self) -> Address;
    fn contract_address(&self) -> ContractAddress;
    fn amount(&self) -> AmountBlockchain;
    fn fee(&self) -> AmountBlockchain;
}

/// 查询交易时由网络侧提供的确认信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxConfirmation {
    pub block_index: i64,
    pub block_time: i64,
    pub confirmations: i64,
}

/// 链无关的交易信息投影（构造后不再修改）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInfo {
    pub tx_id: TxHash,
    pub from: Address,
    pub to: Address,
    /// 次要接收方（例如中转地址）
    pub to_alt: Address,
    pub contract_address: ContractAddress,
    pub amount: AmountBlockchain,
    pub fee: AmountBlockchain,
    pub block_index: i64,
    pub block_time: i64,
    pub confirmations: i64,
}

/// 把任意实现了 Tx + TransferView 的交易投影为 TxInfo
pub fn project_tx_info<T>(tx: &T, confirmation: TxConfirmation) -> TxInfo
where
    T: Tx + TransferView + ?Sized,
{
    TxInfo {
        tx_id: tx.hash(),
        from: tx.from(),
        to: tx.to(),
        to_alt: Address::default(),
        contract_address: tx.contract_address(),
        amount: tx.amount(),
        fee: tx.fee(),
        block_index: confirmation.block_index,
        block_time: confirmation.block_time,
        confirmations: confirmation.confirmations,
    }
}

/// 链相关的构建上下文（nonce、sequence、UTXO 等），核心层不解释其内容
pub trait TxInput: fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// 交易构建器
pub trait TxBuilder {
    type Tx: Tx;

    fn new_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: &AmountBlockchain,
        input: &dyn TxInput,
    ) -> Result<Self::Tx>;
}
