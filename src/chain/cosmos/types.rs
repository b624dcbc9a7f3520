//! Cosmos 原生类型与协作方边界
//!
//! 线格式编码、签名文档与交易构建由 SigningContext 的实现提供；
//! 适配器只通过这里的 trait 与其交互。

use std::{any::Any, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::domain::amount::AmountBlockchain;
use crate::error::Result;

/// bank 模块转账消息的类型 URL
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: AmountBlockchain,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: AmountBlockchain) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

/// 原生币转账
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Vec<Coin>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 协作方接口
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// 链原生消息
pub trait NativeMsg: fmt::Debug + Send + Sync {
    fn type_url(&self) -> &str;
    fn as_any(&self) -> &dyn Any;
    fn clone_box(&self) -> Box<dyn NativeMsg>;
}

impl Clone for Box<dyn NativeMsg> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl NativeMsg for MsgSend {
    fn type_url(&self) -> &str {
        MSG_SEND_TYPE_URL
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn NativeMsg> {
        Box::new(self.clone())
    }
}

/// 携带手续费的交易能力
pub trait FeeTx {
    fn fee(&self) -> &[Coin];
    fn gas(&self) -> u64;
}

/// 链原生交易
pub trait NativeTx: fmt::Debug + Send + Sync {
    fn msgs(&self) -> &[Box<dyn NativeMsg>];
    fn memo(&self) -> &str;

    /// 不支持手续费能力的交易类型返回 None
    fn as_fee_tx(&self) -> Option<&dyn FeeTx> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// 可变的交易构建器；`get_tx` 总是反映最近一次修改
pub trait NativeTxBuilder: Send + Sync {
    fn set_msgs(&mut self, msgs: Vec<Box<dyn NativeMsg>>) -> Result<()>;
    fn set_fee_amount(&mut self, fee: Vec<Coin>);
    fn set_gas_limit(&mut self, gas: u64);
    fn set_memo(&mut self, memo: &str);
    fn set_signatures(&mut self, signatures: Vec<SignatureV2>) -> Result<()>;
    fn get_tx(&self) -> &dyn NativeTx;
}

/// 交易编码函数
pub type TxEncoder = Arc<dyn Fn(&dyn NativeTx) -> Result<Vec<u8>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMode {
    Direct,
    LegacyAminoJson,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureData {
    Single {
        sign_mode: SignMode,
        signature: Vec<u8>,
    },
    Multi {
        signatures: Vec<SignatureData>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureV2 {
    /// 压缩 secp256k1 公钥
    pub pub_key: Vec<u8>,
    pub data: SignatureData,
    pub sequence: u64,
}

/// 签名文档中与签名者相关的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerData {
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
}

/// 一种签名模式下的完整编码/签名环境
pub trait SigningContext: Send + Sync {
    fn new_tx_builder(&self) -> Box<dyn NativeTxBuilder>;
    fn tx_encoder(&self) -> TxEncoder;
    fn sign_mode(&self) -> SignMode;
    /// 规范签名文档字节
    fn sign_bytes(&self, signer: &SignerData, tx: &dyn NativeTx) -> Result<Vec<u8>>;
}

/// 适配器能识别的转账种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTransfer {
    BankSend {
        from: String,
        to: String,
        amount: Vec<Coin>,
    },
}

impl ParsedTransfer {
    /// 未识别的消息类型返回 None
    pub fn from_native(msg: &dyn NativeMsg) -> Option<Self> {
        msg.as_any()
            .downcast_ref::<MsgSend>()
            .map(|send| ParsedTransfer::BankSend {
                from: send.from_address.clone(),
                to: send.to_address.clone(),
                amount: send.amount.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Vote;

    impl NativeMsg for Vote {
        fn type_url(&self) -> &str {
            "/cosmos.gov.v1beta1.MsgVote"
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn clone_box(&self) -> Box<dyn NativeMsg> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_parse_bank_send() {
        let send = MsgSend {
            from_address: "cosmos1from".to_string(),
            to_address: "cosmos1to".to_string(),
            amount: vec![Coin::new("uatom", AmountBlockchain::from_u64(10))],
        };
        let boxed: Box<dyn NativeMsg> = Box::new(send);
        assert_eq!(boxed.type_url(), MSG_SEND_TYPE_URL);

        match ParsedTransfer::from_native(boxed.clone().as_ref()) {
            Some(ParsedTransfer::BankSend { from, to, amount }) => {
                assert_eq!(from, "cosmos1from");
                assert_eq!(to, "cosmos1to");
                assert_eq!(amount[0].amount, AmountBlockchain::from_u64(10));
            }
            None => panic!("MsgSend should be recognized"),
        }
    }

    #[test]
    fn test_unrecognized_msg() {
        assert_eq!(ParsedTransfer::from_native(&Vote), None);
    }
}
