//! 旧版 amino-JSON 签名模式
//!
//! 签名文档为键名排序的紧凑 JSON；签名与公钥以 base64 编码。

use std::{any::Any, sync::Arc};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::tx::CosmosTx;
use super::types::{
    Coin, FeeTx, MsgSend, NativeMsg, NativeTx, NativeTxBuilder, SignMode, SignatureData,
    SignatureV2, SignerData, SigningContext, TxEncoder,
};
use crate::error::{Result, XcError};

const MSG_SEND_AMINO_TYPE: &str = "cosmos-sdk/MsgSend";
const STD_TX_AMINO_TYPE: &str = "cosmos-sdk/StdTx";
const SECP256K1_PUBKEY_TYPE: &str = "tendermint/PubKeySecp256k1";

/// 以 amino 类型名保存的任意消息（解码时遇到的未知消息）
#[derive(Debug, Clone, PartialEq)]
pub struct AminoMsg {
    pub kind: String,
    pub value: Value,
}

impl NativeMsg for AminoMsg {
    fn type_url(&self) -> &str {
        &self.kind
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn NativeMsg> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StdTx {
    pub msgs: Vec<Box<dyn NativeMsg>>,
    pub fee: Vec<Coin>,
    pub gas: u64,
    pub memo: String,
    pub signatures: Vec<SignatureV2>,
}

impl NativeTx for StdTx {
    fn msgs(&self) -> &[Box<dyn NativeMsg>] {
        &self.msgs
    }

    fn memo(&self) -> &str {
        &self.memo
    }

    fn as_fee_tx(&self) -> Option<&dyn FeeTx> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FeeTx for StdTx {
    fn fee(&self) -> &[Coin] {
        &self.fee
    }

    fn gas(&self) -> u64 {
        self.gas
    }
}

#[derive(Debug, Default)]
pub struct AminoTxBuilder {
    tx: StdTx,
}

impl NativeTxBuilder for AminoTxBuilder {
    fn set_msgs(&mut self, msgs: Vec<Box<dyn NativeMsg>>) -> Result<()> {
        for msg in &msgs {
            msg_to_amino(msg.as_ref())?;
        }
        self.tx.msgs = msgs;
        Ok(())
    }

    fn set_fee_amount(&mut self, fee: Vec<Coin>) {
        self.tx.fee = fee;
    }

    fn set_gas_limit(&mut self, gas: u64) {
        self.tx.gas = gas;
    }

    fn set_memo(&mut self, memo: &str) {
        self.tx.memo = memo.to_string();
    }

    fn set_signatures(&mut self, signatures: Vec<SignatureV2>) -> Result<()> {
        if signatures
            .iter()
            .any(|sig| matches!(sig.data, SignatureData::Multi { .. }))
        {
            return Err(XcError::invalid_input(
                "amino json does not support multisig signatures",
            ));
        }
        self.tx.signatures = signatures;
        Ok(())
    }

    fn get_tx(&self) -> &dyn NativeTx {
        &self.tx
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AminoJsonContext;

impl SigningContext for AminoJsonContext {
    fn new_tx_builder(&self) -> Box<dyn NativeTxBuilder> {
        Box::new(AminoTxBuilder::default())
    }

    fn tx_encoder(&self) -> TxEncoder {
        Arc::new(encode_tx)
    }

    fn sign_mode(&self) -> SignMode {
        SignMode::LegacyAminoJson
    }

    fn sign_bytes(&self, signer: &SignerData, tx: &dyn NativeTx) -> Result<Vec<u8>> {
        let (fee, gas) = tx
            .as_fee_tx()
            .map(|fee_tx| (fee_tx.fee().to_vec(), fee_tx.gas()))
            .unwrap_or_default();
        let msgs = tx
            .msgs()
            .iter()
            .map(|msg| msg_to_amino(msg.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let doc = json!({
            "account_number": signer.account_number.to_string(),
            "chain_id": signer.chain_id,
            "fee": {
                "amount": serde_json::to_value(fee)?,
                "gas": gas.to_string(),
            },
            "memo": tx.memo(),
            "msgs": msgs,
            "sequence": signer.sequence.to_string(),
        });
        Ok(serde_json::to_vec(&doc)?)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 线格式
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Serialize, Deserialize)]
struct WireTx {
    #[serde(rename = "type")]
    kind: String,
    value: WireStdTx,
}

#[derive(Serialize, Deserialize)]
struct WireStdTx {
    msg: Vec<WireMsg>,
    fee: WireFee,
    #[serde(default)]
    signatures: Vec<WireSignature>,
    #[serde(default)]
    memo: String,
}

#[derive(Serialize, Deserialize)]
struct WireMsg {
    #[serde(rename = "type")]
    kind: String,
    value: Value,
}

#[derive(Serialize, Deserialize)]
struct WireFee {
    amount: Vec<Coin>,
    gas: String,
}

#[derive(Serialize, Deserialize)]
struct WireSignature {
    pub_key: WirePubKey,
    signature: String,
}

#[derive(Serialize, Deserialize)]
struct WirePubKey {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

fn msg_to_amino(msg: &dyn NativeMsg) -> Result<Value> {
    if let Some(send) = msg.as_any().downcast_ref::<MsgSend>() {
        return Ok(json!({
            "type": MSG_SEND_AMINO_TYPE,
            "value": serde_json::to_value(send)?,
        }));
    }
    if let Some(raw) = msg.as_any().downcast_ref::<AminoMsg>() {
        return Ok(json!({ "type": raw.kind, "value": raw.value }));
    }
    Err(XcError::encoding(format!(
        "no amino encoding for message {}",
        msg.type_url()
    )))
}

/// StdTx 编码；未签名（存在空签名）的交易不可编码
pub fn encode_tx(tx: &dyn NativeTx) -> Result<Vec<u8>> {
    let std_tx = tx
        .as_any()
        .downcast_ref::<StdTx>()
        .ok_or_else(|| XcError::encoding("amino encoder only accepts StdTx"))?;

    let mut signatures = Vec::with_capacity(std_tx.signatures.len());
    for sig in &std_tx.signatures {
        let signature = match &sig.data {
            SignatureData::Single { signature, .. } if !signature.is_empty() => signature,
            SignatureData::Single { .. } => {
                return Err(XcError::encoding("transaction is not signed"))
            }
            SignatureData::Multi { .. } => {
                return Err(XcError::encoding("multisig signatures are not supported"))
            }
        };
        signatures.push(WireSignature {
            pub_key: WirePubKey {
                kind: SECP256K1_PUBKEY_TYPE.to_string(),
                value: STANDARD.encode(&sig.pub_key),
            },
            signature: STANDARD.encode(signature),
        });
    }

    let msg = std_tx
        .msgs
        .iter()
        .map(|msg| {
            msg_to_amino(msg.as_ref()).and_then(|value| {
                serde_json::from_value::<WireMsg>(value).map_err(XcError::from)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let wire = WireTx {
        kind: STD_TX_AMINO_TYPE.to_string(),
        value: WireStdTx {
            msg,
            fee: WireFee {
                amount: std_tx.fee.clone(),
                gas: std_tx.gas.to_string(),
            },
            signatures,
            memo: std_tx.memo.clone(),
        },
    };
    // 经由 Value 输出，保证键名有序
    Ok(serde_json::to_vec(&serde_json::to_value(&wire)?)?)
}

/// 解码查询得到的 StdTx；MsgSend 以外的消息保留为 AminoMsg
pub fn decode_tx(bytes: &[u8]) -> Result<CosmosTx> {
    let wire: WireTx = serde_json::from_slice(bytes)?;
    if wire.kind != STD_TX_AMINO_TYPE {
        return Err(XcError::encoding(format!("unexpected tx type {}", wire.kind)));
    }

    let mut msgs: Vec<Box<dyn NativeMsg>> = Vec::with_capacity(wire.value.msg.len());
    for msg in wire.value.msg {
        if msg.kind == MSG_SEND_AMINO_TYPE {
            msgs.push(Box::new(serde_json::from_value::<MsgSend>(msg.value)?));
        } else {
            msgs.push(Box::new(AminoMsg {
                kind: msg.kind,
                value: msg.value,
            }));
        }
    }

    let mut signatures = Vec::with_capacity(wire.value.signatures.len());
    for sig in wire.value.signatures {
        signatures.push(SignatureV2 {
            pub_key: decode_base64(&sig.pub_key.value)?,
            data: SignatureData::Single {
                sign_mode: SignMode::LegacyAminoJson,
                signature: decode_base64(&sig.signature)?,
            },
            sequence: 0,
        });
    }

    let gas = wire
        .value
        .fee
        .gas
        .parse::<u64>()
        .map_err(|e| XcError::encoding(format!("invalid gas '{}': {}", wire.value.fee.gas, e)))?;

    let std_tx = StdTx {
        msgs,
        fee: wire.value.fee.amount,
        gas,
        memo: wire.value.memo,
        signatures,
    };
    Ok(CosmosTx::decoded(
        Box::new(std_tx),
        Some(AminoJsonContext.tx_encoder()),
    ))
}

fn decode_base64(value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| XcError::encoding(format!("invalid base64: {}", e)))
}
