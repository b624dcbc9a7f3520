//! Cosmos 交易
//!
//! 显式阶段机：Unbuilt -> Built -> Signed；查询得到的交易处于只读的 Decoded 阶段。

use sha2::{Digest, Sha256};

use super::types::{
    NativeTx, NativeTxBuilder, ParsedTransfer, SignatureData, SignatureV2, TxEncoder,
};
use crate::domain::address::{Address, ContractAddress};
use crate::domain::amount::AmountBlockchain;
use crate::domain::tx::{
    project_tx_info, TransferView, Tx, TxConfirmation, TxDataToSign, TxHash, TxInfo, TxSignature,
};
use crate::error::{Result, XcError};

/// 构建阶段的全部状态
struct Staged {
    builder: Box<dyn NativeTxBuilder>,
    encoder: TxEncoder,
    /// 签名者占位（恰好一个）
    signer_data: Vec<SignatureV2>,
    sighash: Vec<u8>,
}

enum Stage {
    Unbuilt,
    Decoded {
        tx: Box<dyn NativeTx>,
        encoder: Option<TxEncoder>,
    },
    Built(Box<Staged>),
    Signed(Box<Staged>),
}

pub struct CosmosTx {
    stage: Stage,
}

impl Default for CosmosTx {
    fn default() -> Self {
        Self::unbuilt()
    }
}

impl std::fmt::Debug for CosmosTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosTx")
            .field("stage", &self.stage_name())
            .field("msgs", &self.native_tx().map(|tx| tx.msgs().len()))
            .finish()
    }
}

impl CosmosTx {
    pub fn unbuilt() -> Self {
        Self {
            stage: Stage::Unbuilt,
        }
    }

    /// 查询得到的交易（只读；无编码器时不可序列化）
    pub fn decoded(tx: Box<dyn NativeTx>, encoder: Option<TxEncoder>) -> Self {
        Self {
            stage: Stage::Decoded { tx, encoder },
        }
    }

    pub(crate) fn built(
        builder: Box<dyn NativeTxBuilder>,
        encoder: TxEncoder,
        signer_data: Vec<SignatureV2>,
        sighash: Vec<u8>,
    ) -> Result<Self> {
        if signer_data.len() != 1 {
            return Err(XcError::invalid_input(format!(
                "expected exactly one signer, got {}",
                signer_data.len()
            )));
        }
        if sighash.is_empty() {
            return Err(XcError::invalid_input("empty sighash"));
        }
        Ok(Self {
            stage: Stage::Built(Box::new(Staged {
                builder,
                encoder,
                signer_data,
                sighash,
            })),
        })
    }

    pub fn stage_name(&self) -> &'static str {
        match self.stage {
            Stage::Unbuilt => "unbuilt",
            Stage::Decoded { .. } => "decoded",
            Stage::Built(_) => "built",
            Stage::Signed(_) => "signed",
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self.stage, Stage::Signed(_))
    }

    /// 当前交易视图：构建器的视图优先（反映签名后的修改）
    pub fn native_tx(&self) -> Option<&dyn NativeTx> {
        match &self.stage {
            Stage::Unbuilt => None,
            Stage::Decoded { tx, .. } => Some(tx.as_ref()),
            Stage::Built(staged) | Stage::Signed(staged) => Some(staged.builder.get_tx()),
        }
    }

    fn encoder(&self) -> Option<&TxEncoder> {
        match &self.stage {
            Stage::Unbuilt => None,
            Stage::Decoded { encoder, .. } => encoder.as_ref(),
            Stage::Built(staged) | Stage::Signed(staged) => Some(&staged.encoder),
        }
    }

    /// 第一条可识别的转账消息；其余消息不参与投影
    pub fn parsed_transfer(&self) -> Option<ParsedTransfer> {
        self.native_tx()?
            .msgs()
            .iter()
            .find_map(|msg| ParsedTransfer::from_native(msg.as_ref()))
    }

    pub fn tx_info(&self, confirmation: TxConfirmation) -> TxInfo {
        project_tx_info(self, confirmation)
    }
}

impl Tx for CosmosTx {
    fn hash(&self) -> TxHash {
        match self.serialize() {
            Ok(bytes) if !bytes.is_empty() => TxHash::new(hex::encode(Sha256::digest(&bytes))),
            Ok(_) => TxHash::default(),
            Err(e) => {
                tracing::debug!(stage = self.stage_name(), error = %e, "tx not serializable yet");
                TxHash::default()
            }
        }
    }

    fn sighash(&self) -> Result<TxDataToSign> {
        match &self.stage {
            Stage::Built(staged) | Stage::Signed(staged) => Ok(TxDataToSign(staged.sighash.clone())),
            _ => Err(XcError::not_initialized("no sighash staged")),
        }
    }

    fn add_signature(&mut self, signature: TxSignature) -> Result<()> {
        let staged = match &mut self.stage {
            Stage::Built(staged) | Stage::Signed(staged) => staged,
            _ => return Err(XcError::not_initialized("no signing context")),
        };
        if signature.0.is_empty() {
            return Err(XcError::invalid_input("signature is empty"));
        }

        let mut signatures = staged.signer_data.clone();
        match signatures.first_mut().map(|slot| &mut slot.data) {
            Some(SignatureData::Single { signature: slot, .. }) => *slot = signature.0,
            Some(SignatureData::Multi { .. }) => {
                return Err(XcError::invalid_input("multisig signers are not supported"))
            }
            None => return Err(XcError::not_initialized("no signer slot")),
        }
        staged.builder.set_signatures(signatures.clone())?;
        staged.signer_data = signatures;

        if let Stage::Built(_) = self.stage {
            if let Stage::Built(staged) = std::mem::replace(&mut self.stage, Stage::Unbuilt) {
                self.stage = Stage::Signed(staged);
            }
        }
        tracing::debug!("signature injected");
        Ok(())
    }

    fn serialize(&self) -> Result<Vec<u8>> {
        let encoder = self
            .encoder()
            .ok_or_else(|| XcError::not_initialized("no tx encoder"))?;
        let tx = self
            .native_tx()
            .ok_or_else(|| XcError::not_initialized("no transaction"))?;
        encoder(tx)
    }
}

impl TransferView for CosmosTx {
    fn from(&self) -> Address {
        match self.parsed_transfer() {
            Some(ParsedTransfer::BankSend { from, .. }) => Address::new(from),
            None => Address::default(),
        }
    }

    fn to(&self) -> Address {
        match self.parsed_transfer() {
            Some(ParsedTransfer::BankSend { to, .. }) => Address::new(to),
            None => Address::default(),
        }
    }

    /// 仅支持原生币转账
    fn contract_address(&self) -> ContractAddress {
        ContractAddress::default()
    }

    fn amount(&self) -> AmountBlockchain {
        match self.parsed_transfer() {
            Some(ParsedTransfer::BankSend { amount, .. }) => amount
                .into_iter()
                .next()
                .map(|coin| coin.amount)
                .unwrap_or_default(),
            None => AmountBlockchain::zero(),
        }
    }

    /// 无手续费能力或手续费为空时为零
    fn fee(&self) -> AmountBlockchain {
        self.native_tx()
            .and_then(|tx| tx.as_fee_tx())
            .and_then(|fee_tx| fee_tx.fee().first())
            .map(|coin| coin.amount.clone())
            .unwrap_or_default()
    }
}
