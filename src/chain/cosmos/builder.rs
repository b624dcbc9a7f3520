//! Cosmos 交易构建

use std::{any::Any, sync::Arc};

use sha2::{Digest, Sha256};

use super::amino::AminoJsonContext;
use super::tx::CosmosTx;
use super::types::{
    Coin, MsgSend, NativeMsg, SignatureData, SignatureV2, SignerData, SigningContext,
};
use crate::domain::address::Address;
use crate::domain::amount::{AmountBlockchain, AmountHumanReadable};
use crate::domain::asset_config::AssetConfig;
use crate::domain::chain_config::ChainFamily;
use crate::domain::tx::{TxBuilder, TxInput};
use crate::error::{Result, XcError};

/// 构建一笔 Cosmos 交易所需的链上上下文
#[derive(Debug, Clone, Default)]
pub struct CosmosTxInput {
    pub account_number: u64,
    pub sequence: u64,
    pub gas_limit: u64,
    /// 每单位 gas 的价格（以 chain_coin 最小单位计）
    pub gas_price: AmountHumanReadable,
    pub memo: String,
    /// 33 字节压缩公钥
    pub from_public_key: Vec<u8>,
    /// 为空时使用配置中的 chain_id_str
    pub chain_id: String,
}

impl TxInput for CosmosTxInput {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct CosmosTxBuilder {
    asset: AssetConfig,
    context: Arc<dyn SigningContext>,
}

impl CosmosTxBuilder {
    pub fn new(asset: &AssetConfig, context: Arc<dyn SigningContext>) -> Result<Self> {
        let native = asset.native_asset()?;
        if native.family() != ChainFamily::Cosmos {
            return Err(XcError::invalid_input(format!(
                "{} is not a cosmos chain",
                native
            )));
        }
        if asset.chain_coin.is_empty() {
            return Err(XcError::invalid_input(format!(
                "chain_coin is required for {}",
                native
            )));
        }
        Ok(Self {
            asset: asset.clone(),
            context,
        })
    }

    /// 使用内置的 amino-JSON 签名模式
    pub fn with_amino(asset: &AssetConfig) -> Result<Self> {
        Self::new(asset, Arc::new(AminoJsonContext))
    }

    fn new_native_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: &AmountBlockchain,
        input: &CosmosTxInput,
    ) -> Result<CosmosTx> {
        let denom = self.asset.chain_coin.as_str();
        let chain_id = if input.chain_id.is_empty() {
            self.asset.chain_id_str.clone()
        } else {
            input.chain_id.clone()
        };
        if chain_id.is_empty() {
            return Err(XcError::invalid_input("chain id is required"));
        }

        if input.gas_price.is_negative() {
            return Err(XcError::invalid_input(format!(
                "gas price must not be negative: {}",
                input.gas_price
            )));
        }
        let fee = input
            .gas_price
            .mul_u64(input.gas_limit)
            .to_blockchain_ceil(0)?;

        let msg = MsgSend {
            from_address: from.to_string(),
            to_address: to.to_string(),
            amount: vec![Coin::new(denom, amount.clone())],
        };

        let mut builder = self.context.new_tx_builder();
        builder.set_msgs(vec![Box::new(msg) as Box<dyn NativeMsg>])?;
        builder.set_fee_amount(vec![Coin::new(denom, fee)]);
        builder.set_gas_limit(input.gas_limit);
        builder.set_memo(&input.memo);

        // 空签名占位，签名文档需要签名者信息
        let placeholder = SignatureV2 {
            pub_key: input.from_public_key.clone(),
            data: SignatureData::Single {
                sign_mode: self.context.sign_mode(),
                signature: Vec::new(),
            },
            sequence: input.sequence,
        };
        builder.set_signatures(vec![placeholder.clone()])?;

        let signer = SignerData {
            chain_id,
            account_number: input.account_number,
            sequence: input.sequence,
        };
        let sign_bytes = self.context.sign_bytes(&signer, builder.get_tx())?;
        let sighash = Sha256::digest(&sign_bytes).to_vec();

        tracing::debug!(
            asset = %self.asset.id,
            from = %from,
            to = %to,
            amount = %amount,
            "built cosmos transfer"
        );
        CosmosTx::built(builder, self.context.tx_encoder(), vec![placeholder], sighash)
    }
}

impl TxBuilder for CosmosTxBuilder {
    type Tx = CosmosTx;

    fn new_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: &AmountBlockchain,
        input: &dyn TxInput,
    ) -> Result<CosmosTx> {
        let input = input
            .as_any()
            .downcast_ref::<CosmosTxInput>()
            .ok_or_else(|| XcError::invalid_input("expected CosmosTxInput"))?;

        if self.asset.is_token() {
            return Err(XcError::not_implemented("cosmos token transfers"));
        }
        self.new_native_transfer(from, to, amount, input)
    }
}
