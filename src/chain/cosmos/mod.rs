//! Cosmos 系列适配器 (ATOM, LUNA)

pub mod address;
pub mod amino;
pub mod builder;
pub mod tx;
pub mod types;

pub use address::CosmosAddressBuilder;
pub use amino::{decode_tx, encode_tx, AminoJsonContext, AminoMsg, AminoTxBuilder, StdTx};
pub use builder::{CosmosTxBuilder, CosmosTxInput};
pub use tx::CosmosTx;
pub use types::{
    Coin, FeeTx, MsgSend, NativeMsg, NativeTx, NativeTxBuilder, ParsedTransfer, SignMode,
    SignatureData, SignatureV2, SignerData, SigningContext, TxEncoder, MSG_SEND_TYPE_URL,
};
