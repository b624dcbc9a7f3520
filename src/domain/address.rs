//! 地址派生契约
//!
//! 每个链族提供一个 AddressBuilder：公钥字节 -> 该链的地址字符串。

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Result, XcError};

/// 链上地址（格式由链决定）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

/// 代币合约地址（或 denom）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddress(String);

macro_rules! string_newtype {
    ($name:ident) => {
        impl $name {
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

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_newtype!(Address);
string_newtype!(ContractAddress);

/// 同一把公钥可派生出的地址种类
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    #[default]
    Default,
    /// P2SH-P2WPKH
    NestedSegwit,
    /// P2PKH
    Legacy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleAddress {
    pub address: Address,
    #[serde(rename = "type")]
    pub address_type: AddressType,
}

impl PossibleAddress {
    pub fn new(address: Address, address_type: AddressType) -> Self {
        Self {
            address,
            address_type,
        }
    }

    pub fn default_variant(address: Address) -> Self {
        Self::new(address, AddressType::Default)
    }
}

/// 派生失败，但仍返回已尝试的候选列表
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("address derivation failed: {source}")]
pub struct PartialDerivation {
    pub attempted: Vec<PossibleAddress>,
    #[source]
    pub source: XcError,
}

/// 地址派生器
pub trait AddressBuilder: Send + Sync {
    /// 由公钥派生该链的默认地址
    fn get_address_from_public_key(&self, public_key: &[u8]) -> Result<Address>;

    /// 所有可能的地址形式（调用方据此识别用户持有的是哪一种）
    ///
    /// 默认实现只返回默认地址。失败时 `attempted` 仍包含一个空的默认候选。
    fn get_all_possible_addresses_from_public_key(
        &self,
        public_key: &[u8],
    ) -> std::result::Result<Vec<PossibleAddress>, PartialDerivation> {
        match self.get_address_from_public_key(public_key) {
            Ok(address) => Ok(vec![PossibleAddress::default_variant(address)]),
            Err(source) => Err(PartialDerivation {
                attempted: vec![PossibleAddress::default()],
                source,
            }),
        }
    }
}
