//! 金额模型
//!
//! 双表示：链上最小单位整数（AmountBlockchain）与人类可读小数（AmountHumanReadable）。
//! 两者之间的换算只由资产的 decimals 参数决定，且必须精确。

use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, XcError};

/// 链上金额（最小单位，任意精度有符号整数）
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountBlockchain(BigInt);

/// 人类可读金额（按 decimals 缩放后的任意精度小数）
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct AmountHumanReadable(BigDecimal);

impl AmountBlockchain {
    pub fn new(value: BigInt) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigInt::from(value))
    }

    /// 超出 u64 范围（或为负数）时返回 None，而不是静默截断
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_bigint(self) -> BigInt {
        self.0
    }

    /// 转换为人类可读金额（value / 10^decimals），无损
    pub fn to_human(&self, decimals: u32) -> AmountHumanReadable {
        AmountHumanReadable(BigDecimal::new(self.0.clone(), i64::from(decimals)))
    }
}

impl AmountHumanReadable {
    pub fn new(value: BigDecimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// 乘以整数因子（例如 gas_price × gas_limit）
    pub fn mul_u64(&self, factor: u64) -> Self {
        Self(self.0.clone() * BigDecimal::from(factor))
    }

    /// 转换为链上金额（value × 10^decimals）
    ///
    /// 小数位超过 decimals 时返回 InvalidInput，不做任何舍入
    pub fn to_blockchain(&self, decimals: u32) -> Result<AmountBlockchain> {
        let (quotient, remainder) = self.split_scaled(decimals)?;
        if !remainder.is_zero() {
            return Err(XcError::invalid_input(format!(
                "amount exceeds {} decimal places",
                decimals
            )));
        }
        Ok(AmountBlockchain(quotient))
    }

    /// 转换为链上金额，多余的小数位向上取整
    pub fn to_blockchain_ceil(&self, decimals: u32) -> Result<AmountBlockchain> {
        let (quotient, remainder) = self.split_scaled(decimals)?;
        if remainder.is_positive() {
            return Ok(AmountBlockchain(quotient + 1u32));
        }
        Ok(AmountBlockchain(quotient))
    }

    /// 返回 (整数部分, 余数)；整数除法向零截断
    fn split_scaled(&self, decimals: u32) -> Result<(BigInt, BigInt)> {
        let (digits, scale) = self.0.as_bigint_and_exponent();
        if digits.is_zero() {
            return Ok((BigInt::zero(), BigInt::zero()));
        }
        let shift = i64::from(decimals)
            .checked_sub(scale)
            .ok_or_else(|| XcError::invalid_input("decimal exponent out of range"))?;

        if shift >= 0 {
            if shift > MAX_SCALE_SHIFT {
                return Err(XcError::invalid_input(format!(
                    "amount magnitude exceeds 10^{}",
                    MAX_SCALE_SHIFT
                )));
            }
            return Ok((digits * pow10(shift)?, BigInt::zero()));
        }

        // |value| < 1：商为 0，余数即全部有效数字，无需计算 10^|shift|
        let digit_count = digits.magnitude().to_string().len() as u64;
        if shift.unsigned_abs() > digit_count {
            return Ok((BigInt::zero(), digits));
        }

        let divisor = pow10(-shift)?;
        let remainder = &digits % &divisor;
        Ok((digits / divisor, remainder))
    }
}

/// 单次换算允许的最大 10 的幂
const MAX_SCALE_SHIFT: i64 = 1024;

fn pow10(exponent: i64) -> Result<BigInt> {
    let exponent = u32::try_from(exponent)
        .map_err(|_| XcError::invalid_input("decimal exponent out of range"))?;
    Ok(BigInt::from(10u8).pow(exponent))
}

impl From<BigInt> for AmountBlockchain {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl From<u64> for AmountBlockchain {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<BigDecimal> for AmountHumanReadable {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for AmountBlockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 普通小数记法，去掉尾随零（不使用科学计数法）
impl fmt::Display for AmountHumanReadable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.normalized().to_plain_string())
    }
}

impl FromStr for AmountBlockchain {
    type Err = XcError;

    fn from_str(s: &str) -> Result<Self> {
        BigInt::from_str(s.trim())
            .map(Self)
            .map_err(|e| XcError::invalid_input(format!("invalid integer amount '{}': {}", s, e)))
    }
}

impl FromStr for AmountHumanReadable {
    type Err = XcError;

    fn from_str(s: &str) -> Result<Self> {
        BigDecimal::from_str(s.trim())
            .map(Self)
            .map_err(|e| XcError::invalid_input(format!("invalid decimal amount '{}': {}", s, e)))
    }
}

// 金额一律以字符串序列化，避免 JSON 数字精度丢失
impl Serialize for AmountBlockchain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AmountBlockchain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for AmountHumanReadable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AmountHumanReadable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
