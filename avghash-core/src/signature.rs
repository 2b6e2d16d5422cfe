//! Average-hash signatures.
//!
//! A [`Signature`] is an ordered sequence of bits, one per grid cell. Its wire
//! format is a fixed-length ASCII string of `'0'` and `'1'` characters, which
//! is also what serde produces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AvgHashError, Result};

/// Immutable bit sequence produced by the fingerprint extractor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Signature {
    bits: Vec<bool>,
}

impl Signature {
    /// Create a signature from raw bits.
    ///
    /// Fails with [`AvgHashError::InvalidSignature`] if `bits` is empty. The
    /// length is checked against a grid size only when comparing.
    pub fn from_bits(bits: Vec<bool>) -> Result<Self> {
        if bits.is_empty() {
            return Err(AvgHashError::InvalidSignature(
                "signature must contain at least one bit".into(),
            ));
        }
        Ok(Self { bits })
    }

    /// Bits in extraction order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always `false`; an empty signature cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of set bits (cells at or above the mean).
    pub fn count_ones(&self) -> u32 {
        self.bits.iter().filter(|bit| **bit).count() as u32
    }

    /// Pack the bits into bytes, most significant bit first.
    ///
    /// The final byte is zero-padded when the length is not a multiple of 8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, bit)| byte | ((*bit as u8) << (7 - i)))
            })
            .collect()
    }

    /// Packed form as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decode a packed hexadecimal signature of `bit_len` bits.
    pub fn from_hex(hex_str: &str, bit_len: usize) -> Result<Self> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| AvgHashError::InvalidSignature(format!("Invalid hex string: {}", e)))?;

        let expected_bytes = bit_len.div_ceil(8);
        if bytes.len() != expected_bytes {
            return Err(AvgHashError::LengthMismatch {
                expected: bit_len,
                actual: bytes.len() * 8,
            });
        }

        let bits: Vec<bool> = bytes
            .iter()
            .flat_map(|byte| (0..8).map(move |i| byte & (0x80 >> i) != 0))
            .collect();

        if bits[bit_len..].iter().any(|bit| *bit) {
            return Err(AvgHashError::InvalidSignature(
                "non-zero padding bits".into(),
            ));
        }

        Self::from_bits(bits[..bit_len].to_vec())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded: String = self
            .bits
            .iter()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect();
        f.write_str(&encoded)
    }
}

impl FromStr for Signature {
    type Err = AvgHashError;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(i, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(AvgHashError::InvalidSignature(format!(
                    "unexpected character {:?} at position {}",
                    other, i
                ))),
            })
            .collect::<Result<Vec<bool>>>()?;

        Self::from_bits(bits)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.to_string()
    }
}

impl TryFrom<String> for Signature {
    type Error = AvgHashError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
