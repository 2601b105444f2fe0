// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Product identifier validation and EAN-13 check digit computation.

use serde::{Deserialize, Serialize};

use crate::config::IdentifierPolicy;
use crate::error::LabelSheetError;

/// Digits in a complete EAN-13 code.
pub const FULL_LEN: usize = 13;
/// Digits in the payload preceding the check digit.
pub const PAYLOAD_LEN: usize = FULL_LEN - 1;

/// True iff `code` is exactly `len` ASCII digits.
fn is_digits(code: &str, len: usize) -> bool {
    code.len() == len && code.bytes().all(|b| b.is_ascii_digit())
}

/// Pattern check for a raw identifier under `policy`. Never fails.
pub fn validate(code: &str, policy: IdentifierPolicy) -> bool {
    is_digits(code, policy.expected_len())
}

/// Weighted-modulo check digit over a 12-digit payload.
///
/// Even zero-based positions weigh 1, odd positions weigh 3. Returns `None`
/// for anything that is not exactly 12 digits.
pub fn check_digit(payload: &str) -> Option<u8> {
    if !is_digits(payload, PAYLOAD_LEN) {
        return None;
    }
    let sum: u32 = payload
        .bytes()
        .enumerate()
        .map(|(pos, b)| {
            let digit = u32::from(b - b'0');
            if pos % 2 == 0 { digit } else { digit * 3 }
        })
        .sum();
    Some(((10 - sum % 10) % 10) as u8)
}

/// Payload followed by its check digit.
pub fn complete(payload: &str) -> Option<String> {
    let digit = check_digit(payload)?;
    Some(format!("{payload}{digit}"))
}

/// A final, ready-to-encode 13-digit identifier.
///
/// Only [`Identifier::resolve`] and the validating [`TryFrom<String>`] build
/// one (deserialization goes through the latter), so holding an `Identifier`
/// means the pattern check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate a raw cell value and complete it under `policy`.
    pub fn resolve(raw: &str, policy: IdentifierPolicy) -> Option<Self> {
        if !validate(raw, policy) {
            return None;
        }
        match policy {
            IdentifierPolicy::FullLength => Some(Self(raw.to_owned())),
            IdentifierPolicy::ComputeCheckDigit => complete(raw).map(Self),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first 12 digits.
    pub fn payload(&self) -> &str {
        self.0.get(..PAYLOAD_LEN).unwrap_or(&self.0)
    }

    /// Whether the trailing digit matches the payload.
    ///
    /// Always true for codes completed by [`IdentifierPolicy::ComputeCheckDigit`];
    /// pre-computed codes may carry a wrong digit.
    pub fn has_valid_check_digit(&self) -> bool {
        match self.0.as_bytes().get(PAYLOAD_LEN) {
            Some(&trailing) => check_digit(self.payload()) == Some(trailing.wrapping_sub(b'0')),
            None => false,
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = LabelSheetError;

    /// Accept a complete 13-digit code; the check digit is not verified here.
    fn try_from(code: String) -> Result<Self, Self::Error> {
        if is_digits(&code, FULL_LEN) {
            Ok(Self(code))
        } else {
            Err(LabelSheetError::BarcodeGeneration(format!(
                "invalid JAN code: {code}"
            )))
        }
    }
}

impl From<Identifier> for String {
    fn from(identifier: Identifier) -> Self {
        identifier.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
