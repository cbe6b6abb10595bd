//! Memo handling for transfers
//!
//! Memos are free UTF-8 text attached to a transfer. Control characters are
//! rejected, except line breaks (`\n`, `\r`) and tab, and the byte length is
//! bounded.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum memo length in bytes
pub const MAX_MEMO_LENGTH: usize = 512;

/// Memo length at which the form starts warning
pub const MEMO_WARNING_LENGTH: usize = 400;

/// Validated memo text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Memo(String);

impl Memo {
    /// Create a memo with strict validation.
    ///
    /// Empty text means "no memo" and yields `None`.
    pub fn from_text(text: impl Into<String>) -> Result<Option<Self>> {
        let text = text.into();
        if text.is_empty() {
            return Ok(None);
        }

        if !Self::is_valid_memo_text(&text) {
            return Err(Error::InvalidMemo(
                "Memo contains invalid characters (control characters not allowed)".to_string(),
            ));
        }

        // Byte length, not char count
        if text.len() > MAX_MEMO_LENGTH {
            return Err(Error::MemoTooLong(format!(
                "Memo is {} bytes, maximum is {} bytes",
                text.len(),
                MAX_MEMO_LENGTH
            )));
        }

        Ok(Some(Memo(text)))
    }

    fn is_valid_memo_text(text: &str) -> bool {
        text.chars()
            .all(|c| c == '\n' || c == '\t' || c == '\r' || !c.is_control())
    }

    /// Borrow memo text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte length of memo text
    pub fn byte_len(&self) -> usize {
        self.0.len()
    }

    /// Bytes still available
    pub fn remaining_bytes(&self) -> usize {
        MAX_MEMO_LENGTH.saturating_sub(self.byte_len())
    }

    /// Check if memo is approaching length limit
    pub fn is_near_limit(&self) -> bool {
        self.byte_len() > MEMO_WARNING_LENGTH
    }
}

impl TryFrom<String> for Memo {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        Memo::from_text(text)?.ok_or_else(|| Error::InvalidMemo("memo is empty".to_string()))
    }
}

impl From<Memo> for String {
    fn from(memo: Memo) -> Self {
        memo.0
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
