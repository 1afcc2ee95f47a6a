// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

const DEFAULT_MAX_HANDLES_PER_TABLE: u32 = 65_536;
const DEFAULT_MAX_BUFFERED_MESSAGE_LEN: usize = 64 * 1024 * 1024;

/// Resource limits for a [`CryptoCtx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoCtxConfig {
    max_handles_per_table: u32,
    max_buffered_message_len: usize,
}

impl Default for CryptoCtxConfig {
    fn default() -> Self {
        Self {
            max_handles_per_table: DEFAULT_MAX_HANDLES_PER_TABLE,
            max_buffered_message_len: DEFAULT_MAX_BUFFERED_MESSAGE_LEN,
        }
    }
}

impl CryptoCtxConfig {
    /// Sets how many live entries each handle table may hold.
    ///
    /// Values beyond the 24-bit handle index space are clamped.
    pub fn with_max_handles_per_table(mut self, max: u32) -> Self {
        self.max_handles_per_table = max.clamp(1, handle_table::MAX_TABLE_ENTRIES);
        self
    }

    /// Sets how many message bytes a buffering signature state may hold.
    pub fn with_max_buffered_message_len(mut self, max: usize) -> Self {
        self.max_buffered_message_len = max;
        self
    }

    /// Live entries allowed per handle table.
    pub fn max_handles_per_table(&self) -> u32 {
        self.max_handles_per_table
    }

    /// Message bytes a buffering signature state may hold.
    pub fn max_buffered_message_len(&self) -> usize {
        self.max_buffered_message_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CryptoCtxConfig::default();
        assert_eq!(config.max_handles_per_table(), 65_536);
        assert_eq!(config.max_buffered_message_len(), 64 * 1024 * 1024);
    }

    #[test]
    fn test_handle_limit_clamped() {
        let config = CryptoCtxConfig::default().with_max_handles_per_table(u32::MAX);
        assert_eq!(
            config.max_handles_per_table(),
            handle_table::MAX_TABLE_ENTRIES
        );
        let config = CryptoCtxConfig::default().with_max_handles_per_table(0);
        assert_eq!(config.max_handles_per_table(), 1);
    }
}
