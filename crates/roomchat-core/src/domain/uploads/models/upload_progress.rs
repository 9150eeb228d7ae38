// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// `round(100 * bytes_transferred / total_bytes)`, clamped to `0..=100`.
pub fn percent_uploaded(bytes_transferred: u64, total_bytes: u64) -> u8 {
    if total_bytes == 0 {
        return 0;
    }

    let transferred = u128::from(bytes_transferred.min(total_bytes));
    let total = u128::from(total_bytes);

    ((transferred * 100 + total / 2) / total) as u8
}

/// Tracks the progress of a single upload. The reported percentage never decreases.
#[derive(Debug, Default, Clone)]
pub struct UploadProgress {
    last_percent: u8,
}

impl UploadProgress {
    pub fn advance(&mut self, bytes_transferred: u64, total_bytes: u64) -> u8 {
        self.last_percent = self
            .last_percent
            .max(percent_uploaded(bytes_transferred, total_bytes));
        self.last_percent
    }
}
