// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Display, Formatter};

use url::Url;

use super::{DestinationPath, SourceFile};

/// Identity of an upload job. Ids grow monotonically within a composer, which makes them usable as
/// generation markers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UploadJobId(u64);

impl UploadJobId {
    pub fn new(value: u64) -> Self {
        UploadJobId(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Debug for UploadJobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "UploadJobId({})", self.0)
    }
}

impl Display for UploadJobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "upload-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Idle,
    InProgress { percent: u8 },
    Succeeded { url: Url },
    Failed { reason: String },
}

impl UploadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Succeeded { .. } | UploadStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadJob {
    pub id: UploadJobId,
    pub source_file: SourceFile,
    pub destination_path: DestinationPath,
    pub status: UploadStatus,
}

impl UploadJob {
    pub fn new(id: UploadJobId, source_file: SourceFile, destination_path: DestinationPath) -> Self {
        Self {
            id,
            source_file,
            destination_path,
            status: UploadStatus::Idle,
        }
    }

    /// Percentage shown in the progress bar. Only an in-flight job reports progress.
    pub fn percent(&self) -> u8 {
        match self.status {
            UploadStatus::InProgress { percent } => percent,
            UploadStatus::Idle | UploadStatus::Succeeded { .. } | UploadStatus::Failed { .. } => 0,
        }
    }

    /// Returns false if the job already reached a terminal state.
    pub fn set_progress(&mut self, percent: u8) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = UploadStatus::InProgress {
            percent: percent.min(100),
        };
        true
    }

    pub fn succeed(&mut self, url: Url) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = UploadStatus::Succeeded { url };
        true
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = UploadStatus::Failed {
            reason: reason.into(),
        };
        true
    }
}
