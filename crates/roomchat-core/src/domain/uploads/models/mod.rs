// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use destination_path::DestinationPath;
pub use source_file::SourceFile;
pub use upload_failure::UploadFailure;
pub use upload_job::{UploadJob, UploadJobId, UploadStatus};
pub use upload_progress::{percent_uploaded, UploadProgress};

mod destination_path;
mod source_file;
mod upload_failure;
mod upload_job;
mod upload_progress;
