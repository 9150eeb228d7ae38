// roomchat-core/roomchat-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use futures::{stream, StreamExt};
use mockall::predicate;
use pretty_assertions::assert_eq;
use tokio::sync::oneshot;
use url::Url;

use roomchat_core::app::deps::AppContext;
use roomchat_core::domain::composition::models::ComposerError;
use roomchat_core::domain::uploads::models::UploadFailure;
use roomchat_core::domain::uploads::services::{BlobMetadata, BlobUpload, BlobUploadEvent};
use roomchat_core::dtos::{
    ComposerPhase, DestinationPath, MessageKey, RoomId, SourceFile, UploadJobId, UploadStatus,
};
use roomchat_core::infra::session::SharedRoomContext;
use roomchat_core::test::{mock_data, MessageBuilder};
use roomchat_core::{AppConfig, ComposerEvent, ComposerService};

use super::helpers::{deps_in_room, EventRecorder};

fn cat_picture() -> SourceFile {
    SourceFile::with_guessed_media_type("cat.jpg", vec![0; 200])
}

fn progress(bytes_transferred: u64) -> BlobUploadEvent {
    BlobUploadEvent::Progress {
        bytes_transferred,
        total_bytes: 200,
    }
}

fn events(events: Vec<BlobUploadEvent>) -> BlobUpload {
    stream::iter(events).boxed()
}

#[tokio::test]
async fn test_uploads_image_and_sends_it() -> Result<()> {
    let mut deps = deps_in_room();

    deps.blob_store
        .expect_put()
        .once()
        .with(
            predicate::eq(DestinationPath::from("images/id-1.jpg")),
            predicate::eq(cat_picture()),
            predicate::eq(BlobMetadata {
                content_type: mime::IMAGE_JPEG,
            }),
        )
        .return_once(|_, _, _| {
            Box::pin(async {
                Ok(events(vec![
                    progress(20),
                    progress(110),
                    progress(200),
                    BlobUploadEvent::Completed,
                ]))
            })
        });
    deps.blob_store
        .expect_download_url()
        .once()
        .with(predicate::eq(DestinationPath::from("images/id-1.jpg")))
        .return_once(|_| Box::pin(async { Ok(Url::parse("https://x/img.jpg").unwrap()) }));
    deps.log_store
        .expect_append()
        .once()
        .with(
            predicate::eq(mock_data::room_id()),
            predicate::eq(MessageBuilder::image("https://x/img.jpg").build_message()),
        )
        .return_once(|_, _| Box::pin(async { Ok(MessageKey::from("msg-1")) }));
    deps.scroll_sink
        .expect_scroll_to_latest()
        .once()
        .with(predicate::eq(mock_data::room_id()))
        .return_const(());

    let recorder = Arc::new(EventRecorder::default());
    let mut deps = deps.into_deps();
    deps.delegate = Some(recorder.clone());
    let composer = ComposerService::from(deps);

    composer.set_draft_text("unrelated draft");
    composer.open_upload_modal();
    let handle = composer
        .start_upload(cat_picture())?
        .expect("upload should start");

    assert!(!composer.state().upload_modal_open);
    assert_eq!(composer.upload_progress(), 0);
    assert!(matches!(composer.phase(), ComposerPhase::Uploading(_)));

    handle.finished().await;

    let state = composer.state();
    assert_eq!(state.upload_progress(), 0);
    assert_eq!(state.phase(), ComposerPhase::Composing);
    assert_eq!(state.draft_text, "unrelated draft");
    assert_eq!(
        state.last_upload.map(|job| job.status),
        Some(UploadStatus::Succeeded {
            url: Url::parse("https://x/img.jpg")?
        })
    );

    let job_id = UploadJobId::new(1);
    assert_eq!(
        recorder.events(),
        vec![
            ComposerEvent::RoomChanged {
                room_id: Some(mock_data::room_id())
            },
            ComposerEvent::UploadProgressed { job_id, percent: 10 },
            ComposerEvent::UploadProgressed { job_id, percent: 55 },
            ComposerEvent::UploadProgressed {
                job_id,
                percent: 100
            },
            ComposerEvent::MessageSent {
                room_id: mock_data::room_id(),
                key: MessageKey::from("msg-1")
            },
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_failed_upload_resets_progress_and_sends_nothing() -> Result<()> {
    let mut deps = deps_in_room();

    deps.blob_store.expect_put().once().return_once(|_, _, _| {
        Box::pin(async {
            Ok(events(vec![
                progress(20),
                BlobUploadEvent::Failed {
                    reason: "quota_exceeded".to_string(),
                },
            ]))
        })
    });
    deps.blob_store.expect_download_url().never();
    deps.log_store.expect_append().never();
    deps.scroll_sink.expect_scroll_to_latest().never();

    let recorder = Arc::new(EventRecorder::default());
    let mut deps = deps.into_deps();
    deps.delegate = Some(recorder.clone());
    let composer = ComposerService::from(deps);

    composer.open_upload_modal();
    let handle = composer
        .start_upload(cat_picture())?
        .expect("upload should start");
    handle.finished().await;

    let state = composer.state();
    assert_eq!(state.upload_progress(), 0);
    assert_eq!(state.phase(), ComposerPhase::Idle);
    assert_eq!(
        state.last_upload.map(|job| job.status),
        Some(UploadStatus::Failed {
            reason: "quota_exceeded".to_string()
        })
    );
    assert_eq!(
        recorder.events().last(),
        Some(&ComposerEvent::UploadFailed {
            job_id: UploadJobId::new(1),
            reason: "quota_exceeded".to_string()
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_rejects_oversized_and_unsupported_files_before_uploading() -> Result<()> {
    let mut deps = deps_in_room();
    deps.ctx = AppContext::new(AppConfig {
        max_upload_size: 100,
        ..Default::default()
    });
    deps.blob_store.expect_put().never();
    deps.log_store.expect_append().never();

    let composer = deps.into_composer();

    composer.open_upload_modal();
    let result = composer.start_upload(cat_picture());
    assert_eq!(
        result.map(|handle| handle.is_some()),
        Err(ComposerError::Upload(UploadFailure::file_too_large(200, 100)))
    );
    assert!(!composer.state().upload_modal_open);

    composer.open_upload_modal();
    let result = composer.start_upload(SourceFile::with_guessed_media_type(
        "notes.txt",
        vec![0; 10],
    ));
    assert_eq!(
        result.map(|handle| handle.is_some()),
        Err(ComposerError::Upload(UploadFailure::unsupported_media_type(
            &mime::TEXT_PLAIN
        )))
    );

    let state = composer.state();
    assert_eq!(state.phase(), ComposerPhase::Idle);
    assert!(matches!(
        state.last_upload.map(|job| job.status),
        Some(UploadStatus::Failed { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_upload_requires_open_modal() -> Result<()> {
    let mut deps = deps_in_room();
    deps.blob_store.expect_put().never();

    let composer = deps.into_composer();

    assert!(composer.start_upload(cat_picture())?.is_none());
    assert_eq!(composer.phase(), ComposerPhase::Idle);

    Ok(())
}

#[tokio::test]
async fn test_new_upload_supersedes_running_one() -> Result<()> {
    let mut deps = deps_in_room();

    deps.blob_store
        .expect_put()
        .times(0..=1)
        .with(
            predicate::eq(DestinationPath::from("images/id-1.jpg")),
            predicate::always(),
            predicate::always(),
        )
        .return_once(|_, _, _| Box::pin(async { Ok(stream::pending::<BlobUploadEvent>().boxed()) }));
    deps.blob_store
        .expect_put()
        .once()
        .with(
            predicate::eq(DestinationPath::from("images/id-2.jpg")),
            predicate::always(),
            predicate::always(),
        )
        .return_once(|_, _, _| {
            Box::pin(async { Ok(events(vec![progress(200), BlobUploadEvent::Completed])) })
        });
    deps.blob_store
        .expect_download_url()
        .once()
        .with(predicate::eq(DestinationPath::from("images/id-2.jpg")))
        .return_once(|_| Box::pin(async { Ok(Url::parse("https://x/2.jpg").unwrap()) }));
    deps.log_store
        .expect_append()
        .once()
        .with(
            predicate::always(),
            predicate::eq(MessageBuilder::image("https://x/2.jpg").build_message()),
        )
        .return_once(|_, _| Box::pin(async { Ok(MessageKey::from("msg-1")) }));
    deps.scroll_sink
        .expect_scroll_to_latest()
        .once()
        .return_const(());

    let recorder = Arc::new(EventRecorder::default());
    let mut deps = deps.into_deps();
    deps.delegate = Some(recorder.clone());
    let composer = ComposerService::from(deps);

    composer.open_upload_modal();
    let first = composer
        .start_upload(cat_picture())?
        .expect("upload should start");

    composer.open_upload_modal();
    let second = composer
        .start_upload(cat_picture())?
        .expect("upload should start");

    assert!(first.is_cancelled());
    assert_eq!(second.job_id(), UploadJobId::new(2));

    first.finished().await;
    second.finished().await;

    assert_eq!(
        recorder.events()[1..].to_vec(),
        vec![
            ComposerEvent::UploadProgressed {
                job_id: UploadJobId::new(2),
                percent: 100
            },
            ComposerEvent::MessageSent {
                room_id: mock_data::room_id(),
                key: MessageKey::from("msg-1")
            },
        ]
    );
    assert_eq!(
        composer.state().last_upload.map(|job| job.id),
        Some(UploadJobId::new(2))
    );

    Ok(())
}

#[tokio::test]
async fn test_room_switch_cancels_upload() -> Result<()> {
    let room_context = SharedRoomContext::new(Some(mock_data::room_id()));

    let mut deps = deps_in_room();
    deps.blob_store
        .expect_put()
        .times(0..=1)
        .return_once(|_, _, _| Box::pin(async { Ok(stream::pending::<BlobUploadEvent>().boxed()) }));
    deps.log_store.expect_append().never();

    let mut deps = deps.into_deps();
    deps.room_context = Arc::new(room_context.clone());
    let composer = ComposerService::from(deps);

    composer.open_upload_modal();
    let handle = composer
        .start_upload(cat_picture())?
        .expect("upload should start");

    room_context.set_current_room(Some(RoomId::from("random")));
    assert_eq!(composer.sync_room(), Some(RoomId::from("random")));

    assert!(handle.is_cancelled());
    handle.finished().await;

    let state = composer.state();
    assert_eq!(state.phase(), ComposerPhase::Idle);
    assert_eq!(state.last_upload, None);
    assert_eq!(state.upload_progress(), 0);

    Ok(())
}

#[tokio::test]
async fn test_upload_of_previous_room_reports_nothing_after_switch() -> Result<()> {
    let room_context = SharedRoomContext::new(Some(mock_data::room_id()));
    let (release_tx, release_rx) = oneshot::channel::<()>();

    let mut deps = deps_in_room();
    deps.blob_store
        .expect_put()
        .once()
        .return_once(move |_, _, _| {
            Box::pin(async move {
                let released = stream::once(async move {
                    _ = release_rx.await;
                    progress(110)
                });
                Ok(released
                    .chain(stream::iter(vec![BlobUploadEvent::Failed {
                        reason: "quota_exceeded".to_string(),
                    }]))
                    .boxed())
            })
        });
    deps.blob_store.expect_download_url().never();
    deps.log_store.expect_append().never();

    let recorder = Arc::new(EventRecorder::default());
    let mut deps = deps.into_deps();
    deps.delegate = Some(recorder.clone());
    deps.room_context = Arc::new(room_context.clone());
    let composer = ComposerService::from(deps);

    composer.open_upload_modal();
    let handle = composer
        .start_upload(cat_picture())?
        .expect("upload should start");

    // The composer learns about the switch only from the upload's own callbacks.
    room_context.set_current_room(Some(RoomId::from("random")));
    _ = release_tx.send(());
    handle.finished().await;

    assert!(handle.is_cancelled());
    assert_eq!(
        recorder.events(),
        vec![
            ComposerEvent::RoomChanged {
                room_id: Some(mock_data::room_id())
            },
            ComposerEvent::RoomChanged {
                room_id: Some(RoomId::from("random"))
            },
        ]
    );

    let state = composer.state();
    assert_eq!(state.last_upload, None);
    assert_eq!(state.upload_progress(), 0);
    assert_eq!(state.phase(), ComposerPhase::Idle);

    Ok(())
}

#[tokio::test]
async fn test_sends_text_while_uploading() -> Result<()> {
    let mut deps = deps_in_room();
    deps.blob_store
        .expect_put()
        .times(0..=1)
        .return_once(|_, _, _| Box::pin(async { Ok(stream::pending::<BlobUploadEvent>().boxed()) }));
    deps.log_store
        .expect_append()
        .once()
        .with(
            predicate::eq(mock_data::room_id()),
            predicate::eq(MessageBuilder::text("hello").build_message()),
        )
        .return_once(|_, _| Box::pin(async { Ok(MessageKey::from("msg-1")) }));
    deps.scroll_sink
        .expect_scroll_to_latest()
        .once()
        .return_const(());

    let composer = deps.into_composer();

    composer.open_upload_modal();
    let handle = composer
        .start_upload(cat_picture())?
        .expect("upload should start");

    composer.set_draft_text("hello");
    assert_eq!(composer.send_draft().await?, Some(MessageKey::from("msg-1")));

    assert_eq!(composer.draft_text(), "");
    assert!(matches!(composer.phase(), ComposerPhase::Uploading(_)));
    assert!(!handle.is_cancelled());

    composer.dispose();
    handle.finished().await;

    Ok(())
}

#[tokio::test]
async fn test_starts_upload_while_text_is_sending() -> Result<()> {
    let (release_tx, release_rx) = oneshot::channel::<()>();

    let mut deps = deps_in_room();
    deps.log_store
        .expect_append()
        .once()
        .with(
            predicate::always(),
            predicate::eq(MessageBuilder::text("hello").build_message()),
        )
        .return_once(move |_, _| {
            Box::pin(async move {
                _ = release_rx.await;
                Ok(MessageKey::from("msg-1"))
            })
        });
    deps.blob_store
        .expect_put()
        .times(0..=1)
        .return_once(|_, _, _| Box::pin(async { Ok(stream::pending::<BlobUploadEvent>().boxed()) }));
    deps.scroll_sink
        .expect_scroll_to_latest()
        .once()
        .return_const(());

    let composer = deps.into_composer();
    composer.set_draft_text("hello");

    let (result, upload) = tokio::join!(composer.send_draft(), async {
        assert!(matches!(composer.phase(), ComposerPhase::Sending(_)));
        composer.open_upload_modal();
        let upload = composer.start_upload(cat_picture());
        _ = release_tx.send(());
        upload
    });

    assert_eq!(result?, Some(MessageKey::from("msg-1")));
    let handle = upload?.expect("upload should start");

    assert_eq!(composer.draft_text(), "");
    assert!(matches!(composer.phase(), ComposerPhase::Uploading(_)));
    assert!(!handle.is_cancelled());

    composer.dispose();
    handle.finished().await;

    Ok(())
}
