// roomchat-core/roomchat-core-integration-tests
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use pretty_assertions::assert_eq;
use url::Url;

use roomchat_core::domain::composition::models::ComposerError;
use roomchat_core::domain::shared::models::ValidationError;
use roomchat_core::dtos::{ComposerPhase, MessageBody, RoomId, SourceFile, UploadStatus};
use roomchat_core::infra::messaging::InMemoryRoomLog;
use roomchat_core::infra::session::{SharedRoomContext, StaticAuthProvider};
use roomchat_core::infra::uploads::InMemoryBlobStore;
use roomchat_core::test::{mock_data, ConstantTimeProvider, IncrementingIDProvider};
use roomchat_core::ComposerService;

use super::helpers::ScrollRecorder;

struct Fixture {
    auth_provider: StaticAuthProvider,
    composer: ComposerService,
    room_context: SharedRoomContext,
    room_log: Arc<InMemoryRoomLog>,
    scroll_sink: ScrollRecorder,
}

fn fixture(blob_store: InMemoryBlobStore) -> Result<Fixture> {
    let room_log = Arc::new(InMemoryRoomLog::new(
        Arc::new(IncrementingIDProvider::new("msg")),
        Arc::new(ConstantTimeProvider::new(mock_data::reference_date())),
    ));
    room_log.create_room(mock_data::room_id());
    room_log.create_room("random");

    let auth_provider = StaticAuthProvider::signed_in(mock_data::user());
    let room_context = SharedRoomContext::new(Some(mock_data::room_id()));
    let scroll_sink = ScrollRecorder::default();

    let composer = ComposerService::builder()
        .set_log_store(room_log.clone())
        .set_blob_store(Arc::new(blob_store))
        .set_auth_provider(auth_provider.clone())
        .set_room_context(room_context.clone())
        .set_scroll_sink(scroll_sink.clone())
        .set_id_provider(IncrementingIDProvider::new("blob"))
        .build()?;

    Ok(Fixture {
        auth_provider,
        composer,
        room_context,
        room_log,
        scroll_sink,
    })
}

fn blob_store() -> Result<InMemoryBlobStore> {
    Ok(InMemoryBlobStore::new(Url::parse("https://blobs.example.com/")?).with_chunk_size(64))
}

fn bodies(room_log: &InMemoryRoomLog, room_id: &RoomId) -> Vec<MessageBody> {
    room_log
        .messages(room_id)
        .into_iter()
        .map(|entry| entry.body)
        .collect()
}

#[tokio::test]
async fn test_text_and_image_messages_land_in_room_log() -> Result<()> {
    let fixture = fixture(blob_store()?)?;
    let composer = &fixture.composer;

    composer.set_draft_text("hello");
    composer.send_draft().await?;

    composer.open_upload_modal();
    let handle = composer
        .start_upload(SourceFile::with_guessed_media_type("cat.png", vec![1; 150]))?
        .expect("upload should start");
    handle.finished().await;

    let room_id = mock_data::room_id();
    assert_eq!(
        bodies(&fixture.room_log, &room_id),
        vec![
            MessageBody::text("hello")?,
            MessageBody::image(Url::parse("https://blobs.example.com/images/blob-1.png")?),
        ]
    );

    let entries = fixture.room_log.messages(&room_id);
    assert!(entries[0].timestamp < entries[1].timestamp);
    assert_eq!(entries[1].author.id, mock_data::user().id);

    assert_eq!(fixture.scroll_sink.rooms(), vec![room_id.clone(), room_id]);
    assert_eq!(composer.phase(), ComposerPhase::Idle);
    assert_eq!(composer.upload_progress(), 0);

    Ok(())
}

#[tokio::test]
async fn test_quota_exceeded_fails_upload() -> Result<()> {
    let fixture = fixture(blob_store()?.with_quota(100))?;
    let composer = &fixture.composer;

    composer.open_upload_modal();
    let handle = composer
        .start_upload(SourceFile::with_guessed_media_type("cat.png", vec![1; 150]))?
        .expect("upload should start");
    handle.finished().await;

    assert_eq!(
        composer.state().last_upload.map(|job| job.status),
        Some(UploadStatus::Failed {
            reason: "quota_exceeded".to_string()
        })
    );
    assert!(fixture.room_log.messages(&mock_data::room_id()).is_empty());
    assert!(fixture.scroll_sink.rooms().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_messages_follow_the_active_room() -> Result<()> {
    let fixture = fixture(blob_store()?)?;
    let composer = &fixture.composer;

    composer.set_draft_text("draft for lobby");

    fixture
        .room_context
        .set_current_room(Some(RoomId::from("random")));
    assert_eq!(composer.draft_text(), "draft for lobby");
    assert_eq!(composer.sync_room(), Some(RoomId::from("random")));
    assert_eq!(composer.draft_text(), "");

    composer.set_draft_text("hi random");
    composer.send_draft().await?;

    assert!(fixture.room_log.messages(&mock_data::room_id()).is_empty());
    assert_eq!(
        bodies(&fixture.room_log, &RoomId::from("random")),
        vec![MessageBody::text("hi random")?]
    );

    Ok(())
}

#[tokio::test]
async fn test_send_to_unknown_room_keeps_draft() -> Result<()> {
    let fixture = fixture(blob_store()?)?;
    let composer = &fixture.composer;

    fixture
        .room_context
        .set_current_room(Some(RoomId::from("archived")));
    composer.set_draft_text("anyone here?");

    let result = composer.send_draft().await;

    assert!(matches!(result, Err(ComposerError::Send(_))));
    assert_eq!(composer.draft_text(), "anyone here?");
    assert_eq!(composer.phase(), ComposerPhase::Composing);

    Ok(())
}

#[tokio::test]
async fn test_signed_out_user_cannot_send() -> Result<()> {
    let fixture = fixture(blob_store()?)?;
    let composer = &fixture.composer;

    fixture.auth_provider.sign_out();
    composer.set_draft_text("hello");

    assert_eq!(
        composer.send_draft().await,
        Err(ComposerError::Validation(ValidationError::MissingAuthor))
    );
    assert_eq!(composer.draft_text(), "hello");
    assert!(fixture.room_log.messages(&mock_data::room_id()).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_dispose_cancels_running_upload() -> Result<()> {
    let fixture = fixture(blob_store()?)?;
    let composer = &fixture.composer;

    composer.open_upload_modal();
    let handle = composer
        .start_upload(SourceFile::with_guessed_media_type("cat.png", vec![1; 150]))?
        .expect("upload should start");

    composer.dispose();
    handle.finished().await;

    assert!(handle.is_cancelled());
    assert_eq!(composer.room_id(), None);
    assert!(fixture.room_log.messages(&mock_data::room_id()).is_empty());

    Ok(())
}
