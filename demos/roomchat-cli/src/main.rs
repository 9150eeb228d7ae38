// roomchat-core/roomchat-cli
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::path::Path;
use std::sync::Arc;
use std::{env, fs};

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::metadata::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use url::Url;

use roomchat_core::domain::session::services::ScrollSink;
use roomchat_core::dtos::{MessageBody, RoomId, SourceFile, UserId, UserProfile};
use roomchat_core::infra::general::{SystemTimeProvider, UUIDProvider};
use roomchat_core::infra::messaging::InMemoryRoomLog;
use roomchat_core::infra::session::{SharedRoomContext, StaticAuthProvider};
use roomchat_core::infra::uploads::InMemoryBlobStore;
use roomchat_core::{AppConfig, ComposerDelegate, ComposerEvent, ComposerService};

const ROOMS: [&str; 3] = ["lobby", "random", "support"];

struct Demo {
    composer: ComposerService,
    room_context: SharedRoomContext,
    room_log: Arc<InMemoryRoomLog>,
}

struct Delegate {}

impl ComposerDelegate for Delegate {
    fn handle_event(&self, event: ComposerEvent) {
        match event {
            ComposerEvent::UploadProgressed { job_id, percent } => {
                println!("{}: {}%", job_id, percent)
            }
            ComposerEvent::UploadFailed { job_id, reason } => {
                println!("{} failed: {}", job_id, reason)
            }
            ComposerEvent::SendFailed { room_id, reason } => {
                println!("Could not send message to {}: {}", room_id, reason)
            }
            ComposerEvent::RoomChanged { .. } | ComposerEvent::MessageSent { .. } => (),
        }
    }
}

struct ConsoleScrollSink {}

impl ScrollSink for ConsoleScrollSink {
    fn scroll_to_latest(&self, room_id: &RoomId) {
        println!("(scrolled {} to the latest message)", room_id);
    }
}

fn enable_debug_logging(max_level: LevelFilter) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(max_level),
        )
        .init();
}

fn load_config() -> Result<AppConfig> {
    let Some(path) = env::args().nth(1) else {
        return Ok(AppConfig::default());
    };
    println!("Loading configuration from {}…", path);
    AppConfig::from_json(&fs::read_to_string(path)?)
}

fn configure_composer() -> Result<Demo> {
    let room_log = Arc::new(InMemoryRoomLog::new(
        Arc::new(UUIDProvider::new()),
        Arc::new(SystemTimeProvider::default()),
    ));
    for room in ROOMS {
        room_log.create_room(room);
    }

    let blob_store = InMemoryBlobStore::new(Url::parse("https://blobs.roomchat.local/")?)
        .with_chunk_size(16 * 1024)
        .with_quota(5 * 1024 * 1024);

    let room_context = SharedRoomContext::default();

    let composer = ComposerService::builder()
        .set_config(load_config()?)
        .set_log_store(room_log.clone())
        .set_blob_store(Arc::new(blob_store))
        .set_auth_provider(StaticAuthProvider::signed_in(UserProfile::new(
            UserId::new("jane.doe")?,
            "Jane Doe",
        )))
        .set_room_context(room_context.clone())
        .set_scroll_sink(ConsoleScrollSink {})
        .set_delegate(Some(Box::new(Delegate {})))
        .build()?;

    Ok(Demo {
        composer,
        room_context,
        room_log,
    })
}

fn select_command() -> Selection {
    let options: Vec<Selection> = Selection::iter().collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What do you want to do?")
        .default(0)
        .items(&options[..])
        .interact()
        .ok();

    selection
        .and_then(|idx| options.get(idx).cloned())
        .unwrap_or(Selection::Exit)
}

fn select_room() -> Result<Option<RoomId>> {
    let items: Vec<&str> = ROOMS.iter().copied().chain(["(none)"]).collect();
    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a room")
        .default(0)
        .items(&items)
        .interact()?;
    Ok(ROOMS.get(idx).map(|room| RoomId::from(*room)))
}

fn type_draft(demo: &Demo) -> Result<()> {
    let text = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Message")
        .with_initial_text(demo.composer.draft_text())
        .allow_empty(true)
        .interact_text()?;
    demo.composer.set_draft_text(text);
    Ok(())
}

async fn send_draft(demo: &Demo) -> Result<()> {
    match demo.composer.send_draft().await {
        Ok(Some(key)) => println!("Sent message {}.", key),
        Ok(None) => println!("Nothing to send."),
        Err(err) => println!("{}", err),
    }
    Ok(())
}

async fn upload_image(demo: &Demo) -> Result<()> {
    demo.composer.open_upload_modal();

    let path = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Path to image file")
        .validate_with(|input: &String| {
            if Path::new(input.trim()).exists() {
                Ok(())
            } else {
                Err("File does not exist")
            }
        })
        .interact_text()?;

    let file = SourceFile::load(path.trim()).await?;
    println!("Uploading {:?}…", file);

    match demo.composer.start_upload(file) {
        Ok(Some(handle)) => handle.finished().await,
        Ok(None) => println!("Select a room first."),
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn show_state(demo: &Demo) {
    let state = demo.composer.state();
    println!("Room:     {:?}", demo.composer.room_id());
    println!("Phase:    {:?}", state.phase());
    println!("Draft:    {:?}", state.draft_text);
    println!("Progress: {}%", state.upload_progress());
    if let Some(job) = state.last_upload {
        println!("Last upload: {} {:?}", job.id, job.status);
    }
}

fn show_messages(demo: &Demo) {
    let Some(room_id) = demo.composer.room_id() else {
        println!("No room selected.");
        return;
    };

    for entry in demo.room_log.messages(&room_id) {
        let content = match &entry.body {
            MessageBody::Text(text) => text.to_string(),
            MessageBody::Image(image) => format!("[image] {}", image.url()),
        };
        println!(
            "{} {}: {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.author.display_name,
            content
        );
    }
}

#[derive(EnumIter, Display, Clone)]
enum Selection {
    #[strum(serialize = "Select room")]
    SelectRoom,
    #[strum(serialize = "Type message")]
    TypeDraft,
    #[strum(serialize = "Press Enter")]
    SendDraft,
    #[strum(serialize = "Upload image")]
    UploadImage,
    #[strum(serialize = "Show composer state")]
    ShowState,
    #[strum(serialize = "Show messages")]
    ShowMessages,
    #[strum(serialize = "Exit")]
    Exit,
}

#[tokio::main]
async fn main() -> Result<()> {
    enable_debug_logging(LevelFilter::INFO);

    let demo = configure_composer()?;

    loop {
        println!();

        match select_command() {
            Selection::SelectRoom => {
                demo.room_context.set_current_room(select_room()?);
                demo.composer.sync_room();
            }
            Selection::TypeDraft => type_draft(&demo)?,
            Selection::SendDraft => send_draft(&demo).await?,
            Selection::UploadImage => upload_image(&demo).await?,
            Selection::ShowState => show_state(&demo),
            Selection::ShowMessages => show_messages(&demo),
            Selection::Exit => break,
        }
    }

    demo.composer.dispose();

    Ok(())
}
