// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::app_context::AppContext;
use crate::domain::general::services::{IDProvider, TimeProvider};
use crate::domain::messaging::services::RemoteLogStore;
use crate::domain::session::services::{AuthProvider, RoomContext, ScrollSink};
use crate::domain::uploads::services::{BlobStore, UploadObserver};
use crate::ComposerDelegate;

pub type DynAppContext = Arc<AppContext>;
pub type DynAuthProvider = Arc<dyn AuthProvider>;
pub type DynBlobStore = Arc<dyn BlobStore>;
pub type DynComposerDelegate = Arc<dyn ComposerDelegate>;
pub type DynIDProvider = Arc<dyn IDProvider>;
pub type DynRemoteLogStore = Arc<dyn RemoteLogStore>;
pub type DynRoomContext = Arc<dyn RoomContext>;
pub type DynScrollSink = Arc<dyn ScrollSink>;
pub type DynTimeProvider = Arc<dyn TimeProvider>;
pub type DynUploadObserver = Arc<dyn UploadObserver>;

pub struct AppDependencies {
    pub auth_provider: DynAuthProvider,
    pub blob_store: DynBlobStore,
    pub ctx: DynAppContext,
    pub delegate: Option<DynComposerDelegate>,
    pub id_provider: DynIDProvider,
    pub log_store: DynRemoteLogStore,
    pub room_context: DynRoomContext,
    pub scroll_sink: DynScrollSink,
}
