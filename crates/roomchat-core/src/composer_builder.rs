// roomchat-core/roomchat-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::{format_err, Result};

use crate::app::deps::{
    AppConfig, AppContext, AppDependencies, DynAuthProvider, DynBlobStore, DynComposerDelegate,
    DynIDProvider, DynRemoteLogStore, DynRoomContext, DynScrollSink,
};
use crate::app::services::ComposerService;
use crate::domain::general::services::IDProvider;
use crate::domain::session::services::{AuthProvider, RoomContext, ScrollSink};
use crate::infra::general::UUIDProvider;
use crate::ComposerDelegate;

pub struct UndefinedLogStore;
pub struct UndefinedBlobStore;

pub struct ComposerServiceBuilder<L, B> {
    app_config: AppConfig,
    auth_provider: Option<DynAuthProvider>,
    blob_store: B,
    delegate: Option<DynComposerDelegate>,
    id_provider: DynIDProvider,
    log_store: L,
    room_context: Option<DynRoomContext>,
    scroll_sink: Option<DynScrollSink>,
}

impl ComposerService {
    pub fn builder() -> ComposerServiceBuilder<UndefinedLogStore, UndefinedBlobStore> {
        ComposerServiceBuilder::new()
    }
}

impl ComposerServiceBuilder<UndefinedLogStore, UndefinedBlobStore> {
    pub(crate) fn new() -> Self {
        ComposerServiceBuilder {
            app_config: Default::default(),
            auth_provider: None,
            blob_store: UndefinedBlobStore,
            delegate: None,
            id_provider: Arc::new(UUIDProvider::default()),
            log_store: UndefinedLogStore,
            room_context: None,
            scroll_sink: None,
        }
    }
}

impl<B> ComposerServiceBuilder<UndefinedLogStore, B> {
    pub fn set_log_store(
        self,
        log_store: DynRemoteLogStore,
    ) -> ComposerServiceBuilder<DynRemoteLogStore, B> {
        ComposerServiceBuilder {
            app_config: self.app_config,
            auth_provider: self.auth_provider,
            blob_store: self.blob_store,
            delegate: self.delegate,
            id_provider: self.id_provider,
            log_store,
            room_context: self.room_context,
            scroll_sink: self.scroll_sink,
        }
    }
}

impl<L> ComposerServiceBuilder<L, UndefinedBlobStore> {
    pub fn set_blob_store(self, blob_store: DynBlobStore) -> ComposerServiceBuilder<L, DynBlobStore> {
        ComposerServiceBuilder {
            app_config: self.app_config,
            auth_provider: self.auth_provider,
            blob_store,
            delegate: self.delegate,
            id_provider: self.id_provider,
            log_store: self.log_store,
            room_context: self.room_context,
            scroll_sink: self.scroll_sink,
        }
    }
}

impl<L, B> ComposerServiceBuilder<L, B> {
    pub fn set_auth_provider<P: AuthProvider + 'static>(mut self, auth_provider: P) -> Self {
        self.auth_provider = Some(Arc::new(auth_provider));
        self
    }

    pub fn set_room_context<C: RoomContext + 'static>(mut self, room_context: C) -> Self {
        self.room_context = Some(Arc::new(room_context));
        self
    }

    pub fn set_scroll_sink<S: ScrollSink + 'static>(mut self, scroll_sink: S) -> Self {
        self.scroll_sink = Some(Arc::new(scroll_sink));
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ComposerDelegate>>) -> Self {
        self.delegate = delegate.map(Arc::from);
        self
    }

    pub fn set_id_provider<P: IDProvider + 'static>(mut self, id_provider: P) -> Self {
        self.id_provider = Arc::new(id_provider);
        self
    }

    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.app_config = config;
        self
    }
}

impl ComposerServiceBuilder<DynRemoteLogStore, DynBlobStore> {
    pub fn build(self) -> Result<ComposerService> {
        let dependencies = AppDependencies {
            auth_provider: self
                .auth_provider
                .ok_or(format_err!("Missing auth provider"))?,
            blob_store: self.blob_store,
            ctx: Arc::new(AppContext::new(self.app_config)),
            delegate: self.delegate,
            id_provider: self.id_provider,
            log_store: self.log_store,
            room_context: self
                .room_context
                .ok_or(format_err!("Missing room context"))?,
            scroll_sink: self
                .scroll_sink
                .ok_or(format_err!("Missing scroll sink"))?,
        };

        Ok(ComposerService::from(dependencies))
    }
}
