//! # Forum Client
//!
//! The facade every view goes through. It owns the API, the confirmed
//! [`EntityStore`], the [`OptimisticLayer`] and the [`Notifier`], and runs
//! each fetch, form, auth and vote flow against them.
//!
//! Every flow follows the same shape: mark the slice loading, call the API,
//! then record either the data or a user-facing error string. Form flows
//! validate first and send nothing when a field is rejected.

use crate::client::api::ForumApi;
use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::client::http::HttpForumApi;
use crate::client::notify::{messages, Notifier};
use crate::client::store::{EntityRef, EntityStore, ForumState};
use crate::client::votes::{OptimisticLayer, VoteController, VoteError};
use crate::shared::config::AppConfig;
use crate::shared::forum::{
    Comment, LoginRequest, NewComment, NewThread, RegisterRequest, Thread, ThreadDetail, User,
    VoteDirection, VoteRecord,
};
use crate::shared::validation;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct ForumClient {
    api: Arc<dyn ForumApi>,
    store: Arc<EntityStore>,
    layer: Arc<OptimisticLayer>,
    notifier: Notifier,
    app: AppConfig,
}

impl std::fmt::Debug for ForumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForumClient")
            .field("app", &self.app)
            .finish_non_exhaustive()
    }
}

impl ForumClient {
    /// Client talking to the configured forum API over HTTP
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let api = HttpForumApi::new(config.app().clone())?;
        Ok(Self::with_api(Arc::new(api), config))
    }

    /// Client over any [`ForumApi`] implementation.
    ///
    /// A token already present in `config` is installed as the session token.
    /// From then on the auth slice owns it.
    pub fn with_api(api: Arc<dyn ForumApi>, config: Config) -> Self {
        let (app, token) = config.into_parts();
        let store = Arc::new(EntityStore::new());
        if let Some(token) = token {
            api.set_token(Some(token.clone()));
            store.set_token(Some(token));
        }
        Self {
            api,
            store,
            layer: Arc::new(OptimisticLayer::new()),
            notifier: Notifier::default(),
            app,
        }
    }

    /// Settings the client was built with. The session token is in
    /// `state().auth.token`.
    pub fn config(&self) -> &AppConfig {
        &self.app
    }

    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    pub fn optimistic_layer(&self) -> &Arc<OptimisticLayer> {
        &self.layer
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn state(&self) -> ForumState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ForumState> {
        self.store.subscribe()
    }

    /// Id of the signed-in user
    pub fn current_user_id(&self) -> Option<String> {
        self.store.read(|state| state.auth.user_id().map(str::to_string))
    }

    // ── Threads ────────────────────────────────────────────────────────────

    pub async fn load_threads(&self) -> Result<Vec<Thread>, ClientError> {
        self.store.begin_threads_load();
        match self.api.list_threads().await {
            Ok(threads) => {
                tracing::debug!("[FORUM] loaded {} threads", threads.len());
                self.store.finish_threads_load(Ok(threads.clone()));
                Ok(threads)
            }
            Err(e) => {
                tracing::warn!("[FORUM] failed to load threads: {}", e);
                self.store
                    .finish_threads_load(Err(e.user_message(messages::FETCH_THREADS_FAILED)));
                Err(e.into())
            }
        }
    }

    pub async fn create_thread(&self, thread: NewThread) -> Result<Thread, ClientError> {
        let thread = validation::validate_new_thread(thread)?;
        match self.api.create_thread(&thread).await {
            Ok(created) => {
                self.store.prepend_thread(created.clone());
                self.notifier.success(messages::THREAD_CREATED);
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("[FORUM] failed to create thread: {}", e);
                self.store
                    .fail_thread_create(e.user_message(messages::CREATE_THREAD_ERROR));
                self.notifier.error(messages::THREAD_CREATE_FAILED);
                Err(e.into())
            }
        }
    }

    // ── Thread detail ──────────────────────────────────────────────────────

    /// Load `thread_id` as the resident thread detail.
    ///
    /// If another detail is requested or the view is left before the
    /// response arrives, the response is dropped.
    pub async fn load_thread_detail(&self, thread_id: &str) -> Result<ThreadDetail, ClientError> {
        self.store.begin_thread_detail_load(thread_id);
        match self.api.thread_detail(thread_id).await {
            Ok(detail) => {
                self.store
                    .finish_thread_detail_load(thread_id, Ok(detail.clone()));
                Ok(detail)
            }
            Err(e) => {
                tracing::warn!("[FORUM] failed to load thread {}: {}", thread_id, e);
                self.store.finish_thread_detail_load(
                    thread_id,
                    Err(e.user_message(messages::FETCH_DETAIL_FAILED)),
                );
                Err(e.into())
            }
        }
    }

    /// Navigate away from the thread detail
    pub fn leave_thread_detail(&self) {
        self.store.clear_thread_detail();
    }

    pub async fn create_comment(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<Comment, ClientError> {
        let comment = NewComment {
            content: content.to_string(),
        };
        validation::validate_new_comment(&comment)?;
        match self.api.create_comment(thread_id, &comment.content).await {
            Ok(created) => {
                self.store.append_comment(thread_id, created.clone());
                self.notifier.success(messages::COMMENT_CREATED);
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("[FORUM] failed to comment on {}: {}", thread_id, e);
                self.store.fail_comment_create(
                    thread_id,
                    e.user_message(messages::CREATE_COMMENT_ERROR),
                );
                self.notifier.error(messages::COMMENT_CREATE_FAILED);
                Err(e.into())
            }
        }
    }

    // ── Leaderboards ───────────────────────────────────────────────────────

    pub async fn load_leaderboards(&self) -> Result<(), ClientError> {
        self.store.begin_leaderboards_load();
        match self.api.leaderboards().await {
            Ok(entries) => {
                self.store.finish_leaderboards_load(Ok(entries));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[FORUM] failed to load leaderboards: {}", e);
                let message = e.user_message(messages::FETCH_LEADERBOARDS_FAILED);
                self.store.finish_leaderboards_load(Err(message));
                Err(e.into())
            }
        }
    }

    // ── Auth ───────────────────────────────────────────────────────────────

    /// Register an account. Does not sign in.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, ClientError> {
        validation::validate_register(&request)?;
        self.store.begin_auth_request();
        match self
            .api
            .register(&request.name, &request.email, &request.password)
            .await
        {
            Ok(user) => {
                self.store.finish_register(Ok(()));
                self.notifier.success(messages::REGISTER_SUCCEEDED);
                tracing::info!("[AUTH] registered {}", user.id);
                Ok(user)
            }
            Err(e) => {
                self.store
                    .finish_register(Err(e.user_message(messages::REGISTER_ERROR)));
                self.notifier.error(messages::REGISTER_FAILED);
                Err(e.into())
            }
        }
    }

    /// Sign in, then load the signed-in user's profile
    pub async fn login(&self, request: LoginRequest) -> Result<User, ClientError> {
        validation::validate_login(&request)?;
        self.store.begin_auth_request();
        match self.api.login(&request.email, &request.password).await {
            Ok(token) => {
                self.api.set_token(Some(token.clone()));
                self.store.finish_login(Ok(token));
                self.notifier.success(messages::LOGIN_SUCCEEDED);
            }
            Err(e) => {
                self.store.finish_login(Err(e.user_message(messages::LOGIN_ERROR)));
                self.notifier.error(messages::LOGIN_FAILED);
                return Err(e.into());
            }
        }
        self.load_own_profile().await
    }

    /// Fetch the profile behind the current token.
    ///
    /// A failure means the token is no longer valid; the session is cleared.
    pub async fn load_own_profile(&self) -> Result<User, ClientError> {
        if self.store.read(|state| state.auth.token.is_none()) {
            return Err(ClientError::Unauthenticated);
        }
        self.store.begin_profile_load();
        match self.api.own_profile().await {
            Ok(user) => {
                self.store.finish_profile_load(Ok(user.clone()));
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(
                    "[AUTH] session dropped: {}",
                    e.user_message(messages::FETCH_PROFILE_FAILED)
                );
                self.api.set_token(None);
                self.store
                    .finish_profile_load(Err(e.user_message(messages::FETCH_PROFILE_FAILED)));
                Err(e.into())
            }
        }
    }

    pub fn logout(&self) {
        self.api.set_token(None);
        self.store.logout();
        tracing::info!("[AUTH] signed out");
    }

    /// Clear loading, error and success flags after a form has shown them
    pub fn reset_auth_status(&self) {
        self.store.reset_auth_status();
    }

    // ── Votes ──────────────────────────────────────────────────────────────

    pub fn votes(&self, entity: EntityRef) -> VoteController {
        VoteController::new(
            entity,
            self.api.clone(),
            self.store.clone(),
            self.layer.clone(),
            self.notifier.clone(),
            self.app.vote_timeout,
        )
    }

    pub fn thread_votes(&self, thread_id: &str) -> VoteController {
        self.votes(EntityRef::thread(thread_id))
    }

    pub fn thread_detail_votes(&self, thread_id: &str) -> VoteController {
        self.votes(EntityRef::thread_detail(thread_id))
    }

    pub fn comment_votes(&self, thread_id: &str, comment_id: &str) -> VoteController {
        self.votes(EntityRef::comment(thread_id, comment_id))
    }

    /// Vote as the signed-in user and wait for the confirmation
    pub async fn vote(
        &self,
        entity: EntityRef,
        direction: VoteDirection,
    ) -> Result<VoteRecord, VoteError> {
        let acting_user = self.current_user_id();
        self.votes(entity)
            .vote(acting_user.as_deref(), direction)
            .await
    }
}
