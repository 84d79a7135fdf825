use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use walink_core::error::DomainError;
use walink_core::link::WhatsAppLink;
use walink_core::numerals::to_ascii_digits;
use walink_core::phone::{has_only_phone_characters, normalize, SaudiMobile};
use walink_ports::inbound::LinkGenerator;
use walink_ports::outbound::{InputFeedback, KeyValueStore, NoFeedback, Notifier};
use walink_ports::types::{Generation, HistoryEntryView};

use crate::config::GeneratorConfig;
use crate::history_store::HistoryStore;
use crate::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Generating,
}

/// Turns raw phone input into WhatsApp links and keeps the session history.
pub struct GenerationService<N, S, F = NoFeedback>
where
    N: Notifier,
    S: KeyValueStore,
    F: InputFeedback,
{
    notifier: N,
    history: HistoryStore<S>,
    feedback: F,
    config: GeneratorConfig,
    state: Mutex<GenerationState>,
    latest: Mutex<Option<WhatsAppLink>>,
}

impl<N, S> GenerationService<N, S>
where
    N: Notifier,
    S: KeyValueStore + 'static,
{
    pub fn new(notifier: N, storage: S, config: GeneratorConfig) -> Self {
        let history = HistoryStore::new(storage, config.storage_key.clone(), config.max_history);
        Self {
            notifier,
            history,
            feedback: NoFeedback,
            config,
            state: Mutex::new(GenerationState::Idle),
            latest: Mutex::new(None),
        }
    }
}

impl<N, S, F> GenerationService<N, S, F>
where
    N: Notifier,
    S: KeyValueStore + 'static,
    F: InputFeedback,
{
    pub fn with_feedback<G: InputFeedback>(self, feedback: G) -> GenerationService<N, S, G> {
        GenerationService {
            notifier: self.notifier,
            history: self.history,
            feedback,
            config: self.config,
            state: self.state,
            latest: self.latest,
        }
    }

    /// Rehydrates history from storage. Call once at session start.
    pub async fn load_history(&self) -> Vec<HistoryEntryView> {
        let list = self.history.load().await;
        tracing::info!(entries = list.len(), "history loaded");
        list.links().iter().map(HistoryEntryView::from).collect()
    }

    /// Validates `raw_input`, then after the configured delay records the
    /// link in history and announces it.
    ///
    /// Returns [`Generation::Busy`] without doing anything while a previous
    /// request is still in its delay window. Validation failures are
    /// announced through the notifier and leave history untouched.
    pub async fn generate(&self, raw_input: &str) -> Result<Generation, DomainError> {
        if self.state() == GenerationState::Generating {
            tracing::debug!("generation in progress, request ignored");
            return Ok(Generation::Busy);
        }

        let mobile = match self.parse_input(raw_input) {
            Ok(mobile) => mobile,
            Err(e) => {
                self.reject(&e);
                self.feedback.shake_error();
                return Err(e);
            }
        };

        let link = WhatsAppLink::for_mobile(&mobile);
        if let Some(position) = self.history.position(&link) {
            let e = DomainError::DuplicateLink { position };
            self.reject(&e);
            return Err(e);
        }

        let Some(generating) = GeneratingGuard::acquire(&self.state) else {
            return Ok(Generation::Busy);
        };

        tokio::time::sleep(self.config.generation_delay).await;

        // queues the write and returns; storage latency never extends the busy window
        self.history.append(link.clone());
        *lock(&self.latest) = Some(link.clone());
        drop(generating);

        tracing::info!(link = %link, "link generated");
        self.feedback.success();
        self.notifier.success(&messages::generated(&link));

        Ok(Generation::Generated(link))
    }

    pub async fn clear_history(&self) {
        self.history.clear();
        tracing::info!("history cleared");
        self.notifier.info(messages::HISTORY_CLEARED);
    }

    /// Waits for queued history writes. Call before shutting down.
    pub async fn flush_history(&self) {
        self.history.flush().await;
    }

    /// Current history, newest first.
    pub fn history(&self) -> Vec<HistoryEntryView> {
        self.history
            .snapshot()
            .links()
            .iter()
            .map(HistoryEntryView::from)
            .collect()
    }

    /// Link from the most recent successful generation of this session.
    pub fn latest_link(&self) -> Option<WhatsAppLink> {
        lock(&self.latest).clone()
    }

    /// Hands out the latest link for sharing. Warns the user when nothing
    /// has been generated yet.
    pub fn share_latest(&self) -> Option<WhatsAppLink> {
        let latest = self.latest_link();
        if latest.is_none() {
            self.notifier.warning(messages::SHARE_WITHOUT_LINK);
        }
        latest
    }

    /// Forgets the latest result. History is kept.
    pub fn reset_input(&self) {
        *lock(&self.latest) = None;
        self.notifier.info(messages::INPUT_CLEARED);
    }

    pub fn state(&self) -> GenerationState {
        *lock(&self.state)
    }

    fn parse_input(&self, raw_input: &str) -> Result<SaudiMobile, DomainError> {
        let translated = to_ascii_digits(raw_input);
        let input = translated.trim();

        if input.is_empty() {
            return Err(DomainError::EmptyInput);
        }
        if !has_only_phone_characters(input) {
            return Err(DomainError::InvalidCharacters);
        }

        let normalized = normalize(input, &self.config.country_code);
        SaudiMobile::parse(&normalized)
    }

    fn reject(&self, err: &DomainError) {
        tracing::debug!(error = %err, "generate rejected");
        self.notifier.error(&messages::for_error(err));
    }
}

#[async_trait]
impl<N, S, F> LinkGenerator for GenerationService<N, S, F>
where
    N: Notifier,
    S: KeyValueStore + 'static,
    F: InputFeedback,
{
    async fn generate(&self, raw_input: &str) -> Result<Generation, DomainError> {
        GenerationService::generate(self, raw_input).await
    }

    async fn clear_history(&self) {
        GenerationService::clear_history(self).await
    }

    fn history(&self) -> Vec<HistoryEntryView> {
        GenerationService::history(self)
    }
}

/// Holds the service in `Generating` and returns it to `Idle` when dropped.
struct GeneratingGuard<'a> {
    state: &'a Mutex<GenerationState>,
}

impl<'a> GeneratingGuard<'a> {
    fn acquire(state: &'a Mutex<GenerationState>) -> Option<Self> {
        let mut current = lock(state);
        if *current == GenerationState::Generating {
            return None;
        }
        *current = GenerationState::Generating;
        Some(Self { state })
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        *lock(self.state) = GenerationState::Idle;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
