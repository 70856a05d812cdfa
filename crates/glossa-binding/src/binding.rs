use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use glossa_translator::{LibreTranslator, TranslationService, Translator};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::options::{TranslationOptions, TranslationResult};

/// Reactive adapter between externally owned text and the shared
/// [`TranslationService`].
///
/// Every input change cancels the pending debounce timer and starts a new
/// cycle. Each cycle carries a generation number; a translation that resolves
/// after a newer cycle started is dropped instead of published.
///
/// Must be created and updated from inside a tokio runtime.
pub struct TranslationBinding<T: Translator + 'static = LibreTranslator> {
    service: Arc<TranslationService<T>>,
    text: String,
    options: TranslationOptions,
    result_tx: watch::Sender<TranslationResult>,
    pending: Option<CancellationToken>,
    generation: Arc<AtomicU64>,
}

impl<T: Translator + 'static> TranslationBinding<T> {
    pub fn new(
        service: Arc<TranslationService<T>>,
        text: impl Into<String>,
        options: TranslationOptions,
    ) -> Self {
        let (result_tx, _) = watch::channel(TranslationResult::default());

        let mut binding = Self {
            service,
            text: text.into(),
            options,
            result_tx,
            pending: None,
            generation: Arc::new(AtomicU64::new(0)),
        };
        binding.trigger();
        binding
    }

    pub fn subscribe(&self) -> watch::Receiver<TranslationResult> {
        self.result_tx.subscribe()
    }

    /// Snapshot of the last published result
    pub fn result(&self) -> TranslationResult {
        self.result_tx.borrow().clone()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.trigger();
    }

    pub fn set_options(&mut self, options: TranslationOptions) {
        if options == self.options {
            return;
        }
        self.options = options;
        self.trigger();
    }

    pub fn update(&mut self, text: impl Into<String>, options: TranslationOptions) {
        let text = text.into();
        if text == self.text && options == self.options {
            return;
        }
        self.text = text;
        self.options = options;
        self.trigger();
    }

    /// Stop observing: the pending timer is cancelled and any call already in
    /// flight will not publish.
    pub fn deactivate(&mut self) {
        self.cancel_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    fn trigger(&mut self) {
        self.cancel_pending();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.options.enabled || self.text.trim().is_empty() {
            self.result_tx.send_replace(TranslationResult::default());
            return;
        }

        if self.options.source_language == self.options.target_language {
            self.result_tx
                .send_replace(TranslationResult::settled(self.text.clone()));
            return;
        }

        self.result_tx.send_modify(|result| {
            result.is_translating = true;
            result.error = None;
        });

        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let service = Arc::clone(&self.service);
        let result_tx = self.result_tx.clone();
        let current = Arc::clone(&self.generation);
        let text = self.text.clone();
        let source = self.options.source_language.clone();
        let target = self.options.target_language.clone();
        let debounce = self.options.debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("debounce {} superseded", generation);
                    return;
                }
                _ = tokio::time::sleep(debounce) => {}
            }

            let outcome = service.try_translate(&text, &source, &target).await;

            let published = result_tx.send_if_modified(|result| {
                // checked under the channel lock so a newer cycle's publish
                // cannot interleave
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *result = match outcome {
                    Ok(translated) => TranslationResult::settled(translated),
                    Err(e) => {
                        tracing::warn!("Translation failed, showing original text: {}", e);
                        TranslationResult {
                            translated_text: text,
                            is_translating: false,
                            error: Some(e.to_string()),
                        }
                    }
                };
                true
            });

            if !published {
                tracing::debug!("Discarded stale translation (generation {})", generation);
            }
        });
    }
}

impl<T: Translator + 'static> Drop for TranslationBinding<T> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Binding translating English text to Spanish
pub fn spanish_binding<T: Translator + 'static>(
    service: Arc<TranslationService<T>>,
    text: impl Into<String>,
    enabled: bool,
) -> TranslationBinding<T> {
    TranslationBinding::new(service, text, TranslationOptions::spanish(enabled))
}

/// Binding translating Spanish text to English
pub fn english_binding<T: Translator + 'static>(
    service: Arc<TranslationService<T>>,
    text: impl Into<String>,
    enabled: bool,
) -> TranslationBinding<T> {
    TranslationBinding::new(service, text, TranslationOptions::english(enabled))
}
