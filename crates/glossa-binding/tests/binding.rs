use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use glossa_binding::{
    TranslationBinding, TranslationOptions, TranslationResult, english_binding, spanish_binding,
};
use glossa_translator::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, TranslationService, Translator,
};

/// Provider stand-in. Text starting with "slow" takes a second to answer.
#[derive(Default)]
struct FakeTranslator {
    requests: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeTranslator {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.requests.lock().unwrap().push(text.to_string());

        if text.starts_with("slow") {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        if self.fail {
            return Err(TranslateError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }

        let translated = match (text, to.as_str()) {
            ("Hello", "es") => "Hola".to_string(),
            ("Hola", "en") => "Hello".to_string(),
            (other, lang) => format!("{other} ({lang})"),
        };

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: "fake".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            requires_api_key: false,
        }
    }
}

fn service(translator: FakeTranslator) -> Arc<TranslationService<FakeTranslator>> {
    Arc::new(TranslationService::new(
        translator,
        Duration::from_secs(5 * 60),
    ))
}

fn requests(service: &TranslationService<FakeTranslator>) -> Vec<String> {
    service.translator().requests.lock().unwrap().clone()
}

async fn settle() {
    // longer than any debounce plus the slow provider path
    tokio::time::sleep(Duration::from_secs(3)).await;
}

#[tokio::test(start_paused = true)]
async fn translates_after_debounce() {
    let service = service(FakeTranslator::default());
    let binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "es"));

    let pending = binding.result();
    assert!(pending.is_translating);
    assert_eq!(pending.translated_text, "");
    assert!(requests(&service).is_empty());

    let mut rx = binding.subscribe();
    let settled = rx.wait_for(|r| !r.is_translating).await.unwrap().clone();

    assert_eq!(settled, TranslationResult {
        translated_text: "Hola".to_string(),
        is_translating: false,
        error: None,
    });
    assert_eq!(requests(&service), vec!["Hello".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn rapid_changes_coalesce_into_last_value() {
    let service = service(FakeTranslator::default());
    let mut binding =
        TranslationBinding::new(service.clone(), "H", TranslationOptions::new("en", "es"));

    for text in ["He", "Hel", "Hell", "Hello"] {
        tokio::time::sleep(Duration::from_millis(100)).await;
        binding.set_text(text);
    }
    settle().await;

    assert_eq!(requests(&service), vec!["Hello".to_string()]);
    assert_eq!(binding.result().translated_text, "Hola");
}

#[tokio::test(start_paused = true)]
async fn disabling_cancels_pending_call() {
    let service = service(FakeTranslator::default());
    let mut binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "es"));
    assert!(binding.result().is_translating);

    binding.set_options(TranslationOptions::new("en", "es").with_enabled(false));
    assert_eq!(binding.result(), TranslationResult::default());

    settle().await;
    assert!(requests(&service).is_empty());
    assert_eq!(binding.result(), TranslationResult::default());
}

#[tokio::test(start_paused = true)]
async fn blank_text_resets_without_call() {
    let service = service(FakeTranslator::default());
    let mut binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "es"));
    settle().await;
    assert_eq!(binding.result().translated_text, "Hola");

    binding.set_text("   ");
    assert_eq!(binding.result(), TranslationResult::default());

    settle().await;
    assert_eq!(requests(&service).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn same_language_publishes_text_immediately() {
    let service = service(FakeTranslator::default());
    let binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "en"));

    assert_eq!(binding.result(), TranslationResult {
        translated_text: "Hello".to_string(),
        is_translating: false,
        error: None,
    });

    settle().await;
    assert!(requests(&service).is_empty());
}

#[tokio::test(start_paused = true)]
async fn keeps_previous_translation_while_pending() {
    let service = service(FakeTranslator::default());
    let mut binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "es"));
    settle().await;

    binding.set_text("Hello again");
    let pending = binding.result();
    assert!(pending.is_translating);
    assert_eq!(pending.translated_text, "Hola");

    settle().await;
    assert_eq!(binding.result().translated_text, "Hello again (es)");
}

#[tokio::test(start_paused = true)]
async fn provider_error_is_published_with_original_text() {
    let service = service(FakeTranslator::failing());
    let binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "es"));
    settle().await;

    let result = binding.result();
    assert_eq!(result.translated_text, "Hello");
    assert!(!result.is_translating);
    assert_eq!(
        result.error.as_deref(),
        Some("Translation API Error (500): Internal Server Error")
    );

    // the service's own contract still degrades silently
    assert_eq!(service.translate("Hello", "en", "es").await, "Hello");
}

#[tokio::test(start_paused = true)]
async fn stale_in_flight_result_is_discarded() {
    let service = service(FakeTranslator::default());
    let mut binding =
        TranslationBinding::new(service.clone(), "slow text", TranslationOptions::new("en", "es"));

    // debounce fires, slow call is now in flight
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(requests(&service), vec!["slow text".to_string()]);

    binding.set_text("Hello");
    let mut rx = binding.subscribe();
    rx.wait_for(|r| r.translated_text == "Hola").await.unwrap();

    settle().await;

    // the slow call completed but never overwrote the newer result
    assert_eq!(requests(&service).len(), 2);
    assert_eq!(binding.result().translated_text, "Hola");
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn deactivate_suppresses_publish() {
    let service = service(FakeTranslator::default());
    let mut binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "es"));
    let rx = binding.subscribe();

    binding.deactivate();
    settle().await;

    assert!(requests(&service).is_empty());
    assert!(rx.borrow().is_translating);
}

#[tokio::test(start_paused = true)]
async fn dropping_binding_cancels_timer() {
    let service = service(FakeTranslator::default());
    let binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "es"));
    drop(binding);

    settle().await;
    assert!(requests(&service).is_empty());
}

#[tokio::test(start_paused = true)]
async fn bindings_share_the_service_cache() {
    let service = service(FakeTranslator::default());
    let first = spanish_binding(service.clone(), "Hello", true);
    settle().await;
    let second = spanish_binding(service.clone(), "Hello", true);
    settle().await;

    assert_eq!(first.result().translated_text, "Hola");
    assert_eq!(second.result().translated_text, "Hola");
    assert_eq!(requests(&service).len(), 1);
    assert_eq!(service.cache_stats().size, 1);
}

#[tokio::test(start_paused = true)]
async fn derived_bindings() {
    let service = service(FakeTranslator::default());
    let english = english_binding(service.clone(), "Hola", true);
    let disabled = spanish_binding(service.clone(), "Hello", false);
    settle().await;

    assert_eq!(english.options().source_language, "es");
    assert_eq!(english.result().translated_text, "Hello");
    assert_eq!(disabled.result(), TranslationResult::default());
    assert_eq!(requests(&service), vec!["Hola".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn unchanged_input_does_not_retrigger() {
    let service = service(FakeTranslator::default());
    let mut binding =
        TranslationBinding::new(service.clone(), "Hello", TranslationOptions::new("en", "es"));
    settle().await;

    let rx = binding.subscribe();
    binding.set_text("Hello");
    binding.update("Hello", TranslationOptions::new("en", "es"));

    assert!(!rx.has_changed().unwrap());
    assert_eq!(binding.text(), "Hello");
    settle().await;
    assert_eq!(requests(&service).len(), 1);
}
