use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use glossa_binding::{TranslationBinding, TranslationOptions};
use glossa_translator::{TranslationService, Translator};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Feed each input line to a binding and write every settled translation.
///
/// Returns on shutdown, or once input is exhausted and the last cycle has
/// been written.
pub async fn run<T, R, W>(
    service: Arc<TranslationService<T>>,
    options: TranslationOptions,
    input: R,
    mut output: W,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()>
where
    T: Translator + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tracing::info!(
        "Translating {} -> {} (enabled: {}, debounce {:?})",
        options.source_language,
        options.target_language,
        options.enabled,
        options.debounce
    );

    let mut binding = TranslationBinding::new(Arc::clone(&service), "", options);
    let mut results = binding.subscribe();
    let mut lines = input.split(b'\n');
    let mut input_open = true;

    tokio::pin!(shutdown);

    loop {
        if !input_open && !binding.result().is_translating && !results.has_changed()? {
            break;
        }

        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested");
                break;
            }
            line = lines.next_segment(), if input_open => {
                match line? {
                    Some(raw) => binding.set_text(decode_line(&raw)),
                    None => {
                        tracing::debug!("Input closed");
                        input_open = false;
                    }
                }
            }
            changed = results.changed() => {
                changed?;
                let result = results.borrow_and_update().clone();
                if result.is_translating {
                    continue;
                }
                if let Some(error) = &result.error {
                    tracing::warn!("Showing untranslated text: {error}");
                }
                if !result.translated_text.is_empty() {
                    output
                        .write_all(format!("{}\n", result.translated_text).as_bytes())
                        .await?;
                    output.flush().await?;
                }
            }
        }
    }

    binding.deactivate();

    let stats = service.cache_stats();
    tracing::info!(
        "Translation cache: {}",
        serde_json::to_string(&stats).unwrap_or_else(|_| format!("{} entries", stats.size))
    );

    Ok(())
}

/// Lossy UTF-8 decode with any trailing `\r` removed. A bad line still
/// replaces the observed text instead of ending the session.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            tracing::warn!("Input line was not valid UTF-8, replaced invalid bytes");
            text
        }
    }
}
