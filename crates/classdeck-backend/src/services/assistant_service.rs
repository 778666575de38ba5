//! AI assistant prompts: streamed replies and daily quota accounting.
//!
//! Replies arrive as a streamed text body and are forwarded to the shell
//! chunk by chunk, the same way model downloads stream progress elsewhere in
//! the pack. Quota is a single counter per calendar day, reserved up front
//! under one write lock so concurrent prompts cannot race past the limit.
//! Crossing the configured warn threshold raises one warning, exhausting
//! the limit raises an error and further prompts are refused until the day
//! rolls over.

use classdeck_bridge::MessageFromBackend;
use classdeck_bridge::assistant::AssistantUsage;
use classdeck_bridge::notification::{NotificationKind, NotificationMessage};
use futures_util::StreamExt;

/// Outcome of reserving a quota slot for one prompt.
struct QuotaReservation {
    /// Usage before this prompt was counted.
    before: AssistantUsage,
    /// Usage with this prompt counted.
    after: AssistantUsage,
    /// Warn threshold in effect, in percent.
    warn_threshold: u32,
}

/// Handles an assistant prompt (see
/// [`classdeck_bridge::MessageToBackend::AssistantPromptRequest`]).
pub async fn handle_prompt(context: super::AppContextHandle, prompt: String) {
    let (api, token) = {
        let state = context.state.read().await;
        (state.api.clone(), state.config.session.token.clone())
    };

    let Some(token) = token else {
        context
            .send_notification(NotificationMessage::new(
                NotificationKind::Warning,
                "Sign in to use the assistant",
            ))
            .await;
        return;
    };

    let reservation = match reserve_slot(&context).await {
        Ok(reservation) => reservation,
        Err(usage) => {
            context
                .send_notification(
                    NotificationMessage::new(
                        NotificationKind::Error,
                        "Daily assistant limit reached",
                    )
                    .with_detail(format!(
                        "You have used all {} assistant messages for today.",
                        usage.limit
                    )),
                )
                .await;
            return;
        }
    };

    let response = match api.assistant_prompt(&token, &prompt).await {
        Ok(response) => response,
        Err(error) => {
            // The prompt never reached the assistant; hand the slot back.
            release_slot(&context).await;
            context
                .send_error_notification("The assistant is unavailable", error)
                .await;
            return;
        }
    };

    if reservation.after.exhausted() {
        context
            .send_notification(NotificationMessage::new(
                NotificationKind::Error,
                "Daily assistant limit reached",
            ))
            .await;
    } else if crossed_warn_threshold(
        reservation.before,
        reservation.after,
        reservation.warn_threshold,
    ) {
        context
            .send_notification(
                NotificationMessage::new(NotificationKind::Warning, "Assistant quota")
                    .with_detail(format!(
                        "You have used {}% of today's assistant messages.",
                        reservation.after.percent_used()
                    )),
            )
            .await;
    }

    let usage = reservation.after;
    let context = context.clone();
    tokio::spawn(async move {
        let mut decoder = Utf8ChunkDecoder::default();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => {
                    let text = decoder.push(&bytes);
                    if !text.is_empty() {
                        context
                            .send(MessageFromBackend::AssistantReplyChunk { text })
                            .await;
                    }
                }
                Err(error) => {
                    context
                        .send_error_notification("The assistant reply was interrupted", error)
                        .await;
                    // Tell the shell to drop the partial text; the slot
                    // stays consumed since the assistant did answer.
                    context
                        .send(MessageFromBackend::AssistantReplyAborted)
                        .await;
                    return;
                }
            }
        }
        let tail = decoder.finish();
        if !tail.is_empty() {
            context
                .send(MessageFromBackend::AssistantReplyChunk { text: tail })
                .await;
        }

        context
            .send(MessageFromBackend::AssistantReplyComplete { usage })
            .await;
    });
}

/// Rolls the day over and counts one prompt against the quota, all under a
/// single write lock so a concurrent prompt cannot pass the exhaustion
/// check against a stale count. Returns the usage around the reservation,
/// or the current usage when the limit is already spent.
async fn reserve_slot(
    context: &super::AppContextHandle,
) -> Result<QuotaReservation, AssistantUsage> {
    let mut state = context.state.write().await;
    let today = chrono::Local::now().date_naive();
    state.assistant_usage.roll_over(today);

    let limit = state.config.assistant.daily_message_limit;
    let before = state.assistant_usage.against(limit);
    if before.exhausted() {
        return Err(before);
    }

    state.assistant_usage.used += 1;
    Ok(QuotaReservation {
        before,
        after: state.assistant_usage.against(limit),
        warn_threshold: state.config.assistant.warn_threshold_percent,
    })
}

/// Returns a reserved slot after a prompt that never reached the assistant.
async fn release_slot(context: &super::AppContextHandle) {
    let mut state = context.state.write().await;
    state.assistant_usage.used = state.assistant_usage.used.saturating_sub(1);
}

/// Whether this increment moved usage from below the warn threshold to at or
/// above it. Thresholds of 100% and above never warn (exhaustion has its own
/// error notification).
fn crossed_warn_threshold(before: AssistantUsage, after: AssistantUsage, threshold: u32) -> bool {
    threshold < 100 && before.percent_used() < threshold && after.percent_used() >= threshold
}

/// Incremental UTF-8 decoder for streamed reply bodies.
///
/// HTTP chunk boundaries can split a multi-byte sequence; the undecodable
/// tail is carried into the next chunk instead of being replaced.
#[derive(Default)]
struct Utf8ChunkDecoder {
    carry: Vec<u8>,
}

impl Utf8ChunkDecoder {
    /// Appends `bytes` and returns every completely decodable character.
    fn push(&mut self, bytes: &[u8]) -> String {
        self.carry.extend_from_slice(bytes);
        match std::str::from_utf8(&self.carry) {
            Ok(text) => {
                let out = text.to_owned();
                self.carry.clear();
                out
            }
            // An incomplete trailing sequence: emit the valid prefix, keep
            // the rest for the next chunk.
            Err(error) if error.error_len().is_none() => {
                let valid = error.valid_up_to();
                let out = String::from_utf8_lossy(&self.carry[..valid]).into_owned();
                self.carry.drain(..valid);
                out
            }
            // Genuinely invalid bytes: replace rather than stall the stream.
            Err(_) => {
                let out = String::from_utf8_lossy(&self.carry).into_owned();
                self.carry.clear();
                out
            }
        }
    }

    /// Flushes whatever is left at end of stream, replacing any dangling
    /// partial sequence.
    fn finish(&mut self) -> String {
        let out = String::from_utf8_lossy(&self.carry).into_owned();
        self.carry.clear();
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use classdeck_bridge::config::Config;
    use tokio::sync::{RwLock, mpsc};

    use crate::api::ApiClient;
    use crate::state::{DailyUsage, State};

    use super::*;

    fn context_with_usage(used: u32, limit: u32) -> super::super::AppContextHandle {
        let mut config = Config::default();
        config.assistant.daily_message_limit = limit;
        let api = ApiClient::new(&config.api).unwrap();
        let mut usage = DailyUsage::new(chrono::Local::now().date_naive());
        usage.used = used;

        let (tx, _rx) = mpsc::channel(8);
        Arc::new(crate::AppContext {
            state: Arc::new(RwLock::new(State {
                config,
                api,
                identity: None,
                assistant_usage: usage,
            })),
            tx,
        })
    }

    fn usage(used: u32, limit: u32) -> AssistantUsage {
        AssistantUsage { used, limit }
    }

    #[tokio::test]
    async fn reservation_counts_the_prompt_under_the_check_lock() {
        let context = context_with_usage(0, 2);

        let first = reserve_slot(&context).await.unwrap();
        assert_eq!(first.before.used, 0);
        assert_eq!(first.after.used, 1);

        let second = reserve_slot(&context).await.unwrap();
        assert!(second.after.exhausted());

        // The limit is spent; a third prompt is refused, so the day can
        // never end above the configured limit.
        let refused = reserve_slot(&context).await;
        assert!(matches!(refused, Err(current) if current.used == 2));
        assert_eq!(context.state.read().await.assistant_usage.used, 2);
    }

    #[tokio::test]
    async fn release_hands_a_reserved_slot_back() {
        let context = context_with_usage(0, 1);
        reserve_slot(&context).await.unwrap();
        assert!(reserve_slot(&context).await.is_err());

        release_slot(&context).await;
        assert!(reserve_slot(&context).await.is_ok());
    }

    #[tokio::test]
    async fn reservation_rolls_the_day_over_first() {
        let context = context_with_usage(5, 5);
        {
            let mut state = context.state.write().await;
            state.assistant_usage.day = "2001-01-01".parse().unwrap();
        }

        let reservation = reserve_slot(&context).await.unwrap();
        assert_eq!(reservation.before.used, 0);
        assert_eq!(reservation.after.used, 1);
    }

    #[test]
    fn warn_threshold_fires_only_on_the_crossing() {
        // 39/50 is 78%, 40/50 is 80%.
        assert!(crossed_warn_threshold(usage(39, 50), usage(40, 50), 80));
        // Already above the threshold: no repeat warning.
        assert!(!crossed_warn_threshold(usage(40, 50), usage(41, 50), 80));
        // Still below.
        assert!(!crossed_warn_threshold(usage(10, 50), usage(11, 50), 80));
    }

    #[test]
    fn warn_threshold_of_100_is_disabled() {
        assert!(!crossed_warn_threshold(usage(49, 50), usage(50, 50), 100));
        assert!(!crossed_warn_threshold(usage(49, 50), usage(50, 50), 120));
    }

    #[test]
    fn decoder_reassembles_a_split_multibyte_character() {
        let mut decoder = Utf8ChunkDecoder::default();
        let text = "résumé".as_bytes();
        // Split inside the first 'é' (two-byte sequence).
        let first = decoder.push(&text[..2]);
        assert_eq!(first, "r");
        let rest = decoder.push(&text[2..]);
        assert_eq!(rest, "ésumé");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn decoder_replaces_invalid_bytes_instead_of_stalling() {
        let mut decoder = Utf8ChunkDecoder::default();
        let out = decoder.push(&[b'o', b'k', 0xFF, b'!']);
        assert!(out.starts_with("ok"));
        assert!(out.ends_with('!'));
        assert!(out.contains('\u{FFFD}'));
    }

    #[test]
    fn decoder_flushes_a_dangling_partial_sequence_at_end() {
        let mut decoder = Utf8ChunkDecoder::default();
        let text = "é".as_bytes();
        assert_eq!(decoder.push(&text[..1]), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }
}
