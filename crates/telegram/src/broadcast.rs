//! Fan-out broadcast dispatcher.
//!
//! Delivers one payload to every user the directory knows about, with
//! bounded concurrency and per-recipient failure isolation. A failed send
//! is logged and counted, never propagated: one blocked user must not stop
//! the rest of the fan-out.

use {futures::StreamExt, tracing::warn};

use {
    crate::outbound::MessagingGateway,
    jobgram_directory::UserDirectory,
};

/// How many sends may be in flight at once.
const MAX_IN_FLIGHT: usize = 16;

/// Content captured from the operator's authoring message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastPayload {
    Text(String),
    Photo { file_id: String, caption: String },
    Video { file_id: String, caption: String },
}

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Recipients the dispatcher attempted to reach.
    pub attempted: u64,
    /// Sends that completed without error.
    pub succeeded: u64,
}

/// Deliver `payload` to every user in the directory.
///
/// The recipient list is read once, at dispatch start; users registering
/// mid-dispatch are picked up by the next broadcast. Every send is awaited
/// before the report is produced, so the counts are final.
pub async fn dispatch(
    gateway: &dyn MessagingGateway,
    directory: &dyn UserDirectory,
    payload: &BroadcastPayload,
) -> jobgram_directory::Result<BroadcastReport> {
    let recipients = directory.all_user_ids().await?;
    let attempted = recipients.len() as u64;

    let succeeded = futures::stream::iter(recipients)
        .map(|user_id| async move {
            let result = match payload {
                BroadcastPayload::Text(text) => gateway.send_html(user_id, text).await,
                BroadcastPayload::Photo { file_id, caption } => {
                    gateway.send_photo(user_id, file_id, caption).await
                },
                BroadcastPayload::Video { file_id, caption } => {
                    gateway.send_video(user_id, file_id, caption).await
                },
            };
            match result {
                Ok(()) => true,
                Err(error) => {
                    warn!(user_id, %error, "broadcast delivery failed");
                    false
                },
            }
        })
        .buffer_unordered(MAX_IN_FLIGHT)
        .filter(|delivered| futures::future::ready(*delivered))
        .count()
        .await as u64;

    Ok(BroadcastReport {
        attempted,
        succeeded,
    })
}
