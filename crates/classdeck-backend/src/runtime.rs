//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to shell bridge requests.

use std::{sync::Arc, thread};

use classdeck_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::api::ApiClient;
use crate::app::AppContext;
use crate::state::{DailyUsage, State};

/// Initialize backend state and start processing shell messages.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let config = crate::config::load_config()
        .await
        .expect("failed to load config");

    let api = ApiClient::new(&config.api).expect("failed to build the API client");
    let today = chrono::Local::now().date_naive();

    let state = Arc::new(RwLock::new(State {
        config,
        api,
        identity: None,
        assistant_usage: DailyUsage::new(today),
    }));

    let context = Arc::new(AppContext { state, tx });

    // Settle the session before the shell can make its first guard decision.
    let restore_context = context.clone();
    tokio::spawn(async move {
        crate::services::session_service::restore_session(restore_context).await;
    });

    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async { setup_backend(rx, tx).await });
    });
}
