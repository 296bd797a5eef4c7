//! Side-effecting execution of routed events.
//!
//! [`handle_event`] builds the session context, asks the state machine for a
//! route, and performs the store, listing, and transport effects the route
//! calls for. Store failures degrade to a logged error plus a generic reply;
//! only outbound transport errors propagate to the polling loop.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info, warn};

use {
    crate::{
        broadcast::{self, BroadcastPayload},
        error::Result,
        event::{Command, InboundEvent},
        keyboard,
        router::{Route, SessionContext, route},
        state::BotState,
    },
    jobgram_common::catalog::region_name,
    jobgram_directory::{SessionMode, UserProfile},
    jobgram_listings::render_listing,
};

const WELCOME: &str = "Welcome! Pick a region to start searching for jobs, \
                       or use the menu below.";
const MENU: &str = "Main menu:";
const ADMIN_PANEL: &str = "Admin panel:";
const PICK_REGION: &str = "Choose your region:";
const PICK_CATEGORY: &str = "Choose a category:";
const PROMPT_SEARCH: &str = "Type a keyword to search for listings.";
const NEED_REGION: &str = "Select a region first, then search.";
const NO_RESULTS: &str = "No listings found. Try another keyword.";
const ACCESS_DENIED: &str = "You do not have access.";
const BROADCAST_PROMPT: &str =
    "Send the broadcast content now (text, photo, or video). Use /cancel to abort.";
const BROADCAST_CANCELLED: &str = "Broadcast cancelled.";
const NO_ACTIVE_BROADCAST: &str = "No active broadcast to cancel.";
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Handle one classified inbound event from `chat_id`.
pub async fn handle_event(
    state: &BotState,
    chat_id: i64,
    profile: &UserProfile,
    event: InboundEvent,
) -> Result<()> {
    let user_id = profile.user_id;

    // First contact registers (or refreshes) the directory record.
    if event == InboundEvent::Command(Command::Start) {
        if let Err(e) = state.directory.upsert(profile, unix_now()).await {
            error!(user_id, error = %e, "user registration failed");
            return state.gateway.send_html(chat_id, GENERIC_FAILURE).await;
        }
    }

    let region_id = match state.directory.region(user_id).await {
        Ok(region_id) => region_id,
        Err(e) => {
            error!(user_id, error = %e, "region lookup failed");
            return state.gateway.send_html(chat_id, GENERIC_FAILURE).await;
        },
    };

    let ctx = SessionContext {
        is_operator: user_id == state.config.operator_id,
        awaiting_broadcast: state.modes.mode(user_id) == SessionMode::AwaitingBroadcastContent,
        region_id,
    };

    match route(&event, &ctx) {
        Route::Welcome => {
            state
                .gateway
                .send_with_keyboard(chat_id, WELCOME, &keyboard::main_menu())
                .await
        },
        Route::ShowMenu => {
            state
                .gateway
                .send_with_keyboard(chat_id, MENU, &keyboard::main_menu())
                .await
        },
        Route::ShowAdminPanel => {
            state
                .gateway
                .send_with_keyboard(chat_id, ADMIN_PANEL, &keyboard::admin_panel())
                .await
        },
        Route::ShowRegionPicker => {
            state
                .gateway
                .send_with_keyboard(chat_id, PICK_REGION, &keyboard::region_picker())
                .await
        },
        Route::SetRegion(region_id) => set_region(state, chat_id, user_id, region_id).await,
        Route::ShowCategories => {
            state
                .gateway
                .send_with_keyboard(chat_id, PICK_CATEGORY, &keyboard::category_picker())
                .await
        },
        Route::PromptSearch => state.gateway.send_html(chat_id, PROMPT_SEARCH).await,
        Route::ShowStats => show_stats(state, chat_id).await,
        Route::EnterBroadcastMode => {
            state
                .modes
                .set_mode(user_id, SessionMode::AwaitingBroadcastContent);
            state.gateway.send_html(chat_id, BROADCAST_PROMPT).await
        },
        Route::Broadcast(payload) => run_broadcast(state, chat_id, user_id, &payload).await,
        Route::CancelBroadcast => {
            state.modes.clear(user_id);
            state.gateway.send_html(chat_id, BROADCAST_CANCELLED).await
        },
        Route::NoActiveBroadcast => state.gateway.send_html(chat_id, NO_ACTIVE_BROADCAST).await,
        Route::Search { region_id, keyword } => {
            run_search(state, chat_id, region_id, &keyword).await
        },
        Route::NeedRegion => {
            state
                .gateway
                .send_with_keyboard(chat_id, NEED_REGION, &keyboard::region_picker())
                .await
        },
        Route::AccessDenied => state.gateway.send_html(chat_id, ACCESS_DENIED).await,
    }
}

async fn set_region(state: &BotState, chat_id: i64, user_id: i64, region_id: i64) -> Result<()> {
    // Catalog ids come from our own keyboards; anything else is a stale or
    // forged callback and is dropped without a reply.
    let Some(name) = region_name(region_id) else {
        warn!(user_id, region_id, "region selection outside catalog ignored");
        return Ok(());
    };
    if let Err(e) = state.directory.set_region(user_id, region_id).await {
        error!(user_id, region_id, error = %e, "region update failed");
        return state.gateway.send_html(chat_id, GENERIC_FAILURE).await;
    }
    let confirmation = format!("Region set to {name}.");
    state
        .gateway
        .send_with_keyboard(chat_id, &confirmation, &keyboard::main_menu())
        .await
}

async fn show_stats(state: &BotState, chat_id: i64) -> Result<()> {
    match state.directory.count().await {
        Ok(count) => {
            let text = format!("Registered users: {count}");
            state.gateway.send_html(chat_id, &text).await
        },
        Err(e) => {
            error!(error = %e, "user count failed");
            state.gateway.send_html(chat_id, GENERIC_FAILURE).await
        },
    }
}

async fn run_search(state: &BotState, chat_id: i64, region_id: i64, keyword: &str) -> Result<()> {
    let listings = state.listings.search(region_id, keyword).await;
    if listings.is_empty() {
        return state.gateway.send_html(chat_id, NO_RESULTS).await;
    }
    for listing in &listings {
        state
            .gateway
            .send_html(chat_id, &render_listing(listing))
            .await?;
    }
    Ok(())
}

async fn run_broadcast(
    state: &BotState,
    chat_id: i64,
    user_id: i64,
    payload: &BroadcastPayload,
) -> Result<()> {
    // Authoring mode ends the moment content is submitted, whether or not
    // the dispatch itself succeeds.
    state.modes.clear(user_id);

    match broadcast::dispatch(state.gateway.as_ref(), state.directory.as_ref(), payload).await {
        Ok(report) => {
            info!(
                attempted = report.attempted,
                succeeded = report.succeeded,
                "broadcast dispatched"
            );
            let summary = format!("Delivered {} of {}.", report.succeeded, report.attempted);
            state.gateway.send_html(chat_id, &summary).await
        },
        Err(e) => {
            error!(error = %e, "broadcast dispatch failed");
            state.gateway.send_html(chat_id, GENERIC_FAILURE).await
        },
    }
}
