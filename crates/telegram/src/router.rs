//! The per-user session state machine.
//!
//! [`route`] is a pure, total decision function: every inbound event
//! resolves to exactly one [`Route`], evaluated against a priority-ordered
//! rule list. Handlers perform the side effects; nothing here touches the
//! store or the transport.

use crate::{
    broadcast::BroadcastPayload,
    event::{ButtonAction, Command, InboundEvent},
};

/// Session facts the router needs about the sender.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionContext {
    pub is_operator: bool,
    pub awaiting_broadcast: bool,
    pub region_id: Option<i64>,
}

/// The single action an inbound event resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Deliver the payload to every known user.
    Broadcast(BroadcastPayload),
    /// Leave authoring mode, acknowledge.
    CancelBroadcast,
    /// Cancel issued while idle.
    NoActiveBroadcast,
    /// First contact: register and show the main menu.
    Welcome,
    ShowMenu,
    ShowAdminPanel,
    ShowRegionPicker,
    SetRegion(i64),
    ShowCategories,
    PromptSearch,
    ShowStats,
    /// Operator enters broadcast-authoring mode.
    EnterBroadcastMode,
    /// Query the listing source.
    Search { region_id: i64, keyword: String },
    /// Search attempted with no region selected.
    NeedRegion,
    /// Non-operator invoked an admin-only action.
    AccessDenied,
}

/// Resolve an inbound event to a route.
///
/// Rules, in priority order:
/// 1. Operator in authoring mode: text/photo/video becomes the broadcast
///    payload.
/// 2. Cancel: leaves authoring mode when set, otherwise reports that no
///    broadcast is active.
/// 3. Structured commands and button presses; admin-only ones resolve to
///    [`Route::AccessDenied`] for non-operators.
/// 4. Free text: a search keyword when a region is selected, a
///    region-selection prompt otherwise.
pub fn route(event: &InboundEvent, ctx: &SessionContext) -> Route {
    // Rule 1: authoring mode consumes content events.
    if ctx.is_operator && ctx.awaiting_broadcast {
        match event {
            InboundEvent::Text(text) => {
                return Route::Broadcast(BroadcastPayload::Text(text.clone()));
            },
            InboundEvent::Photo { file_id, caption } => {
                return Route::Broadcast(BroadcastPayload::Photo {
                    file_id: file_id.clone(),
                    caption: caption.clone(),
                });
            },
            InboundEvent::Video { file_id, caption } => {
                return Route::Broadcast(BroadcastPayload::Video {
                    file_id: file_id.clone(),
                    caption: caption.clone(),
                });
            },
            _ => {},
        }
    }

    // Rules 2 and 3: explicit cancel, then structured commands and buttons.
    match event {
        InboundEvent::Command(Command::Cancel) => {
            if ctx.awaiting_broadcast {
                Route::CancelBroadcast
            } else {
                Route::NoActiveBroadcast
            }
        },
        InboundEvent::Command(Command::Start) => Route::Welcome,
        InboundEvent::Command(Command::Menu) => Route::ShowMenu,
        InboundEvent::Command(Command::Admin) => admin_only(ctx, Route::ShowAdminPanel),
        InboundEvent::Button(action) => match action {
            ButtonAction::Search => Route::PromptSearch,
            ButtonAction::Categories => Route::ShowCategories,
            ButtonAction::ChangeRegion => Route::ShowRegionPicker,
            ButtonAction::Region(id) => Route::SetRegion(*id),
            ButtonAction::Category(keyword) => search_or_prompt(ctx, keyword.clone()),
            ButtonAction::Broadcast => admin_only(ctx, Route::EnterBroadcastMode),
            ButtonAction::Stats => admin_only(ctx, Route::ShowStats),
            ButtonAction::BackToMenu => Route::ShowMenu,
        },
        // Rule 4: free-text fallback. An empty keyword passes through
        // unchanged (broad match).
        InboundEvent::Text(text) => search_or_prompt(ctx, text.clone()),
        // Media outside authoring mode has no meaning; steer to the menu.
        InboundEvent::Photo { .. } | InboundEvent::Video { .. } => Route::ShowMenu,
    }
}

fn admin_only(ctx: &SessionContext, granted: Route) -> Route {
    if ctx.is_operator {
        granted
    } else {
        Route::AccessDenied
    }
}

fn search_or_prompt(ctx: &SessionContext, keyword: String) -> Route {
    match ctx.region_id {
        Some(region_id) => Route::Search { region_id, keyword },
        None => Route::NeedRegion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionContext {
        SessionContext::default()
    }

    fn user_with_region(region_id: i64) -> SessionContext {
        SessionContext {
            region_id: Some(region_id),
            ..SessionContext::default()
        }
    }

    fn operator() -> SessionContext {
        SessionContext {
            is_operator: true,
            ..SessionContext::default()
        }
    }

    fn authoring_operator() -> SessionContext {
        SessionContext {
            is_operator: true,
            awaiting_broadcast: true,
            ..SessionContext::default()
        }
    }

    #[test]
    fn free_text_without_region_never_searches() {
        let route = route(&InboundEvent::Text("driver".into()), &user());
        assert_eq!(route, Route::NeedRegion);
    }

    #[test]
    fn free_text_with_region_searches() {
        let route = route(&InboundEvent::Text("driver".into()), &user_with_region(1));
        assert_eq!(
            route,
            Route::Search {
                region_id: 1,
                keyword: "driver".into()
            }
        );
    }

    #[test]
    fn empty_text_passes_through_as_broad_match() {
        let route = route(&InboundEvent::Text(String::new()), &user_with_region(2));
        assert_eq!(
            route,
            Route::Search {
                region_id: 2,
                keyword: String::new()
            }
        );
    }

    #[test]
    fn category_uses_stored_region() {
        let event = InboundEvent::Button(ButtonAction::Category("courier".into()));
        assert_eq!(
            route(&event, &user_with_region(66)),
            Route::Search {
                region_id: 66,
                keyword: "courier".into()
            }
        );
        assert_eq!(route(&event, &user()), Route::NeedRegion);
    }

    #[test]
    fn admin_actions_denied_for_non_operator() {
        for event in [
            InboundEvent::Command(Command::Admin),
            InboundEvent::Button(ButtonAction::Broadcast),
            InboundEvent::Button(ButtonAction::Stats),
        ] {
            assert_eq!(route(&event, &user()), Route::AccessDenied);
            assert_eq!(route(&event, &user_with_region(1)), Route::AccessDenied);
        }
    }

    #[test]
    fn admin_actions_granted_for_operator() {
        assert_eq!(
            route(&InboundEvent::Command(Command::Admin), &operator()),
            Route::ShowAdminPanel
        );
        assert_eq!(
            route(&InboundEvent::Button(ButtonAction::Broadcast), &operator()),
            Route::EnterBroadcastMode
        );
        assert_eq!(
            route(&InboundEvent::Button(ButtonAction::Stats), &operator()),
            Route::ShowStats
        );
    }

    #[test]
    fn authoring_text_becomes_broadcast_payload() {
        let route = route(&InboundEvent::Text("big news".into()), &authoring_operator());
        assert_eq!(route, Route::Broadcast(BroadcastPayload::Text("big news".into())));
    }

    #[test]
    fn authoring_media_becomes_broadcast_payload() {
        let event = InboundEvent::Photo {
            file_id: "f1".into(),
            caption: "c".into(),
        };
        assert_eq!(
            route(&event, &authoring_operator()),
            Route::Broadcast(BroadcastPayload::Photo {
                file_id: "f1".into(),
                caption: "c".into()
            })
        );
    }

    #[test]
    fn authoring_text_from_non_operator_is_a_search() {
        // The authoring flag can never belong to a non-operator; even if the
        // context lies, content events must not reach the dispatcher.
        let ctx = SessionContext {
            is_operator: false,
            awaiting_broadcast: true,
            region_id: Some(1),
        };
        assert_eq!(
            route(&InboundEvent::Text("hello".into()), &ctx),
            Route::Search {
                region_id: 1,
                keyword: "hello".into()
            }
        );
    }

    #[test]
    fn cancel_while_authoring() {
        assert_eq!(
            route(&InboundEvent::Command(Command::Cancel), &authoring_operator()),
            Route::CancelBroadcast
        );
    }

    #[test]
    fn cancel_while_idle() {
        assert_eq!(
            route(&InboundEvent::Command(Command::Cancel), &operator()),
            Route::NoActiveBroadcast
        );
        assert_eq!(
            route(&InboundEvent::Command(Command::Cancel), &user()),
            Route::NoActiveBroadcast
        );
    }

    #[test]
    fn cancel_beats_broadcast_content() {
        // /cancel while authoring is a command, not broadcast text.
        let route = route(&InboundEvent::Command(Command::Cancel), &authoring_operator());
        assert!(!matches!(route, Route::Broadcast(_)));
    }

    #[test]
    fn structured_commands_still_work_while_authoring() {
        // Menu navigation does not drop out of authoring mode by itself.
        assert_eq!(
            route(&InboundEvent::Command(Command::Menu), &authoring_operator()),
            Route::ShowMenu
        );
    }

    #[test]
    fn start_and_menu_routes() {
        assert_eq!(route(&InboundEvent::Command(Command::Start), &user()), Route::Welcome);
        assert_eq!(
            route(&InboundEvent::Button(ButtonAction::BackToMenu), &user()),
            Route::ShowMenu
        );
        assert_eq!(
            route(&InboundEvent::Button(ButtonAction::Region(66)), &user()),
            Route::SetRegion(66)
        );
    }

    #[test]
    fn media_outside_authoring_shows_menu() {
        let event = InboundEvent::Video {
            file_id: "v".into(),
            caption: String::new(),
        };
        assert_eq!(route(&event, &user_with_region(1)), Route::ShowMenu);
    }
}
