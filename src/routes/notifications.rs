//! WebSocket push channel. A connection joins the group named by its token's email, and admins
//! also join [`ADMINS_GROUP`].

use axum::{
    Router,
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use futures::{SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    middleware::auth::{ActingIdentity, Role, decode_token},
    notify::{ADMINS_GROUP, Notification},
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WsParams {
    /// Bearer token; browsers cannot set headers on a WebSocket handshake.
    pub token: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}

pub fn groups_for(identity: &ActingIdentity) -> Vec<String> {
    let mut groups = vec![identity.email.clone()];
    if identity.role == Role::Admin {
        groups.push(ADMINS_GROUP.to_string());
    }
    groups
}

/// JSON frame for `notification` if it is addressed to one of `groups`.
pub fn frame_for(notification: &Notification, groups: &[String]) -> Option<String> {
    if !groups.iter().any(|g| g == &notification.group) {
        return None;
    }
    serde_json::to_string(notification).ok()
}

#[utoipa::path(
    get,
    path = "/notifications/ws",
    params(WsParams),
    responses(
        (status = 101, description = "Switching to WebSocket"),
        (status = 401, description = "Invalid or expired token")
    ),
    tag = "Notifications"
)]
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
) -> AppResult<Response> {
    let identity = decode_token(&state.config, &params.token)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
}

async fn handle_socket(socket: WebSocket, state: AppState, identity: ActingIdentity) {
    let groups = groups_for(&identity);
    let mut notifications = state.hub.subscribe();
    let (mut sender, mut receiver) = socket.split();
    tracing::debug!(email = %identity.email, "notification subscriber connected");

    loop {
        tokio::select! {
            received = notifications.recv() => match received {
                Ok(notification) => {
                    let Some(frame) = frame_for(&notification, &groups) else {
                        continue;
                    };
                    if sender.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(email = %identity.email, skipped, "notification subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!(email = %identity.email, "notification subscriber disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> ActingIdentity {
        ActingIdentity {
            subject: "+201234567890".into(),
            email: "shop@marketplace.com".into(),
            role,
        }
    }

    #[test]
    fn admins_also_join_admin_group() {
        assert_eq!(groups_for(&identity(Role::Vendor)), vec!["shop@marketplace.com"]);
        assert_eq!(
            groups_for(&identity(Role::Admin)),
            vec!["shop@marketplace.com".to_string(), ADMINS_GROUP.to_string()]
        );
    }

    #[test]
    fn frames_only_for_joined_groups() {
        let groups = groups_for(&identity(Role::Vendor));
        let own = Notification::vendor("shop@marketplace.com", "Your account has been approved.");
        let other = Notification::vendor("other@marketplace.com", "Your account has been approved.");

        let frame = frame_for(&own, &groups).unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["event"], "ReceiveNotification");
        assert_eq!(value["source"], "Vendor");
        assert_eq!(value["message"], "Your account has been approved.");
        assert!(value.get("group").is_none());

        assert!(frame_for(&other, &groups).is_none());
        assert!(frame_for(&Notification::admins("New Vendor registered: Shop"), &groups).is_none());
    }
}
