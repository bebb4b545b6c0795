// Websocket handler for live dashboards
use crate::application::monitor_service::MonitorService;
use crate::domain::event::{ClientEvent, DashboardEvent};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

pub async fn dashboard_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_dashboard(socket, state.monitor_service.clone()))
}

async fn serve_dashboard(socket: WebSocket, service: MonitorService) {
    let subscription = service.connect_subscriber().await;
    let id = subscription.id;
    tracing::info!("Dashboard {} connected ({} live)", id, service.subscriber_count());

    let (mut sender, mut receiver) = socket.split();

    // Replay current state before any live update reaches this dashboard
    for event in &subscription.catch_up {
        if send_event(&mut sender, event).await.is_err() {
            tracing::info!("Dashboard {} disconnected during catch-up", id);
            return;
        }
    }

    let mut updates = BroadcastStream::new(subscription.updates);
    let mut send_task = tokio::spawn(async move {
        while let Some(item) = updates.next().await {
            match item {
                Ok(event) => {
                    if send_event(&mut sender, &event).await.is_err() {
                        break;
                    }
                }
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!("Dashboard {} lagged, {} events dropped", id, skipped);
                }
            }
        }
    });

    let relay = service.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => handle_client_frame(&relay, &text),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::info!("Dashboard {} disconnected", id);
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &DashboardEvent,
) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to encode {}: {}", event.name(), e);
            return Ok(());
        }
    };
    sender.send(Message::Text(text)).await
}

/// Relay an inbound dashboard frame. Unknown or malformed frames are logged and ignored.
pub fn handle_client_frame(service: &MonitorService, text: &str) {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(ClientEvent::SosEmergency(request)) => {
            service.relay_sos(request);
        }
        Ok(ClientEvent::Message(payload)) => service.relay_message(payload),
        Err(e) => tracing::warn!("Ignoring dashboard frame: {}", e),
    }
}
