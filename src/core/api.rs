//! HTTP + WebSocket API for MELVA
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /session/new - Create new session
//! - GET /session/{id} - Session status and memory
//! - POST /session/{id}/message - Send a learner message
//! - GET /session/{id}/transcript - Stored messages
//! - DELETE /session/{id} - Drop session
//! - WS /ws/{id} - Live updates

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::config::TutorConfig;
use crate::core::{GeneratorKind, ResponseGenerator};
use crate::error::TutorError;
use crate::TRANSCRIPT_CAP;
use crate::types::{ChatMessage, Context, Emotion, Intent, SessionMemory, Topic, TurnBranch};

/// One conversation: its context, its generator and its transcript
pub struct Session {
    pub id: String,
    pub context: Context,
    pub generator: Box<dyn ResponseGenerator>,
    /// Most recent messages, at most `TRANSCRIPT_CAP`
    pub transcript: VecDeque<ChatMessage>,
    /// Messages exchanged over the session's lifetime
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub update_tx: broadcast::Sender<SessionUpdate>,
}

impl Session {
    pub fn new(
        id: String,
        context: Context,
        generator: Box<dyn ResponseGenerator>,
        broadcast_capacity: usize,
    ) -> Self {
        let (update_tx, _) = broadcast::channel(broadcast_capacity);
        Self {
            id,
            context,
            generator,
            transcript: VecDeque::new(),
            message_count: 0,
            created_at: Utc::now(),
            update_tx,
        }
    }

    /// Append to the transcript, evicting the oldest message past the cap
    fn record(&mut self, message: ChatMessage) {
        self.transcript.push_back(message);
        while self.transcript.len() > TRANSCRIPT_CAP {
            self.transcript.pop_front();
        }
        self.message_count += 1;
    }
}

/// Live update message, sent after every exchange
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    pub session_id: String,
    pub message_count: usize,
    pub response: String,
    pub branch: Option<TurnBranch>,
    pub topic: Option<Topic>,
    pub emotion: Option<Emotion>,
    pub timestamp: DateTime<Utc>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    pub default_context: Context,
    pub default_generator: GeneratorKind,
    pub broadcast_capacity: usize,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub context: Option<Context>,
    pub generator: Option<String>,
}

/// Create new session response
#[derive(Debug, Serialize, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub generator: String,
    pub context: Context,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    /// Present for generators that keep memory
    pub memory: Option<SessionMemory>,
}

/// Send message request
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Send message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub response: String,
    pub branch: Option<TurnBranch>,
    pub topic: Option<Topic>,
    pub emotion: Option<Emotion>,
    pub intent: Option<Intent>,
    pub confidence: Option<f64>,
    /// Turn number for tutor sessions, user message count otherwise
    pub turn: u64,
}

/// Transcript response
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// `TutorError` as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub TutorError);

impl From<TutorError> for ApiError {
    fn from(e: TutorError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TutorError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            TutorError::UnknownGenerator(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Create the API router
pub fn create_router(config: &TutorConfig) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        default_context: config.default_context(),
        default_generator: config.engine.generator,
        broadcast_capacity: config.server.broadcast_capacity.max(1),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/message", post(send_message))
        .route("/session/:id/transcript", get(get_transcript))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> ApiResult<Json<NewSessionResponse>> {
    let kind = match req.generator.as_deref() {
        Some(name) => name.parse::<GeneratorKind>()?,
        None => state.default_generator,
    };
    let context = req
        .context
        .unwrap_or_else(|| state.default_context.clone())
        .normalized();

    let session_id = generate_session_id();
    let session = Session::new(
        session_id.clone(),
        context,
        kind.build(),
        state.broadcast_capacity,
    );

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    tracing::info!(session = %session_id, generator = %kind, "session created");

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionStatusResponse>> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| TutorError::SessionNotFound(id.clone()))?;

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        generator: session.generator.name().to_string(),
        context: session.context.clone(),
        message_count: session.message_count,
        created_at: session.created_at,
        memory: session.generator.memory().cloned(),
    }))
}

/// Send a learner message and answer it
async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| TutorError::SessionNotFound(id.clone()))?;

    session.record(ChatMessage::user(req.text.clone()));
    let reply = session.generator.generate_turn(&req.text, &session.context);
    let reply_message = ChatMessage::assistant(reply.text.clone());
    let timestamp = reply_message.timestamp;
    session.record(reply_message);

    let turn = reply.turn.as_ref();
    let exchanges = (session.message_count / 2) as u64;
    let response = MessageResponse {
        response: reply.text.clone(),
        branch: turn.map(|t| t.branch),
        topic: turn.map(|t| t.topic),
        emotion: turn.map(|t| t.emotion),
        intent: turn.map(|t| t.intent.intent),
        confidence: turn.map(|t| t.intent.confidence),
        turn: turn.map(|t| t.turn).unwrap_or(exchanges),
    };

    // No subscribers is fine
    let _ = session.update_tx.send(SessionUpdate {
        session_id: id,
        message_count: session.message_count,
        response: reply.text,
        branch: response.branch,
        topic: response.topic,
        emotion: response.emotion,
        timestamp,
    });

    Ok(Json(response))
}

/// Get stored transcript
async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TranscriptResponse>> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| TutorError::SessionNotFound(id.clone()))?;

    Ok(Json(TranscriptResponse {
        session_id: id,
        messages: session.transcript.iter().cloned().collect(),
    }))
}

/// Drop a session
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut sessions = state.sessions.write().await;
    sessions
        .remove(&id)
        .ok_or_else(|| TutorError::SessionNotFound(id.clone()))?;
    tracing::info!(session = %id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> ApiResult<impl IntoResponse> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| TutorError::SessionNotFound(id.clone()))?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward updates until the client leaves or the session is dropped
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<SessionUpdate>) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            let update = match rx.recv().await {
                Ok(update) => update,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "websocket client lagging, updates dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            let json = match serde_json::to_string(&update) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to serialize session update");
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("session_{:x}_{:x}", nanos, seq)
}

/// Run the API server
pub async fn run_server(config: &TutorConfig) -> crate::Result<()> {
    let router = create_router(config);
    let addr = config.server.addr.as_str();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "MELVA API listening");
    println!("\u{1f3b5} MELVA API running on {}", addr);
    println!("  POST   /session/new             - Create session");
    println!("  GET    /session/:id             - Get status");
    println!("  POST   /session/:id/message     - Send message");
    println!("  GET    /session/:id/transcript  - Get transcript");
    println!("  DELETE /session/:id             - Delete session");
    println!("  WS     /ws/:id                  - Live updates");
    println!("  GET    /health                  - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_ne!(a, b);
        assert!(a.starts_with("session_"));
    }

    #[test]
    fn test_error_status_codes() {
        let status = |e: TutorError| ApiError(e).into_response().status();
        assert_eq!(status(TutorError::SessionNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(TutorError::UnknownGenerator("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(TutorError::Config("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_transcript_is_capped() {
        let mut session = Session::new(
            "s".to_string(),
            Context::default(),
            GeneratorKind::Tutor.build(),
            4,
        );
        for i in 0..TRANSCRIPT_CAP + 10 {
            session.record(ChatMessage::user(format!("msg {}", i)));
        }

        assert_eq!(session.transcript.len(), TRANSCRIPT_CAP);
        assert_eq!(session.message_count, TRANSCRIPT_CAP + 10);
        assert_eq!(session.transcript[0].content, "msg 10");
    }
}
