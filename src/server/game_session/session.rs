/// WebSocket session handler for a game.
///
/// This actor manages a single browser connection to a game session, relaying
/// client actions (start, click, submit, reset) to the session actor and
/// serializing its replies and broadcast updates back to the client.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web::http::StatusCode;
use actix_web_actors::ws;
use log::{debug, warn};
use uuid::Uuid;

use crate::server::game_session::messages::{ClientAction, Connect, Disconnect, ProcessClientMessage, ServerMessage};
use crate::server::game_session::server::{GameSession, GetGameSession};
use crate::server::ws_error::{http_error_response, ws_error_message};

pub struct GameSessionActor {
    pub session_id: Uuid,
    pub connection_id: Uuid,
    pub session_addr: Addr<GameSession>,
}

impl GameSessionActor {
    fn send_message(&self, ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(_) => ctx.text(ws_error_message("SERIALIZATION_FAILED", "Failed to serialize server message", None)),
        }
    }

    fn forward(&mut self, action: ClientAction, ctx: &mut ws::WebsocketContext<Self>) {
        self.session_addr
            .send(ProcessClientMessage { action, connection_id: self.connection_id })
            .into_actor(self)
            .map(|res, act, ctx| match res {
                Ok(replies) => {
                    for reply in &replies {
                        act.send_message(ctx, reply);
                    }
                }
                Err(_) => {
                    ctx.text(ws_error_message(
                        "SESSION_UNAVAILABLE",
                        "This game session is no longer available.",
                        Some(serde_json::json!({ "session_id": act.session_id })),
                    ));
                    ctx.stop();
                }
            })
            .wait(ctx);
    }
}

impl Actor for GameSessionActor {
    type Context = ws::WebsocketContext<Self>;

    /// Registers this connection with the game session.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.session_addr.do_send(Connect {
            connection_id: self.connection_id,
            addr: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.session_addr.do_send(Disconnect {
            connection_id: self.connection_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameSessionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                // Désérialise le message du client
                match serde_json::from_str::<ClientAction>(&text) {
                    Ok(action) => self.forward(action, ctx),
                    Err(e) => {
                        debug!("[Ws] Invalid client message on session {}: {}", self.session_id, e);
                        ctx.text(ws_error_message("INVALID_MESSAGE", "Invalid client message", None));
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[Ws] Protocol error on session {}: {}", self.session_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

// Handler pour recevoir les updates de la session
impl Handler<ServerMessage> for GameSessionActor {
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, ctx: &mut Self::Context) -> Self::Result {
        self.send_message(ctx, &msg);
    }
}

pub async fn ws_game(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<String>,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let raw_id = path.into_inner();
    let Ok(session_id) = Uuid::parse_str(&raw_id) else {
        return Ok(http_error_response(
            "INVALID_SESSION_ID",
            "Session id must be a UUID.",
            Some(serde_json::json!({ "session_id": raw_id })),
            StatusCode::BAD_REQUEST,
        ));
    };

    let session_addr = match data.session_manager
        .send(GetGameSession { session_id })
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?
    {
        Ok(addr) => addr,
        Err(message) => {
            return Ok(http_error_response(
                "SESSION_NOT_FOUND",
                &message,
                Some(serde_json::json!({ "session_id": session_id })),
                StatusCode::NOT_FOUND,
            ));
        }
    };

    let connection_id = Uuid::new_v4();
    debug!("[Ws] Connection {} opening on session {}", connection_id, session_id);
    ws::start(
        GameSessionActor {
            session_id,
            connection_id,
            session_addr,
        },
        &req,
        stream,
    )
}
