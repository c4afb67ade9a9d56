use actix::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use actix::MessageResult;
use uuid::Uuid;
use log::{debug, info, warn, error};

use crate::config::game::{IDLE_SESSION_SECS, LEADERBOARD_TOP_N, TIMER_POLL_SECS};
use crate::game::state::{GameConfig, SessionState, SubmitError};
use crate::game::types::Phase;
use crate::leaderboard::{top_scores, LeaderboardStore};
use crate::server::game_session::messages::{
    ClientAction, Connect, Disconnect, GetSnapshot, ProcessClientMessage, ServerMessage,
};

/// Actor owning one player's game. All actions on the session go through its
/// mailbox, so clicks, submissions and timer polls never race each other.
pub struct GameSession {
    pub session_id: Uuid,
    state: SessionState,
    leaderboard: Arc<dyn LeaderboardStore>,
    connections: HashMap<Uuid, Recipient<ServerMessage>>,
    manager: Option<Addr<GameSessionManager>>,
    timer_poll: Option<SpawnHandle>,
}

impl GameSession {
    pub fn new(
        session_id: Uuid,
        state: SessionState,
        leaderboard: Arc<dyn LeaderboardStore>,
        manager: Option<Addr<GameSessionManager>>,
    ) -> Self {
        Self {
            session_id,
            state,
            leaderboard,
            connections: HashMap::new(),
            manager,
            timer_poll: None,
        }
    }

    fn snapshot_message(&mut self) -> ServerMessage {
        ServerMessage::SessionUpdate(self.state.snapshot(Instant::now()))
    }

    /// Send the current snapshot to every connection except `skip`.
    fn broadcast_state(&mut self, skip: Option<Uuid>) {
        let msg = self.snapshot_message();
        for (id, addr) in &self.connections {
            if Some(*id) != skip {
                addr.do_send(msg.clone());
            }
        }
    }

    /// Poll the clock while running so clients see the countdown and the end of the game.
    fn start_timer_poll(&mut self, ctx: &mut Context<Self>) {
        let handle = ctx.run_interval(Duration::from_secs(TIMER_POLL_SECS), |act, ctx| {
            let phase = act.state.observe(Instant::now());
            act.broadcast_state(None);
            if phase != Phase::Running {
                if let Some(handle) = act.timer_poll.take() {
                    ctx.cancel_future(handle);
                }
                debug!("[GameSession] Timer poll stopped: session_id={}", act.session_id);
            }
        });
        self.timer_poll = Some(handle);
    }

    fn leaderboard_message(&self) -> ServerMessage {
        match top_scores(self.leaderboard.as_ref(), LEADERBOARD_TOP_N) {
            Ok(entries) => ServerMessage::Leaderboard { entries },
            Err(e) => {
                error!("[GameSession] Leaderboard load failed: {}", e);
                ServerMessage::error("LEADERBOARD_UNAVAILABLE", "The leaderboard could not be loaded.", None)
            }
        }
    }

    fn apply_action(&mut self, action: ClientAction, connection_id: Uuid, ctx: &mut Context<Self>) -> Vec<ServerMessage> {
        let now = Instant::now();
        match action {
            ClientAction::Start => {
                if self.state.start(now) {
                    self.start_timer_poll(ctx);
                    self.broadcast_state(Some(connection_id));
                }
                vec![self.snapshot_message()]
            }
            ClientAction::Click { row, col } => {
                if self.state.click_cell(row, col, now).is_some() {
                    self.broadcast_state(Some(connection_id));
                }
                vec![self.snapshot_message()]
            }
            ClientAction::Submit { name } => self.submit(&name, connection_id, now),
            ClientAction::Reset => {
                if self.state.reset(&mut rand::rng()) {
                    self.broadcast_state(Some(connection_id));
                }
                vec![self.snapshot_message()]
            }
            ClientAction::Leaderboard => vec![self.leaderboard_message()],
            ClientAction::Ping => Vec::new(),
        }
    }

    fn submit(&mut self, name: &str, connection_id: Uuid, now: Instant) -> Vec<ServerMessage> {
        match self.state.submit(name, self.leaderboard.as_ref(), now) {
            Ok(record) => {
                info!(
                    "[GameSession] Score saved: session_id={} name={} score={}",
                    self.session_id, record.name, record.score
                );
                self.broadcast_state(Some(connection_id));
                vec![
                    ServerMessage::Submitted { record },
                    self.snapshot_message(),
                    self.leaderboard_message(),
                ]
            }
            Err(SubmitError::WrongPhase(phase)) => {
                warn!("[GameSession] Submit in phase {:?}: session_id={}", phase, self.session_id);
                vec![ServerMessage::error(
                    "WRONG_PHASE",
                    "Scores can only be submitted once, after time is up.",
                    Some(serde_json::json!({ "phase": phase })),
                )]
            }
            Err(SubmitError::InvalidName(e)) => vec![ServerMessage::error(
                "INVALID_NAME",
                &e.to_string(),
                Some(serde_json::json!({ "max_chars": crate::config::game::MAX_NAME_CHARS })),
            )],
            Err(SubmitError::Storage(e)) => {
                error!("[GameSession] Could not save score: session_id={} error={}", self.session_id, e);
                vec![
                    ServerMessage::error(
                        "LEADERBOARD_UNAVAILABLE",
                        "Your score could not be saved. Please try again.",
                        Some(serde_json::json!({ "score": self.state.score() })),
                    ),
                    self.snapshot_message(),
                ]
            }
        }
    }
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[GameSession] Session started: session_id={}", self.session_id);
        // Sessions nobody connects to are dropped.
        ctx.run_later(Duration::from_secs(IDLE_SESSION_SECS), |act, ctx| {
            if act.connections.is_empty() {
                info!("[GameSession] Session idle, closing: session_id={}", act.session_id);
                ctx.stop();
            }
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(manager) = &self.manager {
            manager.do_send(SessionClosed { session_id: self.session_id });
        }
    }
}

impl Handler<ProcessClientMessage> for GameSession {
    type Result = MessageResult<ProcessClientMessage>;

    fn handle(&mut self, msg: ProcessClientMessage, ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(self.apply_action(msg.action, msg.connection_id, ctx))
    }
}

impl Handler<Connect> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: Connect, _: &mut Context<Self>) -> Self::Result {
        debug!("[GameSession] Connection {} joined session {}", msg.connection_id, self.session_id);
        let snapshot = self.snapshot_message();
        msg.addr.do_send(snapshot);
        self.connections.insert(msg.connection_id, msg.addr);
    }
}

impl Handler<Disconnect> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Context<Self>) -> Self::Result {
        self.connections.remove(&msg.connection_id);
        debug!("[GameSession] Connection {} left session {}", msg.connection_id, self.session_id);
        if self.connections.is_empty() {
            info!("[GameSession] Last connection gone, closing: session_id={}", self.session_id);
            ctx.stop();
        }
    }
}

impl Handler<GetSnapshot> for GameSession {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.state.snapshot(Instant::now()))
    }
}

/// Registry of live sessions, keyed by session id.
pub struct GameSessionManager {
    sessions: HashMap<Uuid, Addr<GameSession>>,
    leaderboard: Arc<dyn LeaderboardStore>,
    config: GameConfig,
}

impl GameSessionManager {
    pub fn new(leaderboard: Arc<dyn LeaderboardStore>) -> Self {
        Self::with_config(leaderboard, GameConfig::default())
    }

    pub fn with_config(leaderboard: Arc<dyn LeaderboardStore>, config: GameConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            leaderboard,
            config,
        }
    }

    pub fn create_session(&mut self, ctx: &mut Context<Self>) -> Uuid {
        let session_id = Uuid::new_v4();
        let state = SessionState::new(self.config.clone(), &mut rand::rng());
        let session = GameSession::new(
            session_id,
            state,
            Arc::clone(&self.leaderboard),
            Some(ctx.address()),
        )
        .start();

        self.sessions.insert(session_id, session);
        info!("[SessionManager] Session created: session_id={} live={}", session_id, self.sessions.len());
        session_id
    }
}

impl Actor for GameSessionManager {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "Uuid")]
pub struct CreateSession;

impl Handler<CreateSession> for GameSessionManager {
    type Result = MessageResult<CreateSession>;

    fn handle(&mut self, _: CreateSession, ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(self.create_session(ctx))
    }
}

#[derive(Message)]
#[rtype(result = "Result<Addr<GameSession>, String>")]
pub struct GetGameSession {
    pub session_id: Uuid,
}

impl Handler<GetGameSession> for GameSessionManager {
    type Result = Result<Addr<GameSession>, String>;

    fn handle(&mut self, msg: GetGameSession, _: &mut Context<Self>) -> Self::Result {
        self.sessions.get(&msg.session_id)
            .filter(|addr| addr.connected())
            .cloned()
            .ok_or_else(|| "Game session not found".to_string())
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct SessionClosed {
    pub session_id: Uuid,
}

impl Handler<SessionClosed> for GameSessionManager {
    type Result = ();

    fn handle(&mut self, msg: SessionClosed, _: &mut Context<Self>) -> Self::Result {
        if self.sessions.remove(&msg.session_id).is_some() {
            info!("[SessionManager] Session removed: session_id={} live={}", msg.session_id, self.sessions.len());
        }
    }
}
