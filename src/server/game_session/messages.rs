use actix::prelude::*;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::game::types::SessionSnapshot;
use crate::leaderboard::{LeaderboardRecord, RankedEntry};

// Message client -> serveur
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "action", content = "data")]
pub enum ClientAction {
    Start,
    Click { row: usize, col: usize },
    Submit { name: String },
    Reset,
    Leaderboard,
    Ping,
}

// Message serveur -> client
#[derive(Message, Serialize, Deserialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerMessage {
    SessionUpdate(SessionSnapshot),
    Leaderboard {
        entries: Vec<RankedEntry>,
    },
    Submitted {
        record: LeaderboardRecord,
    },
    Error {
        code: String,
        message: String,
        context: Option<serde_json::Value>,
    },
}

impl ServerMessage {
    pub fn error(code: &str, message: &str, context: Option<serde_json::Value>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
            context,
        }
    }
}

/// Apply one client action to a session. Returns the replies for the acting client.
#[derive(Message)]
#[rtype(result = "Vec<ServerMessage>")]
pub struct ProcessClientMessage {
    pub action: ClientAction,
    pub connection_id: Uuid,
}

/// Attach a client connection; it receives broadcast updates until it disconnects.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub connection_id: Uuid,
    pub addr: Recipient<ServerMessage>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub connection_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "SessionSnapshot")]
pub struct GetSnapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_action_wire_format() {
        let click: ClientAction =
            serde_json::from_str(r#"{"action":"Click","data":{"row":1,"col":2}}"#).unwrap();
        assert_eq!(click, ClientAction::Click { row: 1, col: 2 });
        let start: ClientAction = serde_json::from_str(r#"{"action":"Start"}"#).unwrap();
        assert_eq!(start, ClientAction::Start);
        let submit: ClientAction =
            serde_json::from_str(r#"{"action":"Submit","data":{"name":"Ann"}}"#).unwrap();
        assert_eq!(submit, ClientAction::Submit { name: "Ann".into() });
        assert!(serde_json::from_str::<ClientAction>(r#"{"action":"Teleport"}"#).is_err());
    }

    #[test]
    fn test_error_wire_format() {
        let json = serde_json::to_value(ServerMessage::error("WRONG_PHASE", "nope", None)).unwrap();
        assert_eq!(json["action"], "Error");
        assert_eq!(json["data"]["code"], "WRONG_PHASE");
        assert_eq!(json["data"]["message"], "nope");
    }
}
