//! Client and models for the game definition service.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::map::layout::MapId;

// Standard User-Agent: name/version
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The envelope every service response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(rename = "statusCode", default)]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer_text: String,
    pub answer_index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_text: String,
    #[serde(default)]
    pub question_index: u32,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// A playable maze-chase game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    #[serde(default)]
    pub score_per_question: u32,
    #[serde(default)]
    pub map_id: MapId,
    /// Time budget in minutes.
    #[serde(default)]
    pub countdown: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub is_published: bool,
}

impl GameDefinition {
    /// The time budget in seconds.
    pub fn countdown_seconds(&self) -> u32 {
        self.countdown.saturating_mul(60)
    }
}

/// Unwraps a response envelope, treating `success: false` or a missing payload as a rejection.
pub fn parse_response(body: &str) -> Result<GameDefinition, ApiError> {
    let response: ApiResponse<GameDefinition> = serde_json::from_str(body)?;
    if !response.success {
        return Err(ApiError::Rejected(response.message));
    }
    response.data.ok_or_else(|| ApiError::Rejected(format!("response carried no data: {}", response.message)))
}

/// Reads a definition from a local JSON file holding a full response envelope.
pub fn load_definition_file(path: impl AsRef<Path>) -> Result<GameDefinition, ApiError> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path)?;
    let definition = parse_response(&body)?;
    info!(path = %path.display(), id = %definition.id, "Loaded game definition from file");
    Ok(definition)
}

/// Blocking client for the game service.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    http: Client,
}

impl GameClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder().user_agent(USER_AGENT).timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn definition_url(&self, game_id: &str) -> String {
        format!("{}/api/game/game-type/maze-chase/{}/play/public", self.base_url, game_id)
    }

    /// Fetches the public play definition of a game.
    pub fn fetch(&self, game_id: &str) -> Result<GameDefinition, ApiError> {
        let url = self.definition_url(game_id);
        debug!(%url, "Fetching game definition");

        let response = self.http.get(&url).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            // Prefer the service's own message when the error body is an envelope
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .map(|envelope| envelope.message)
                .unwrap_or(body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let definition = parse_response(&body)?;
        info!(
            id = %definition.id,
            name = %definition.name,
            map = %definition.map_id,
            questions = definition.questions.len(),
            "Fetched game definition"
        );
        Ok(definition)
    }
}
