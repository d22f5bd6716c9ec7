//! API types matching the blog backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

// ============= Auth =============

/// Login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Generic `{message}` acknowledgement returned by update/delete endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

// ============= Articles =============

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Whether the article was edited after it was first created
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// One page of `GET /articles`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePage {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

/// Body of `POST /articles` and `PUT /articles/:id`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ArticleInput {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub is_published: bool,
}

// ============= Projects =============

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub demo_url: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Body of `POST /projects` and `PUT /projects/:id`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    pub github_url: String,
    pub demo_url: String,
    pub technologies: Vec<String>,
    pub featured: bool,
}

// ============= Chat =============

/// Which conversation a chat message belongs to.
///
/// The backend encodes "start a new conversation" as id `0`; that mapping
/// only happens when the request is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationTarget {
    #[default]
    New,
    Existing(u64),
}

impl ConversationTarget {
    pub fn wire_id(self) -> u64 {
        match self {
            ConversationTarget::New => 0,
            ConversationTarget::Existing(id) => id,
        }
    }

    pub fn is_new(self) -> bool {
        matches!(self, ConversationTarget::New)
    }
}

impl Serialize for ConversationTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.wire_id())
    }
}

/// Chat request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// `0` lets the backend pick its default character
    pub character_id: u64,
    /// Model name, empty for the backend default
    pub provider: String,
    pub session_id: String,
    pub conversation_id: ConversationTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt: u32,
    #[serde(default)]
    pub completion: u32,
    #[serde(default)]
    pub total: u32,
}

/// Chat response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub conversation_id: u64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub token_usage: TokenUsage,
}

/// Selectable AI persona
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AICharacter {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub greeting_message: String,
    #[serde(default)]
    pub personality_tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl AICharacter {
    /// Greeting with the backend's `$` separators rendered as spaces
    pub fn greeting(&self) -> String {
        self.greeting_message.replace('$', " ")
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharactersResponse {
    #[serde(default)]
    pub characters: Vec<AICharacter>,
}

/// Selectable model/provider
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AIModel {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub display_name: String,
}

impl AIModel {
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub models: Vec<AIModel>,
}

// ============= Conversations =============

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conversation {
    pub id: u64,
    #[serde(default)]
    pub session_id: String,
    pub title: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationsResponse {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// Stored chat message as returned by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryMessage {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub character_id: u64,
    pub message_type: String,
    pub content: String,
    #[serde(default)]
    pub token_count: u32,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// `GET /conversations/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameRequest {
    pub title: String,
}

// ============= Client-side chat messages =============

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Message in the visible conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Rebuild from history; system entries are not shown
    pub fn from_history(msg: &HistoryMessage) -> Option<Self> {
        let role = match msg.message_type.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => return None,
        };
        Some(Self {
            role,
            content: msg.content.clone(),
            timestamp: msg.created_at,
        })
    }

    /// Content with the backend's `$` separators rendered as line breaks
    pub fn display_text(&self) -> String {
        self.content.replace('$', "\n")
    }
}
