//! Typed endpoint calls

use super::{ApiClient, Navigator, Transport};
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::types::*;

impl<T: Transport, S: KeyValueStore, N: Navigator> ApiClient<T, S, N> {
    // ============= Auth =============

    /// Log in and store the returned token
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self.post("/auth/login", &body).await?;
        self.tokens().set(&resp.token);
        tracing::info!("Logged in as {}", username);
        Ok(resp.token)
    }

    /// Forget the stored token
    pub fn logout(&self) {
        self.tokens().clear();
        tracing::info!("Logged out");
    }

    // ============= Articles =============

    pub async fn list_articles(&self, page: u32, page_size: u32) -> Result<ArticlePage> {
        self.get(&format!("/articles?page={}&page_size={}", page.max(1), page_size))
            .await
    }

    pub async fn get_article(&self, id: u64) -> Result<Article> {
        self.get(&format!("/articles/{}", id)).await
    }

    pub async fn create_article(&self, input: &ArticleInput) -> Result<Article> {
        self.post("/articles", input).await
    }

    pub async fn update_article(&self, id: u64, input: &ArticleInput) -> Result<Article> {
        self.put(&format!("/articles/{}", id), input).await
    }

    pub async fn delete_article(&self, id: u64) -> Result<Ack> {
        self.delete(&format!("/articles/{}", id)).await
    }

    // ============= Projects =============

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let resp: ProjectList = self.get("/projects").await?;
        Ok(resp.projects)
    }

    pub async fn featured_projects(&self) -> Result<Vec<Project>> {
        let resp: ProjectList = self.get("/projects/featured").await?;
        Ok(resp.projects)
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project> {
        self.post("/projects", input).await
    }

    pub async fn update_project(&self, id: u64, input: &ProjectInput) -> Result<Project> {
        self.put(&format!("/projects/{}", id), input).await
    }

    pub async fn delete_project(&self, id: u64) -> Result<Ack> {
        self.delete(&format!("/projects/{}", id)).await
    }

    // ============= Chat =============

    pub async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post("/ai/chat", request).await
    }

    pub async fn list_characters(&self) -> Result<Vec<AICharacter>> {
        let resp: CharactersResponse = self.get("/ai/characters").await?;
        Ok(resp.characters)
    }

    pub async fn list_models(&self) -> Result<Vec<AIModel>> {
        let resp: ModelsResponse = self.get("/ai/models").await?;
        Ok(resp.models)
    }

    // ============= Conversations =============

    pub async fn list_conversations(&self, session_id: &str) -> Result<Vec<Conversation>> {
        let resp: ConversationsResponse = self
            .get(&format!(
                "/conversations?session_id={}",
                urlencoding::encode(session_id)
            ))
            .await?;
        Ok(resp.conversations)
    }

    pub async fn get_conversation(&self, id: u64) -> Result<ConversationDetail> {
        self.get(&format!("/conversations/{}", id)).await
    }

    pub async fn rename_conversation(&self, id: u64, title: &str) -> Result<Ack> {
        let body = RenameRequest {
            title: title.to_string(),
        };
        self.put(&format!("/conversations/{}", id), &body).await
    }

    pub async fn delete_conversation(&self, id: u64) -> Result<Ack> {
        self.delete(&format!("/conversations/{}", id)).await
    }
}
