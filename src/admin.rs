//! Admin console state: login status, the edit-in-modal drafts and the
//! mutation flow shared by both tables

use crate::api::{ApiClient, Navigator, Transport};
use crate::error::{ApiError, Result};
use crate::storage::KeyValueStore;
use crate::types::{Article, ArticleInput, Project, ProjectInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

impl AuthState {
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.is_empty() => AuthState::LoggedIn,
            _ => AuthState::LoggedOut,
        }
    }

    pub fn is_logged_in(self) -> bool {
        self == AuthState::LoggedIn
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Articles,
    Projects,
}

/// Editable form fields for one kind of record
pub trait DraftFields: Clone + PartialEq + Default {
    /// Whether every required field is filled in
    fn is_complete(&self) -> bool;
}

impl DraftFields for ArticleInput {
    fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

impl DraftFields for ProjectInput {
    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl From<&Article> for ArticleInput {
    fn from(a: &Article) -> Self {
        Self {
            title: a.title.clone(),
            content: a.content.clone(),
            summary: a.summary.clone(),
            tags: a.tags.clone(),
            is_published: a.is_published,
        }
    }
}

impl From<&Project> for ProjectInput {
    fn from(p: &Project) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            github_url: p.github_url.clone(),
            demo_url: p.demo_url.clone(),
            technologies: p.technologies.clone(),
            featured: p.featured,
        }
    }
}

/// The modal's state: closed, editing a stored record, or creating one
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Draft<F> {
    #[default]
    NoEdit,
    EditingExisting { id: u64, fields: F },
    EditingNew(F),
}

/// Call to make when a draft is saved
#[derive(Debug, Clone, PartialEq)]
pub enum SaveAction<F> {
    Create(F),
    Update(u64, F),
}

impl<F: DraftFields> Draft<F> {
    pub fn new_blank() -> Self {
        Draft::EditingNew(F::default())
    }

    pub fn existing(id: u64, fields: F) -> Self {
        Draft::EditingExisting { id, fields }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Draft::NoEdit)
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Draft::EditingNew(_))
    }

    pub fn fields(&self) -> Option<&F> {
        match self {
            Draft::NoEdit => None,
            Draft::EditingExisting { fields, .. } | Draft::EditingNew(fields) => Some(fields),
        }
    }

    /// Edit the fields in place; a closed draft stays closed
    pub fn edit(&mut self, f: impl FnOnce(&mut F)) {
        match self {
            Draft::NoEdit => {}
            Draft::EditingExisting { fields, .. } | Draft::EditingNew(fields) => f(fields),
        }
    }

    /// The call saving this draft should make, or `None` when there is
    /// nothing to save or a required field is missing
    pub fn save_action(&self) -> Option<SaveAction<F>> {
        match self {
            Draft::NoEdit => None,
            Draft::EditingExisting { fields, .. } | Draft::EditingNew(fields)
                if !fields.is_complete() =>
            {
                None
            }
            Draft::EditingExisting { id, fields } => Some(SaveAction::Update(*id, fields.clone())),
            Draft::EditingNew(fields) => Some(SaveAction::Create(fields.clone())),
        }
    }
}

impl Draft<ArticleInput> {
    pub fn for_article(article: &Article) -> Self {
        Draft::existing(article.id, ArticleInput::from(article))
    }
}

impl Draft<ProjectInput> {
    pub fn for_project(project: &Project) -> Self {
        Draft::existing(project.id, ProjectInput::from(project))
    }
}

/// Split a comma-separated input into trimmed, non-empty entries
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_list`] for filling the input
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// A change to the stored articles or projects
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SaveArticle(SaveAction<ArticleInput>),
    SaveProject(SaveAction<ProjectInput>),
    DeleteArticle(u64),
    DeleteProject(u64),
}

impl Mutation {
    /// Prefix of the failure message
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::SaveArticle(_) => "Saving article",
            Mutation::SaveProject(_) => "Saving project",
            Mutation::DeleteArticle(_) => "Deleting article",
            Mutation::DeleteProject(_) => "Deleting project",
        }
    }

    /// Question the user must accept first; only deletions ask
    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            Mutation::DeleteArticle(_) => Some("Delete this article?"),
            Mutation::DeleteProject(_) => Some("Delete this project?"),
            Mutation::SaveArticle(_) | Mutation::SaveProject(_) => None,
        }
    }
}

/// Both console tables as fetched after a change
#[derive(Debug)]
pub struct Lists {
    pub articles: Result<Vec<Article>>,
    pub projects: Result<Vec<Project>>,
}

#[derive(Debug)]
pub enum MutationOutcome {
    /// The user declined the confirmation; nothing was sent
    Declined,
    /// The backend accepted the change and the lists were fetched again
    Applied(Lists),
    Failed { action: &'static str, error: ApiError },
}

impl MutationOutcome {
    /// Message for the blocking alert shown on failure
    pub fn alert_message(&self) -> Option<String> {
        match self {
            MutationOutcome::Failed { action, error } => Some(format!("{} failed: {}", action, error)),
            _ => None,
        }
    }

    /// Close the editor after a successful change. A failed save keeps the
    /// modal open with the user's input.
    pub fn settle<F>(&self, draft: &mut Draft<F>) {
        if matches!(self, MutationOutcome::Applied(_)) {
            *draft = Draft::NoEdit;
        }
    }
}

/// Fetch both tables from scratch
pub async fn reload_lists<T, S, N>(client: &ApiClient<T, S, N>, page_size: u32) -> Lists
where
    T: Transport,
    S: KeyValueStore,
    N: Navigator,
{
    let articles = client.list_articles(1, page_size).await.map(|p| p.articles);
    let projects = client.list_projects().await;
    Lists { articles, projects }
}

/// Ask for confirmation when the mutation needs it, send it, and on success
/// reload both tables.
pub async fn run_mutation<T, S, N>(
    client: &ApiClient<T, S, N>,
    mutation: Mutation,
    page_size: u32,
    confirm: impl FnOnce(&str) -> bool,
) -> MutationOutcome
where
    T: Transport,
    S: KeyValueStore,
    N: Navigator,
{
    if let Some(question) = mutation.confirmation() {
        if !confirm(question) {
            return MutationOutcome::Declined;
        }
    }

    let result = match &mutation {
        Mutation::SaveArticle(SaveAction::Create(fields)) => client.create_article(fields).await.map(drop),
        Mutation::SaveArticle(SaveAction::Update(id, fields)) => {
            client.update_article(*id, fields).await.map(drop)
        }
        Mutation::SaveProject(SaveAction::Create(fields)) => client.create_project(fields).await.map(drop),
        Mutation::SaveProject(SaveAction::Update(id, fields)) => {
            client.update_project(*id, fields).await.map(drop)
        }
        Mutation::DeleteArticle(id) => client.delete_article(*id).await.map(drop),
        Mutation::DeleteProject(id) => client.delete_project(*id).await.map(drop),
    };

    match result {
        Ok(()) => MutationOutcome::Applied(reload_lists(client, page_size).await),
        Err(error) => {
            tracing::warn!("{} failed: {}", mutation.label(), error);
            MutationOutcome::Failed {
                action: mutation.label(),
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_state_from_token() {
        assert_eq!(AuthState::from_token(None), AuthState::LoggedOut);
        assert_eq!(AuthState::from_token(Some("")), AuthState::LoggedOut);
        assert!(AuthState::from_token(Some("jwt")).is_logged_in());
    }

    #[test]
    fn test_blank_article_title_is_not_saved() {
        let draft: Draft<ArticleInput> = Draft::new_blank();
        assert!(draft.save_action().is_none());

        let mut draft: Draft<ArticleInput> = Draft::new_blank();
        draft.edit(|f| {
            f.title = "   ".to_string();
            f.content = "body".to_string();
        });
        assert!(draft.save_action().is_none());
    }

    #[test]
    fn test_new_draft_creates() {
        let mut draft: Draft<ArticleInput> = Draft::new_blank();
        draft.edit(|f| f.title = "Hello".to_string());
        match draft.save_action() {
            Some(SaveAction::Create(fields)) => assert_eq!(fields.title, "Hello"),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_existing_draft_updates() {
        let project = Project {
            id: 9,
            name: "folio".to_string(),
            technologies: vec!["Rust".to_string()],
            featured: true,
            ..Project::default()
        };
        let draft = Draft::for_project(&project);
        assert!(!draft.is_new());
        match draft.save_action() {
            Some(SaveAction::Update(9, fields)) => {
                assert_eq!(fields.name, "folio");
                assert!(fields.featured);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_blank_project_name_is_not_saved() {
        let mut draft = Draft::for_project(&Project {
            id: 1,
            name: "x".to_string(),
            ..Project::default()
        });
        draft.edit(|f| f.name.clear());
        assert!(draft.save_action().is_none());
    }

    #[test]
    fn test_closed_draft() {
        let mut draft: Draft<ProjectInput> = Draft::NoEdit;
        assert!(!draft.is_open());
        draft.edit(|f| f.name = "ignored".to_string());
        assert!(draft.fields().is_none());
        assert!(draft.save_action().is_none());
    }

    #[test]
    fn test_only_deletions_ask_first() {
        assert_eq!(
            Mutation::DeleteArticle(1).confirmation(),
            Some("Delete this article?")
        );
        assert_eq!(
            Mutation::DeleteProject(1).confirmation(),
            Some("Delete this project?")
        );
        let save = Mutation::SaveProject(SaveAction::Create(ProjectInput::default()));
        assert!(save.confirmation().is_none());
        assert_eq!(save.label(), "Saving project");
    }

    #[test]
    fn test_settle_closes_draft_only_when_applied() {
        let failed = MutationOutcome::Failed {
            action: "Saving article",
            error: ApiError::Network("offline".to_string()),
        };
        let mut draft: Draft<ArticleInput> = Draft::new_blank();
        failed.settle(&mut draft);
        assert!(draft.is_open());
        assert_eq!(
            failed.alert_message().as_deref(),
            Some("Saving article failed: offline")
        );

        let applied = MutationOutcome::Applied(Lists {
            articles: Ok(Vec::new()),
            projects: Ok(Vec::new()),
        });
        applied.settle(&mut draft);
        assert!(!draft.is_open());
        assert!(applied.alert_message().is_none());
    }

    #[test]
    fn test_list_parsing() {
        assert_eq!(parse_list(" rust, leptos ,,wasm "), vec!["rust", "leptos", "wasm"]);
        assert!(parse_list(" , ").is_empty());
        assert_eq!(join_list(&parse_list("a,b")), "a, b");
    }
}
