//! Drives the client-side `ModerationEngine` against a live server, with
//! a reqwest-backed implementation of the collaborator boundary.

mod common;

use newsdesk_core::content::model::{ContentDraft, ContentItem, ContentKind};
use newsdesk_core::content::status::{Actor, ModerationAction, ModerationStatus, Role};
use newsdesk_core::engine::{BackendError, EngineError, ModerationEngine, StatusBackend};
use newsdesk_core::envelope::ApiEnvelope;
use newsdesk_core::events::types::ContentFlag;
use newsdesk_core::store::{ContentAction, ContentStore};
use serde_json::json;

use common::*;

/// Maps store actions onto the REST endpoints they correspond to.
/// Creation flows through the plain client path (the server mints ids),
/// so the engine here is hydrated from a fetch, like a dashboard would.
struct HttpBackend {
    client: reqwest::Client,
    base: String,
    author_token: String,
    admin_token: String,
}

impl HttpBackend {
    fn token_for(&self, actor: Actor) -> &str {
        match actor.role {
            Role::Admin => &self.admin_token,
            Role::Author => &self.author_token,
        }
    }
}

impl StatusBackend for HttpBackend {
    async fn commit(&self, action: &ContentAction, actor: Actor) -> Result<(), BackendError> {
        let token = self.token_for(actor);
        let request = match action {
            ContentAction::SetStatus { id, action } => {
                let path = match action {
                    ModerationAction::Submit => format!("/v1/content/{id}/submit"),
                    ModerationAction::Resubmit => format!("/v1/content/{id}/resubmit"),
                    ModerationAction::Approve => format!("/v1/moderation/{id}/approve"),
                    ModerationAction::Reject { .. } => format!("/v1/moderation/{id}/reject"),
                    ModerationAction::ReturnToPending => format!("/v1/moderation/{id}/return"),
                };
                let builder = self.client.post(format!("{}{path}", self.base));
                match action {
                    ModerationAction::Reject { reason } => {
                        builder.json(&json!({ "reason": reason }))
                    }
                    _ => builder,
                }
            }
            ContentAction::BulkSetStatus { ids, action } => match action {
                ModerationAction::Approve => self
                    .client
                    .post(format!("{}/v1/moderation/bulk/approve", self.base))
                    .json(&json!({ "ids": ids })),
                ModerationAction::Reject { reason } => self
                    .client
                    .post(format!("{}/v1/moderation/bulk/reject", self.base))
                    .json(&json!({ "ids": ids, "reason": reason })),
                other => {
                    return Err(BackendError::Rejected(format!(
                        "no bulk endpoint for {}",
                        other.name()
                    )))
                }
            },
            ContentAction::ToggleFlag { id, flag } => {
                let path = match flag {
                    ContentFlag::TopNews => format!("/v1/moderation/{id}/top-news"),
                    ContentFlag::Trending => format!("/v1/moderation/{id}/trending"),
                };
                self.client.post(format!("{}{path}", self.base))
            }
            ContentAction::Update { id, patch } => self
                .client
                .put(format!("{}/v1/content/{id}", self.base))
                .json(patch),
            ContentAction::Delete { id } => self
                .client
                .delete(format!("{}/v1/content/{id}", self.base)),
            ContentAction::Create { .. } => {
                return Err(BackendError::Rejected(
                    "creation goes through the client fetch path".to_string(),
                ))
            }
        };

        let resp = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| BackendError::Network(err.to_string()))?;
        let env: ApiEnvelope<serde_json::Value> = resp
            .json()
            .await
            .map_err(|err| BackendError::Network(err.to_string()))?;
        env.into_result().map(|_| ()).map_err(BackendError::from)
    }
}

async fn fetch_item(
    client: &reqwest::Client,
    base: &str,
    admin_token: &str,
    id: &str,
) -> ContentItem {
    let resp = client
        .get(format!("{base}/v1/moderation/{id}"))
        .bearer_auth(admin_token)
        .send()
        .await
        .unwrap();
    data(resp).await
}

#[tokio::test]
async fn engine_commits_locally_only_after_server_ack() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let (author_token, _) = register_author(&client, &base, "morgan").await;
    let (admin_token, admin_id) = login(&client, &base, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    // Author files a story through the plain client path.
    let mut body = draft_json("Storm closes the harbor");
    body["kind"] = json!("story");
    body["submit"] = json!(true);
    let resp = client
        .post(format!("{base}/v1/content"))
        .bearer_auth(&author_token)
        .json(&body)
        .send()
        .await
        .unwrap();
    let created: ContentItem = data(resp).await;
    let id = created.id;

    // Hydrate an engine from the fetched state, then moderate through it.
    let item = fetch_item(&client, &base, &admin_token, &id.to_string()).await;
    let backend = HttpBackend {
        client: client.clone(),
        base: base.clone(),
        author_token,
        admin_token: admin_token.clone(),
    };
    let mut engine = ModerationEngine::with_store(ContentStore::from_items([item]), backend);
    let admin = Actor::admin(admin_id);

    engine.approve(id, admin).await.unwrap();
    assert_eq!(
        engine.store().get(id).unwrap().status,
        ModerationStatus::Approved
    );
    let server_side = fetch_item(&client, &base, &admin_token, &id.to_string()).await;
    assert_eq!(server_side.status, ModerationStatus::Approved);

    engine.toggle_trending(id, admin).await.unwrap();
    assert!(engine.store().get(id).unwrap().trending);
    let server_side = fetch_item(&client, &base, &admin_token, &id.to_string()).await;
    assert!(server_side.trending);
}

#[tokio::test]
async fn server_refusal_leaves_the_engine_store_untouched() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let (author_token, author_id) = register_author(&client, &base, "quinn").await;
    let (admin_token, admin_id) = login(&client, &base, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    // An item the server has never heard of: locally legal, remotely 404.
    let mut phantom = ContentItem::from_draft(
        author_id,
        ContentDraft {
            kind: ContentKind::Article,
            title: "Ghost item".to_string(),
            body: "Only exists client-side.".to_string(),
            category: "local".to_string(),
            region: "us".to_string(),
            summary: None,
            cover_image: None,
        },
        chrono::Utc::now(),
    );
    phantom.status = ModerationStatus::Pending;
    let id = phantom.id;

    let backend = HttpBackend {
        client: client.clone(),
        base: base.clone(),
        author_token,
        admin_token,
    };
    let mut engine = ModerationEngine::with_store(ContentStore::from_items([phantom]), backend);

    let err = engine.approve(id, Actor::admin(admin_id)).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Backend(BackendError::Rejected(_))
    ));
    assert_eq!(
        engine.store().get(id).unwrap().status,
        ModerationStatus::Pending
    );
    assert!(engine.last_request().unwrap().is_err());
}
