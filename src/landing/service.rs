use sea_orm::DatabaseConnection;
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{error, info};

use super::response::{self, PAGE_NOT_FOUND_HTML};
use crate::db::entities::landing_page;
use crate::db::enums::HitKind;
use crate::db::services::{self, LeadOutcome};
use crate::notifications::service::NotificationService;

/// Runs one landing request end to end. Every failure past code resolution
/// is logged and swallowed; the caller always gets a body back.
pub struct LandingService {
    db: DatabaseConnection,
    notifications: Arc<NotificationService>,
}

impl LandingService {
    pub fn new(db: DatabaseConnection, notifications: Arc<NotificationService>) -> Self {
        Self { db, notifications }
    }

    /// GET: records a view and returns the page markup.
    pub async fn view(&self, code: &str) -> String {
        let Some(page) = self.resolve(code).await else {
            return PAGE_NOT_FOUND_HTML.to_string();
        };

        if let Err(e) = services::record_visit(&self.db, page.id, HitKind::View).await {
            log_failure("Failed to record page view", &e);
        }

        response::view_body(&page.html)
    }

    /// POST: records a submission, ingests the lead, notifies the page owner
    /// and returns either the redirect URI or the acknowledged page.
    pub async fn submit(&self, code: &str, form: &[(String, String)]) -> String {
        let Some(page) = self.resolve(code).await else {
            return PAGE_NOT_FOUND_HTML.to_string();
        };

        if let Err(e) = services::record_visit(&self.db, page.id, HitKind::Submission).await {
            log_failure("Failed to record page submission", &e);
        }

        match services::ingest_lead(&self.db, &page, form).await {
            Ok(LeadOutcome::Created(lead)) => {
                self.notifications
                    .notify_lead(page.notify_email.as_deref(), &page.title, &lead.captured)
                    .await;
            }
            Ok(LeadOutcome::Duplicate { .. }) => {}
            Err(e) => log_failure("Failed to ingest lead", &e),
        }

        response::submit_body(&page.html, page.redirect_uri.as_deref())
    }

    async fn resolve(&self, code: &str) -> Option<landing_page::Model> {
        match services::resolve_page(&self.db, code).await {
            Ok(Some(page)) => Some(page),
            Ok(None) => {
                info!(code, "No landing page for code.");
                None
            }
            Err(e) => {
                log_failure("Failed to resolve landing page", &e);
                None
            }
        }
    }
}

fn log_failure(context: &str, err: &(dyn StdError + 'static)) {
    error!(error = %err, "{context}");
    let mut source = err.source();
    while let Some(cause) = source {
        error!(cause = %cause, "{context}: caused by");
        source = cause.source();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::{card, contact, landing_hit, stage};
    use crate::db::test_support::*;
    use crate::landing::response::{ACK_SCRIPT, UNDER_CONSTRUCTION_HTML};
    use crate::notifications::senders::recording::RecordingMailSender;
    use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Set};

    fn landing(db: &DatabaseConnection, recorder: &RecordingMailSender) -> LandingService {
        let notifications = NotificationService::new(Some(Arc::new(recorder.clone())));
        LandingService::new(db.clone(), Arc::new(notifications))
    }

    async fn reload(db: &DatabaseConnection, id: i32) -> landing_page::Model {
        landing_page::Entity::find_by_id(id).one(db).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_view_returns_html_and_counts_once() {
        let db = memory_db().await;
        let page = seed_page(&db, "AB", |p| p.html = Set("<h1>Promo</h1>".into())).await;
        let service = landing(&db, &RecordingMailSender::default());

        assert_eq!(service.view("AB").await, "<h1>Promo</h1>");

        assert_eq!(reload(&db, page.id).await.page_views, 1);
        let hits = landing_hit::Entity::find().all(&db).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, HitKind::View);
        assert_eq!(hits[0].page_id, page.id);
    }

    #[tokio::test]
    async fn test_view_empty_page_shows_placeholder() {
        let db = memory_db().await;
        seed_page(&db, "abcde", |p| p.html = Set(String::new())).await;
        let service = landing(&db, &RecordingMailSender::default());

        assert_eq!(service.view("abcde").await, UNDER_CONSTRUCTION_HTML);
    }

    #[tokio::test]
    async fn test_unknown_code_writes_no_hit() {
        let db = memory_db().await;
        seed_page(&db, "abcde", |_| {}).await;
        let service = landing(&db, &RecordingMailSender::default());

        assert_eq!(service.view("zzzzz").await, PAGE_NOT_FOUND_HTML);
        assert_eq!(service.view("").await, PAGE_NOT_FOUND_HTML);
        assert_eq!(service.submit("zz", &form(&[("name", "x")])).await, PAGE_NOT_FOUND_HTML);
        assert_eq!(landing_hit::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(contact::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_submit_creates_lead_and_acknowledges() {
        let db = memory_db().await;
        let board = seed_board(&db).await;
        let page = seed_page(&db, "promo1", |p| p.board_id = Set(Some(board.id))).await;
        let service = landing(&db, &RecordingMailSender::default());

        let body = service
            .submit("promo1", &form(&[("name", "Ana"), ("email", "ana@example.com")]))
            .await;

        assert!(body.contains(&format!("{ACK_SCRIPT}</body>")));
        let reloaded = reload(&db, page.id).await;
        assert_eq!(reloaded.leads, 1);
        assert_eq!(reloaded.page_views, 0);
        assert_eq!(contact::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(card::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(stage::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_double_submit_creates_one_contact_and_one_mail() {
        let db = memory_db().await;
        let board = seed_board(&db).await;
        seed_page(&db, "promo1", |p| {
            p.board_id = Set(Some(board.id));
            p.notify_email = Set(Some("owner@example.com".into()));
        })
        .await;
        let recorder = RecordingMailSender::default();
        let service = landing(&db, &recorder);
        let submitted = form(&[("name", "Ana"), ("celular", "555")]);

        service.submit("promo1", &submitted).await;
        service.submit("promo1", &submitted).await;

        assert_eq!(contact::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(card::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(stage::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(recorder.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_with_redirect_returns_uri() {
        let db = memory_db().await;
        seed_page(&db, "promo1", |p| p.redirect_uri = Set(Some("https://example.com/thanks".into()))).await;
        let service = landing(&db, &RecordingMailSender::default());

        let body = service.submit("promo1", &form(&[("name", "Ana")])).await;

        assert_eq!(body, "https://example.com/thanks");
        assert!(!body.contains(ACK_SCRIPT));
    }

    #[tokio::test]
    async fn test_notification_contains_every_recognized_field() {
        let db = memory_db().await;
        seed_contact_field(&db, "Company", true).await;
        seed_page(&db, "promo1", |p| p.notify_email = Set(Some("owner@example.com".into()))).await;
        let recorder = RecordingMailSender::default();
        let service = landing(&db, &recorder);

        service
            .submit(
                "promo1",
                &form(&[
                    ("nome", "Ana"),
                    ("e-mail", "ana@example.com"),
                    ("phone_number", "555-0100"),
                    ("company", "ACME"),
                ]),
            )
            .await;

        let sent = recorder.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        for value in ["Ana", "ana@example.com", "555-0100", "ACME"] {
            assert!(sent[0].html_body.contains(value), "missing {value}");
        }
    }

    #[tokio::test]
    async fn test_no_notification_address_sends_nothing() {
        let db = memory_db().await;
        seed_page(&db, "promo1", |_| {}).await;
        let recorder = RecordingMailSender::default();
        let service = landing(&db, &recorder);

        service.submit("promo1", &form(&[("name", "Ana")])).await;

        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn test_mail_failure_does_not_change_response() {
        let db = memory_db().await;
        seed_page(&db, "promo1", |p| p.notify_email = Set(Some("owner@example.com".into()))).await;
        let service = landing(&db, &RecordingMailSender::failing());

        let body = service.submit("promo1", &form(&[("name", "Ana")])).await;

        assert!(body.contains(ACK_SCRIPT));
        assert_eq!(contact::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_view_survives_hit_recording_failure() {
        let db = memory_db().await;
        let page = seed_page(&db, "promo1", |p| p.html = Set("<h1>P</h1>".into())).await;
        db.execute_unprepared("DROP TABLE landing_hits").await.unwrap();
        let service = landing(&db, &RecordingMailSender::default());

        assert_eq!(service.view("promo1").await, "<h1>P</h1>");
        // The counter bump shares the failed transaction.
        assert_eq!(reload(&db, page.id).await.page_views, 0);
    }

    #[tokio::test]
    async fn test_submit_survives_hit_recording_failure() {
        let db = memory_db().await;
        seed_page(&db, "promo1", |p| p.notify_email = Set(Some("owner@example.com".into()))).await;
        db.execute_unprepared("DROP TABLE landing_hits").await.unwrap();
        let recorder = RecordingMailSender::default();
        let service = landing(&db, &recorder);

        let body = service.submit("promo1", &form(&[("name", "Ana")])).await;

        assert!(body.contains(ACK_SCRIPT));
        assert_eq!(contact::Entity::find().count(&db).await.unwrap(), 1);
        assert_eq!(recorder.sent().len(), 1);
    }
}
