use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::db::entities::{
    board_field, card, card_field_value, contact, contact_field, contact_field_value,
    landing_page, stage,
};
use crate::landing::form::{CapturedField, ContactFields, FieldLookup, FieldRef};

/// Window in which an identical submission from the same group is treated as
/// a double post.
pub const DUPLICATE_WINDOW_MINUTES: i64 = 5;

/// `last_text` stamped on every contact created from a landing page.
pub const LEAD_MARKER_TEXT: &str = "New lead captured from landing page";

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    /// An equivalent contact was created inside the duplicate window.
    Duplicate { existing_contact_id: String },
    Created(CreatedLead),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLead {
    pub contact_id: String,
    /// `None` when the page is not attached to a board.
    pub card_id: Option<i32>,
    pub captured: Vec<CapturedField>,
}

/// Turns a form post into a contact placed on the page's board.
///
/// Only the duplicate check and the contact insert are fatal. Custom field
/// value writes that fail are logged and skipped; nothing already written is
/// rolled back.
pub async fn ingest_lead(
    db: &DatabaseConnection,
    page: &landing_page::Model,
    form: &[(String, String)],
) -> Result<LeadOutcome, LeadError> {
    let fields = ContactFields::extract(form);
    let now = Utc::now();

    if let Some(existing) = find_recent_duplicate(db, page.group_id, &fields, now).await? {
        info!(
            page_id = page.id,
            contact_id = %existing.id,
            "Duplicate submission inside window. Skipping lead creation."
        );
        return Ok(LeadOutcome::Duplicate {
            existing_contact_id: existing.id,
        });
    }

    let contact = contact::ActiveModel {
        id: Set(new_contact_id(page.group_id)),
        group_id: Set(page.group_id),
        name: Set(fields.name.clone()),
        email: Set(fields.email.clone()),
        phone: Set(fields.phone.clone()),
        last_text: Set(LEAD_MARKER_TEXT.to_string()),
        first_activity: Set(now),
        last_activity: Set(now),
    }
    .insert(db)
    .await?;
    info!(page_id = page.id, contact_id = %contact.id, "Contact created from landing submission.");

    let mut captured = fields.captured();
    captured.extend(save_contact_field_values(db, page.group_id, &contact.id, form).await);

    let card_id = match page.board_id {
        Some(board_id) => {
            let stage = first_stage_or_default(db, board_id).await?;
            let card = card::ActiveModel {
                contact_id: Set(contact.id.clone()),
                stage_id: Set(stage.id),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
            debug!(card_id = card.id, stage_id = stage.id, "Card placed on board.");
            captured.extend(save_card_field_values(db, board_id, card.id, form).await);
            Some(card.id)
        }
        None => {
            warn!(page_id = page.id, "Landing page has no board. Contact was not placed on a stage.");
            None
        }
    };

    Ok(LeadOutcome::Created(CreatedLead {
        contact_id: contact.id,
        card_id,
        captured,
    }))
}

fn new_contact_id(group_id: i32) -> String {
    format!("{group_id}-{}", Uuid::new_v4())
}

async fn find_recent_duplicate(
    db: &DatabaseConnection,
    group_id: i32,
    fields: &ContactFields,
    now: chrono::DateTime<Utc>,
) -> Result<Option<contact::Model>, DbErr> {
    let window_start = now - Duration::minutes(DUPLICATE_WINDOW_MINUTES);
    contact::Entity::find()
        .filter(contact::Column::GroupId.eq(group_id))
        .filter(contact::Column::LastText.eq(LEAD_MARKER_TEXT))
        .filter(contact::Column::Name.eq(fields.name.as_str()))
        .filter(contact::Column::Phone.eq(fields.phone.as_str()))
        .filter(contact::Column::Email.eq(fields.email.as_str()))
        .filter(contact::Column::FirstActivity.gte(window_start))
        .one(db)
        .await
}

/// Lowest-position stage of the board, creating an unnamed one if the board
/// has none yet.
pub async fn first_stage_or_default(db: &DatabaseConnection, board_id: i32) -> Result<stage::Model, DbErr> {
    let existing = stage::Entity::find()
        .filter(stage::Column::BoardId.eq(board_id))
        .order_by_asc(stage::Column::Position)
        .order_by_asc(stage::Column::Id)
        .one(db)
        .await?;
    if let Some(stage) = existing {
        return Ok(stage);
    }

    info!(board_id, "Board has no stages. Creating a default one.");
    stage::ActiveModel {
        board_id: Set(board_id),
        name: Set(String::new()),
        position: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
}

async fn save_contact_field_values(
    db: &DatabaseConnection,
    group_id: i32,
    contact_id: &str,
    form: &[(String, String)],
) -> Vec<CapturedField> {
    let definitions = match contact_field::Entity::find()
        .filter(contact_field::Column::GroupId.eq(group_id))
        .filter(contact_field::Column::Enabled.eq(true))
        .order_by_asc(contact_field::Column::Id)
        .all(db)
        .await
    {
        Ok(definitions) => definitions,
        Err(e) => {
            error!(error = %e, group_id, "Failed to load contact field definitions.");
            return Vec::new();
        }
    };

    let lookup = FieldLookup::new(definitions.into_iter().map(|d| FieldRef {
        id: d.id,
        label: d.label,
    }));
    let mut captured = Vec::new();
    for hit in lookup.match_form(form) {
        let result = contact_field_value::ActiveModel {
            contact_id: Set(contact_id.to_string()),
            contact_field_id: Set(hit.field.id),
            value: Set(hit.value.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await;
        match result {
            Ok(_) => captured.push(CapturedField::new(hit.field.label.as_str(), hit.value)),
            Err(e) => error!(
                error = %e,
                contact_id,
                field_id = hit.field.id,
                "Failed to save contact field value."
            ),
        }
    }
    captured
}

async fn save_card_field_values(
    db: &DatabaseConnection,
    board_id: i32,
    card_id: i32,
    form: &[(String, String)],
) -> Vec<CapturedField> {
    let definitions = match board_field::Entity::find()
        .filter(board_field::Column::BoardId.eq(board_id))
        .filter(board_field::Column::Enabled.eq(true))
        .order_by_asc(board_field::Column::Id)
        .all(db)
        .await
    {
        Ok(definitions) => definitions,
        Err(e) => {
            error!(error = %e, board_id, "Failed to load board field definitions.");
            return Vec::new();
        }
    };

    let lookup = FieldLookup::new(definitions.into_iter().map(|d| FieldRef {
        id: d.id,
        label: d.label,
    }));
    let mut captured = Vec::new();
    for hit in lookup.match_form(form) {
        let result = card_field_value::ActiveModel {
            card_id: Set(card_id),
            board_field_id: Set(hit.field.id),
            value: Set(hit.value.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await;
        match result {
            Ok(_) => captured.push(CapturedField::new(hit.field.label.as_str(), hit.value)),
            Err(e) => error!(
                error = %e,
                card_id,
                field_id = hit.field.id,
                "Failed to save card field value."
            ),
        }
    }
    captured
}
