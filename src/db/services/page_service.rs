use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use serde::Serialize;

use crate::db::entities::{landing_hit, landing_page};
use crate::db::enums::HitKind;
use crate::landing::code::{self, CodeLookup};

// --- Code resolution ---

/// Finds the page addressed by `code`: exact match for long codes, index
/// match for short ones. Unresolvable codes are simply not found. If several
/// pages share an index the oldest one wins.
pub async fn resolve_page(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<landing_page::Model>, DbErr> {
    match code::classify(code) {
        CodeLookup::Exact(code) => {
            landing_page::Entity::find()
                .filter(landing_page::Column::Code.eq(code))
                .one(db)
                .await
        }
        CodeLookup::Index(index) => {
            landing_page::Entity::find()
                .filter(landing_page::Column::CodeIndex.eq(index))
                .order_by_asc(landing_page::Column::Id)
                .one(db)
                .await
        }
        CodeLookup::Unresolvable => Ok(None),
    }
}

// --- Visit recording ---

/// Bumps the counter matching `kind` and appends one hit, both in a single
/// transaction. The increment is done in SQL so concurrent visits do not
/// overwrite each other.
pub async fn record_visit(
    db: &DatabaseConnection,
    page_id: i32,
    kind: HitKind,
) -> Result<landing_hit::Model, DbErr> {
    let txn = db.begin().await?;

    let counter = match kind {
        HitKind::View => landing_page::Column::PageViews,
        HitKind::Submission => landing_page::Column::Leads,
    };
    let updated = landing_page::Entity::update_many()
        .col_expr(counter, Expr::col(counter).add(1))
        .filter(landing_page::Column::Id.eq(page_id))
        .exec(&txn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("landing page {page_id}")));
    }

    let hit = landing_hit::ActiveModel {
        page_id: Set(page_id),
        kind: Set(kind),
        time: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(hit)
}

/// Counts derived from the hit log rather than the stored counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
    pub views: u64,
    pub submissions: u64,
}

pub async fn page_stats(db: &DatabaseConnection, page_id: i32) -> Result<PageStats, DbErr> {
    let count_kind = |kind: HitKind| {
        landing_hit::Entity::find()
            .filter(landing_hit::Column::PageId.eq(page_id))
            .filter(landing_hit::Column::Kind.eq(kind))
            .count(db)
    };
    Ok(PageStats {
        views: count_kind(HitKind::View).await?,
        submissions: count_kind(HitKind::Submission).await?,
    })
}
