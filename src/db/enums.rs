use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What a landing hit records: a page render or a form post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    #[sea_orm(string_value = "view")]
    View,
    #[sea_orm(string_value = "submission")]
    Submission,
}

impl FromStr for HitKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(HitKind::View),
            "submission" => Ok(HitKind::Submission),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitKind::View => write!(f, "view"),
            HitKind::Submission => write!(f, "submission"),
        }
    }
}
