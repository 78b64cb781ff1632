use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownValue;
use crate::domain::replacement::{
    NewTourReplacement as DomainNewTourReplacement, TourReplacement as DomainTourReplacement,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tour_replacements)]
/// Diesel model for [`crate::domain::replacement::TourReplacement`].
pub struct TourReplacement {
    pub id: i32,
    pub tour_id: i32,
    pub original_guide_id: i32,
    pub replacement_guide_id: Option<i32>,
    pub status: i32,
    pub requested_at: NaiveDateTime,
    pub accepted_at: Option<NaiveDateTime>,
    pub cancelled_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tour_replacements)]
/// Insertable form of [`TourReplacement`]. New requests always start pending.
pub struct NewTourReplacement {
    pub tour_id: i32,
    pub original_guide_id: i32,
}

impl TryFrom<TourReplacement> for DomainTourReplacement {
    type Error = UnknownValue;

    fn try_from(replacement: TourReplacement) -> Result<Self, Self::Error> {
        Ok(Self {
            id: replacement.id,
            tour_id: replacement.tour_id,
            original_guide_id: replacement.original_guide_id,
            replacement_guide_id: replacement.replacement_guide_id,
            status: replacement.status.try_into()?,
            requested_at: replacement.requested_at,
            accepted_at: replacement.accepted_at,
            cancelled_at: replacement.cancelled_at,
        })
    }
}

impl From<&DomainNewTourReplacement> for NewTourReplacement {
    fn from(replacement: &DomainNewTourReplacement) -> Self {
        Self {
            tour_id: replacement.tour_id,
            original_guide_id: replacement.original_guide_id,
        }
    }
}
