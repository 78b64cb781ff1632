use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownValue;
use crate::domain::tour::{
    NewTour as DomainNewTour, Tour as DomainTour, UpdateTour as DomainUpdateTour,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tours)]
/// Diesel model for [`crate::domain::tour::Tour`].
pub struct Tour {
    pub id: i32,
    pub guide_id: i32,
    pub name: String,
    pub description: String,
    pub difficulty: i32,
    pub category: i32,
    pub price: f64,
    pub date: NaiveDateTime,
    pub state: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tours)]
/// Insertable form of [`Tour`]. New tours always start in draft.
pub struct NewTour<'a> {
    pub guide_id: i32,
    pub name: &'a str,
    pub description: &'a str,
    pub difficulty: i32,
    pub category: i32,
    pub price: f64,
    pub date: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tours)]
/// Data used when updating a [`Tour`] record.
pub struct UpdateTour<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub difficulty: i32,
    pub category: i32,
    pub price: f64,
    pub date: NaiveDateTime,
    pub state: i32,
}

impl TryFrom<Tour> for DomainTour {
    type Error = UnknownValue;

    fn try_from(tour: Tour) -> Result<Self, Self::Error> {
        Ok(Self {
            id: tour.id,
            guide_id: tour.guide_id,
            name: tour.name,
            description: tour.description,
            difficulty: tour.difficulty,
            category: tour.category,
            price: tour.price,
            date: tour.date,
            state: tour.state.try_into()?,
            created_at: tour.created_at,
            updated_at: tour.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTour> for NewTour<'a> {
    fn from(tour: &'a DomainNewTour) -> Self {
        Self {
            guide_id: tour.guide_id,
            name: tour.name.as_str(),
            description: tour.description.as_str(),
            difficulty: tour.difficulty,
            category: tour.category,
            price: tour.price,
            date: tour.date,
        }
    }
}

impl<'a> From<&'a DomainUpdateTour> for UpdateTour<'a> {
    fn from(tour: &'a DomainUpdateTour) -> Self {
        Self {
            name: tour.name.as_str(),
            description: tour.description.as_str(),
            difficulty: tour.difficulty,
            category: tour.category,
            price: tour.price,
            date: tour.date,
            state: tour.state.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tour::TourState;
    use chrono::Utc;

    #[test]
    fn tour_into_domain() {
        let now = Utc::now().naive_utc();
        let db_tour = Tour {
            id: 1,
            guide_id: 2,
            name: "City walk".to_string(),
            description: "Old town".to_string(),
            difficulty: 2,
            category: 1,
            price: 25.0,
            date: now,
            state: 1,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainTour::try_from(db_tour).unwrap();
        assert_eq!(domain.state, TourState::Complete);
        assert_eq!(domain.guide_id, 2);
    }

    #[test]
    fn tour_with_unknown_state_fails() {
        let now = Utc::now().naive_utc();
        let db_tour = Tour {
            id: 1,
            guide_id: 2,
            name: String::new(),
            description: String::new(),
            difficulty: 1,
            category: 1,
            price: 0.0,
            date: now,
            state: 9,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainTour::try_from(db_tour).is_err());
    }

    #[test]
    fn from_domain_update_maps_state_code() {
        let domain = DomainUpdateTour::new(
            "Walk".to_string(),
            "Lake loop".to_string(),
            1,
            1,
            10.0,
            Utc::now().naive_utc(),
            TourState::Complete,
        );
        let update: UpdateTour = (&domain).into();
        assert_eq!(update.state, 1);
        assert_eq!(update.name, "Walk");
    }
}
