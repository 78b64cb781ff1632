//! Static catalogs shared by tours and tourist profiles.
//!
//! Categories and interests deliberately share one catalog: a tourist's
//! interests are the tour categories they want recommendations for.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i32,
    pub name: &'static str,
}

pub const CATEGORIES: [CatalogEntry; 5] = [
    CatalogEntry {
        id: 1,
        name: "Nature",
    },
    CatalogEntry { id: 2, name: "Art" },
    CatalogEntry {
        id: 3,
        name: "Sport",
    },
    CatalogEntry {
        id: 4,
        name: "Shopping",
    },
    CatalogEntry { id: 5, name: "Food" },
];

pub const INTERESTS: [CatalogEntry; 5] = CATEGORIES;

pub const DIFFICULTIES: [CatalogEntry; 4] = [
    CatalogEntry { id: 1, name: "Easy" },
    CatalogEntry {
        id: 2,
        name: "Moderate",
    },
    CatalogEntry { id: 3, name: "Hard" },
    CatalogEntry {
        id: 4,
        name: "Expert",
    },
];

#[must_use]
pub fn category_name(id: i32) -> Option<&'static str> {
    CATEGORIES.iter().find(|c| c.id == id).map(|c| c.name)
}

#[must_use]
pub fn difficulty_name(id: i32) -> Option<&'static str> {
    DIFFICULTIES.iter().find(|d| d.id == id).map(|d| d.name)
}

#[must_use]
pub fn is_valid_category(id: i32) -> bool {
    category_name(id).is_some()
}

#[must_use]
pub fn is_valid_difficulty(id: i32) -> bool {
    difficulty_name(id).is_some()
}

#[must_use]
pub fn is_valid_interest(id: i32) -> bool {
    INTERESTS.iter().any(|i| i.id == id)
}
