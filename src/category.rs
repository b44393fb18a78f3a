//! The static category lookup used to decorate aggregates with display colours.
//!
//! Transactions and budgets store their category as free text. Names are
//! matched against this list by exact string equality, and any name that is
//! not in the list gets [DEFAULT_CATEGORY_COLOR].

use axum::Json;
use serde::Serialize;

/// The colour used for categories that are not in [CATEGORIES].
pub const DEFAULT_CATEGORY_COLOR: &str = "#85929E";

/// A known category and how to display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u32,
    pub name: &'static str,
    /// Hex colour code, e.g. "#FF6384".
    pub color: &'static str,
    /// Icon name understood by the client.
    pub icon: &'static str,
}

/// The fixed list of known categories.
pub static CATEGORIES: [Category; 6] = [
    Category {
        id: 1,
        name: "Food",
        color: "#FF6384",
        icon: "utensils",
    },
    Category {
        id: 2,
        name: "Travel",
        color: "#36A2EB",
        icon: "plane",
    },
    Category {
        id: 3,
        name: "Utilities",
        color: "#FFCE56",
        icon: "zap",
    },
    Category {
        id: 4,
        name: "Salary",
        color: "#4CAF50",
        icon: "briefcase",
    },
    Category {
        id: 5,
        name: "Shopping",
        color: "#A569BD",
        icon: "shopping-bag",
    },
    Category {
        id: 6,
        name: "Other",
        color: DEFAULT_CATEGORY_COLOR,
        icon: "circle",
    },
];

/// Find the known category called `name`.
pub fn find_category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.name == name)
}

/// The display colour for the category called `name`.
pub fn category_color(name: &str) -> &'static str {
    find_category(name)
        .map(|category| category.color)
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

/// A route handler that lists the known categories.
pub async fn get_categories() -> Json<&'static [Category]> {
    Json(CATEGORIES.as_slice())
}
