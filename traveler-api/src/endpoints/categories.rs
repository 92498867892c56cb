use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

/// Category names the app offers for trip points. The backend catalog carries
/// many more; everything outside this list is dropped client-side.
pub const CATEGORY_NAMES: &[&str] = &[
    "tourism",
    "museum",
    "gallery",
    "park",
    "restaurant",
    "cafe",
    "bar",
    "shopping",
    "entertainment",
    "landmark",
];

pub const DEFAULT_CATEGORY_NAME: &str = "tourism";

pub fn is_allowed_category(name: &str) -> bool {
    CATEGORY_NAMES.contains(&name)
}

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListCategories;

impl ListCategories {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Request for ListCategories {
    type Data = ();
    type Response = CategoriesResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/categories".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub data: CategoriesData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesData {
    pub categories: Vec<Category>,
}
