//! Categories API endpoints.

use api_types::category::{CategoryListResponse, CategoryView};
use axum::{Json, extract::State};

use crate::server::ServerState;

fn map_category(category: &engine::Category) -> CategoryView {
    CategoryView {
        name: category.name.clone(),
        is_income: category.is_income,
    }
}

pub async fn list(State(state): State<ServerState>) -> Json<CategoryListResponse> {
    let categories = state.catalog.iter().map(map_category).collect();
    Json(CategoryListResponse { categories })
}
