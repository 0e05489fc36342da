//! Plant catalog route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use paradise_nursery_core::CartStore;
use tracing::instrument;

use crate::catalog::{Catalog, Plant};
use crate::filters;
use crate::state::AppState;

/// Plant card data for templates.
#[derive(Clone)]
pub struct PlantView {
    pub name: String,
    pub image: String,
    pub description: Option<String>,
    pub cost: String,
    /// Already in the cart; the add button is disabled.
    pub in_cart: bool,
}

/// Category section data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub title: String,
    pub plants: Vec<PlantView>,
}

impl PlantView {
    fn new(plant: &Plant, cart: &CartStore) -> Self {
        Self {
            name: plant.name.clone(),
            image: plant.image.clone(),
            description: plant.description.clone(),
            cost: plant.cost.to_string(),
            in_cart: cart.contains(&plant.name),
        }
    }
}

/// Build the category views, marking plants already in the cart.
#[must_use]
pub fn category_views(catalog: &Catalog, cart: &CartStore) -> Vec<CategoryView> {
    catalog
        .categories()
        .iter()
        .map(|category| CategoryView {
            title: category.category.clone(),
            plants: category
                .plants
                .iter()
                .map(|plant| PlantView::new(plant, cart))
                .collect(),
        })
        .collect()
}

/// Plant catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "plants/index.html")]
pub struct PlantsIndexTemplate {
    pub categories: Vec<CategoryView>,
    pub cart_count: u64,
}

/// Display the plant catalog.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await;

    PlantsIndexTemplate {
        categories: category_views(state.catalog(), &cart),
        cart_count: cart.total_quantity(),
    }
}
