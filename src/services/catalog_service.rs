use crate::{
    client::{ApiClient, ProductFilters},
    dto::catalog::{CategoryTree, ProductDetail, ProductList},
    error::{AppError, AppResult},
    models::{Category, Product, Subcategory},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    filters: ProductFilters,
) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = state
        .api
        .list_products(&filters)
        .await?
        .into_iter()
        .filter(|product| filters.matches(product))
        .collect();

    let meta = Meta::with_total(items.len());
    Ok(ApiResponse::success("OK", ProductList { items }, Some(meta)))
}

/// Looks a product up directly and falls back to scanning the full list, since not
/// every backend exposes `GET /products/{id}`.
pub async fn find_product(api: &ApiClient, id: &str) -> AppResult<Option<Product>> {
    match api.get_product(id).await {
        Ok(Some(product)) => return Ok(Some(product)),
        Ok(None) => {}
        Err(err) => tracing::debug!(product_id = id, error = %err, "direct lookup failed"),
    }

    let products = api.list_products(&ProductFilters::default()).await?;
    Ok(products.into_iter().find(|product| product.id == id))
}

pub async fn product_detail(state: &AppState, id: &str) -> AppResult<ApiResponse<ProductDetail>> {
    let (product, categories, subcategories) = tokio::try_join!(
        find_product(&state.api, id),
        async { state.api.list_categories().await.map_err(AppError::from) },
        async { state.api.list_subcategories(None).await.map_err(AppError::from) },
    )?;
    let product = product.ok_or(AppError::NotFound)?;

    let category = categories
        .into_iter()
        .find(|category| category.id == product.category_id);
    let subcategory = subcategories
        .into_iter()
        .chain(category.iter().flat_map(|c| c.subcategories.clone()))
        .find(|subcategory| subcategory.id == product.subcategory_id);

    let detail = ProductDetail {
        in_stock_colors: product.in_stock_colors(),
        product,
        category,
        subcategory,
    };
    Ok(ApiResponse::success("OK", detail, None))
}

pub async fn category_list(state: &AppState) -> AppResult<ApiResponse<CategoryTree>> {
    let (categories, subcategories) = tokio::try_join!(
        state.api.list_categories(),
        state.api.list_subcategories(None),
    )?;

    let items = category_tree(categories, &subcategories);
    let meta = Meta::with_total(items.len());
    Ok(ApiResponse::success("OK", CategoryTree { items }, Some(meta)))
}

/// Attaches the flat subcategory list to each parent, keeping any subcategories the
/// category already embedded.
pub fn category_tree(categories: Vec<Category>, subcategories: &[Subcategory]) -> Vec<Category> {
    categories
        .into_iter()
        .map(|mut category| {
            for subcategory in subcategories {
                let known = category.subcategories.iter().any(|s| s.id == subcategory.id);
                if subcategory.category_id == category.id && !known {
                    category.subcategories.push(subcategory.clone());
                }
            }
            category
        })
        .collect()
}
