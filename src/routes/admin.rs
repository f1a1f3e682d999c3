use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{get, patch, post, put},
};

use crate::{
    dto::{
        admin::{
            CategoryForm, LoginRequest, OrderList, OrderListQuery, ProductForm, SubcategoryForm,
            SubcategoryList, SubcategoryQuery, UpdateOrderStatusRequest,
        },
        catalog::{CategoryTree, ProductList},
    },
    error::{AppError, AppResult},
    middleware::{auth::AdminSession, session::SessionId},
    models::{AdminUser, Category, DashboardMetrics, Order, Product, Subcategory, UploadedImage},
    response::ApiResponse,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", put(update_category).delete(delete_category))
        .route("/subcategories", get(list_subcategories).post(create_subcategory))
        .route(
            "/subcategories/{id}",
            put(update_subcategory).delete(delete_subcategory),
        )
        .route("/orders", get(list_orders))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/metrics", get(dashboard_metrics))
        .route("/revenue", get(revenue_summary))
        .route("/images", post(upload_image))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token stored on the session", body = ApiResponse<AdminUser>),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Missing email or password"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AdminUser>>> {
    let resp = admin_service::login(&state, session_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses(
        (status = 200, description = "Token and order board dropped; the cart is kept", body = ApiResponse<serde_json::Value>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn logout(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Json<ApiResponse<serde_json::Value>> {
    Json(admin_service::logout(&state, session_id).await)
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    responses(
        (status = 200, description = "All products", body = ApiResponse<ProductList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn list_products(admin: AdminSession) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::list_products(&admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = ProductForm,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Name or category missing"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    admin: AdminSession,
    Json(form): Json<ProductForm>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::create_product(&admin, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductForm,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, description = "Invalid product id"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    admin: AdminSession,
    Path(id): Path<String>,
    Json(form): Json<ProductForm>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::update_product(&admin, &id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_product(&admin, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/categories",
    responses(
        (status = 200, description = "Categories with subcategories", body = ApiResponse<CategoryTree>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn list_categories(admin: AdminSession) -> AppResult<Json<ApiResponse<CategoryTree>>> {
    let resp = admin_service::list_categories(&admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CategoryForm,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<Category>),
        (status = 422, description = "Name missing"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn create_category(
    admin: AdminSession,
    Json(form): Json<CategoryForm>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = admin_service::create_category(&admin, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = CategoryForm,
    responses(
        (status = 200, description = "Category renamed", body = ApiResponse<Category>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn update_category(
    admin: AdminSession,
    Path(id): Path<String>,
    Json(form): Json<CategoryForm>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = admin_service::update_category(&admin, &id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<serde_json::Value>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn delete_category(
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_category(&admin, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/subcategories",
    params(
        ("categoryId" = Option<String>, Query, description = "Only subcategories of this category")
    ),
    responses(
        (status = 200, description = "Subcategories", body = ApiResponse<SubcategoryList>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn list_subcategories(
    admin: AdminSession,
    Query(query): Query<SubcategoryQuery>,
) -> AppResult<Json<ApiResponse<SubcategoryList>>> {
    let resp = admin_service::list_subcategories(&admin, query.category_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/subcategories",
    request_body = SubcategoryForm,
    responses(
        (status = 200, description = "Subcategory created", body = ApiResponse<Subcategory>),
        (status = 422, description = "Name or category missing"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn create_subcategory(
    admin: AdminSession,
    Json(form): Json<SubcategoryForm>,
) -> AppResult<Json<ApiResponse<Subcategory>>> {
    let resp = admin_service::create_subcategory(&admin, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/subcategories/{id}",
    params(
        ("id" = String, Path, description = "Subcategory ID")
    ),
    request_body = SubcategoryForm,
    responses(
        (status = 200, description = "Subcategory updated", body = ApiResponse<Subcategory>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn update_subcategory(
    admin: AdminSession,
    Path(id): Path<String>,
    Json(form): Json<SubcategoryForm>,
) -> AppResult<Json<ApiResponse<Subcategory>>> {
    let resp = admin_service::update_subcategory(&admin, &id, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/subcategories/{id}",
    params(
        ("id" = String, Path, description = "Subcategory ID")
    ),
    responses(
        (status = 200, description = "Subcategory deleted", body = ApiResponse<serde_json::Value>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn delete_subcategory(
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_subcategory(&admin, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("status" = Option<String>, Query, description = "Filter by status label or API value"),
        ("search" = Option<String>, Query, description = "Match buyer name, email, CPF or order id")
    ),
    responses(
        (status = 200, description = "Orders, freshly loaded", body = ApiResponse<OrderList>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    admin: AdminSession,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_orders(&state, &admin, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Update order status", body = ApiResponse<Order>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::update_order_status(&state, &admin, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/metrics",
    responses(
        (status = 200, description = "Dashboard metrics from the API", body = ApiResponse<DashboardMetrics>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn dashboard_metrics(
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<DashboardMetrics>>> {
    let resp = admin_service::metrics(&admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/revenue",
    responses(
        (status = 200, description = "Revenue summary computed from the order list", body = ApiResponse<DashboardMetrics>),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn revenue_summary(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<DashboardMetrics>>> {
    let resp = admin_service::revenue(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/images",
    request_body(content_type = "multipart/form-data", description = "Image in the `file` field"),
    responses(
        (status = 200, description = "Image uploaded", body = ApiResponse<UploadedImage>),
        (status = 422, description = "No file field"),
        (status = 503, description = "Image hosting not configured"),
    ),
    security(("session_id" = [])),
    tag = "Admin"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    _admin: AdminSession,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedImage>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;

        let resp =
            admin_service::upload_image(&state, &file_name, content_type.as_deref(), bytes.to_vec())
                .await?;
        return Ok(Json(resp));
    }

    Err(AppError::Validation(vec!["file".to_string()]))
}
