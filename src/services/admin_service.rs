use uuid::Uuid;

use crate::{
    dto::{
        admin::{
            CategoryForm, LoginRequest, OrderList, OrderListQuery, ProductForm, SubcategoryForm,
            SubcategoryList, UpdateOrderStatusRequest,
        },
        catalog::{CategoryTree, ProductList},
    },
    error::{AppError, AppResult},
    middleware::auth::AdminSession,
    models::{AdminUser, Category, DashboardMetrics, Order, OrderStatus, Product, Subcategory, UploadedImage},
    response::{ApiResponse, Meta},
    services::catalog_service::category_tree,
    state::AppState,
};

fn required_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(vec!["name".to_string()]));
    }
    Ok(name)
}

fn required_id(id: &str) -> AppResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("missing id".to_string()));
    }
    Ok(id)
}

fn deleted() -> ApiResponse<serde_json::Value> {
    ApiResponse::success("Deleted", serde_json::json!({}), Some(Meta::empty()))
}

pub async fn login(
    state: &AppState,
    session_id: Uuid,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AdminUser>> {
    let missing: Vec<String> = [("email", &payload.email), ("password", &payload.password)]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }

    let login = state
        .api
        .login(payload.email.trim(), &payload.password)
        .await?;
    if login.token.is_empty() {
        tracing::warn!(email = %payload.email.trim(), "login answered without a token");
        return Err(AppError::Unauthorized);
    }

    let user = login.user.clone();
    state
        .sessions
        .write(session_id, |s| {
            s.token = Some(login.token);
            s.user = Some(login.user);
        })
        .await;

    tracing::info!(session_id = %session_id, email = %user.email, "admin signed in");
    Ok(ApiResponse::success("Login successful", user, None))
}

pub async fn logout(state: &AppState, session_id: Uuid) -> ApiResponse<serde_json::Value> {
    state.sessions.update(session_id, |s| s.sign_out()).await;
    tracing::info!(session_id = %session_id, "admin signed out");
    ApiResponse::success("Logged out", serde_json::json!({}), Some(Meta::empty()))
}

// Products

pub async fn list_products(admin: &AdminSession) -> AppResult<ApiResponse<ProductList>> {
    let items = admin.api.list_products(&Default::default()).await?;
    let meta = Meta::with_total(items.len());
    Ok(ApiResponse::success("OK", ProductList { items }, Some(meta)))
}

pub async fn create_product(
    admin: &AdminSession,
    form: ProductForm,
) -> AppResult<ApiResponse<Product>> {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }

    let product = admin.api.create_product(&form.to_payload()).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok(ApiResponse::success("Produto criado", product, None))
}

/// Rejects ids that are empty or still hold an unresolved route placeholder.
pub async fn update_product(
    admin: &AdminSession,
    id: &str,
    form: ProductForm,
) -> AppResult<ApiResponse<Product>> {
    let id = id.trim();
    if id.is_empty() || id == ":p" {
        return Err(AppError::BadRequest(
            "Não foi possível salvar: produto sem ID válido.".to_string(),
        ));
    }
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }

    let product = admin.api.update_product(id, &form.to_payload()).await?;
    tracing::info!(product_id = %id, "product updated");
    Ok(ApiResponse::success("Produto atualizado", product, None))
}

pub async fn delete_product(
    admin: &AdminSession,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let id = required_id(id)?;
    admin.api.delete_product(id).await?;
    tracing::info!(product_id = %id, "product deleted");
    Ok(deleted())
}

// Categories

pub async fn list_categories(admin: &AdminSession) -> AppResult<ApiResponse<CategoryTree>> {
    let (categories, subcategories) = tokio::try_join!(
        admin.api.list_categories(),
        admin.api.list_subcategories(None),
    )?;
    let items = category_tree(categories, &subcategories);
    let meta = Meta::with_total(items.len());
    Ok(ApiResponse::success("OK", CategoryTree { items }, Some(meta)))
}

pub async fn create_category(
    admin: &AdminSession,
    form: CategoryForm,
) -> AppResult<ApiResponse<Category>> {
    let name = required_name(&form.name)?;
    let category = admin.api.create_category(name).await?;
    tracing::info!(category_id = %category.id, "category created");
    Ok(ApiResponse::success("Categoria criada", category, None))
}

pub async fn update_category(
    admin: &AdminSession,
    id: &str,
    form: CategoryForm,
) -> AppResult<ApiResponse<Category>> {
    let id = required_id(id)?;
    let name = required_name(&form.name)?;
    let category = admin.api.update_category(id, name).await?;
    Ok(ApiResponse::success("Categoria atualizada", category, None))
}

pub async fn delete_category(
    admin: &AdminSession,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let id = required_id(id)?;
    admin.api.delete_category(id).await?;
    tracing::info!(category_id = %id, "category deleted");
    Ok(deleted())
}

// Subcategories

pub async fn list_subcategories(
    admin: &AdminSession,
    category_id: Option<String>,
) -> AppResult<ApiResponse<SubcategoryList>> {
    let category_id = category_id.filter(|id| !id.trim().is_empty());
    let items = admin
        .api
        .list_subcategories(category_id.as_deref())
        .await?;
    let meta = Meta::with_total(items.len());
    Ok(ApiResponse::success("OK", SubcategoryList { items }, Some(meta)))
}

pub async fn create_subcategory(
    admin: &AdminSession,
    form: SubcategoryForm,
) -> AppResult<ApiResponse<Subcategory>> {
    let name = required_name(&form.name)?;
    let category_id = form
        .category_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation(vec!["categoryId".to_string()]))?;

    let subcategory = admin.api.create_subcategory(name, category_id).await?;
    Ok(ApiResponse::success("Subcategoria criada", subcategory, None))
}

pub async fn update_subcategory(
    admin: &AdminSession,
    id: &str,
    form: SubcategoryForm,
) -> AppResult<ApiResponse<Subcategory>> {
    let id = required_id(id)?;
    let name = required_name(&form.name)?;
    let category_id = form
        .category_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let subcategory = admin
        .api
        .update_subcategory(id, name, category_id)
        .await?;
    Ok(ApiResponse::success("Subcategoria atualizada", subcategory, None))
}

pub async fn delete_subcategory(
    admin: &AdminSession,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let id = required_id(id)?;
    admin.api.delete_subcategory(id).await?;
    Ok(deleted())
}

// Orders

fn parse_status(value: &str) -> AppResult<OrderStatus> {
    OrderStatus::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid status {value}")))
}

/// Reloads the session's order board from the API and returns the filtered view.
pub async fn list_orders(
    state: &AppState,
    admin: &AdminSession,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let status = match query.status.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Some(parse_status(value)?),
        _ => None,
    };

    let orders = admin.api.list_orders(None).await?;
    let items = state
        .sessions
        .write(admin.session_id, |s| {
            s.orders.replace(orders);
            s.orders.filtered(status, query.search.as_deref())
        })
        .await;

    let meta = Meta::with_total(items.len());
    Ok(ApiResponse::success("OK", OrderList { items }, Some(meta)))
}

/// Applies the new status to the board first, then confirms it with the API. A
/// rejected update reloads the whole board so it matches the server again.
pub async fn update_order_status(
    state: &AppState,
    admin: &AdminSession,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let id = required_id(id)?;
    let status = parse_status(&payload.status)?;

    let on_board = state
        .sessions
        .write(admin.session_id, |s| s.orders.apply_status(id, status))
        .await;

    if let Err(err) = admin
        .api
        .update_order_status(id, status, payload.payment_id.as_deref())
        .await
    {
        tracing::warn!(order_id = %id, error = %err, "status update rejected, reloading orders");
        match admin.api.list_orders(None).await {
            Ok(orders) => {
                state
                    .sessions
                    .write(admin.session_id, |s| s.orders.replace(orders))
                    .await;
            }
            Err(reload) => tracing::warn!(error = %reload, "order reload failed"),
        }
        return Err(err.into());
    }

    let board_copy = if on_board {
        state
            .sessions
            .read(admin.session_id, |s| s.orders.find(id).cloned())
            .await
    } else {
        None
    };
    let order = match board_copy {
        Some(order) => order,
        None => admin.api.get_order(id).await?,
    };

    tracing::info!(order_id = %id, status = %status, "order status updated");
    Ok(ApiResponse::success(
        format!("Pedido {id} atualizado para {status}"),
        order,
        None,
    ))
}

// Dashboard

pub async fn metrics(admin: &AdminSession) -> AppResult<ApiResponse<DashboardMetrics>> {
    let metrics = admin.api.dashboard_metrics().await?;
    Ok(ApiResponse::success("OK", metrics, None))
}

/// Revenue summary computed locally from a fresh order list.
pub async fn revenue(
    state: &AppState,
    admin: &AdminSession,
) -> AppResult<ApiResponse<DashboardMetrics>> {
    let orders = admin.api.list_orders(None).await?;
    let summary = state
        .sessions
        .write(admin.session_id, |s| {
            s.orders.replace(orders);
            s.orders.summary()
        })
        .await;
    Ok(ApiResponse::success("OK", summary, None))
}

pub async fn upload_image(
    state: &AppState,
    file_name: &str,
    content_type: Option<&str>,
    bytes: Vec<u8>,
) -> AppResult<ApiResponse<UploadedImage>> {
    if bytes.is_empty() {
        return Err(AppError::BadRequest("empty file".to_string()));
    }
    let image = state.uploader.upload(file_name, content_type, bytes).await?;
    Ok(ApiResponse::success("Imagem enviada", image, None))
}
