use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::{CartLineView, CartNotice, CartView},
    client::ProductFilters,
    dto::{
        admin::{
            CategoryForm, LoginRequest, OrderList, OrderListQuery, ProductForm, SubcategoryForm,
            SubcategoryList, SubcategoryQuery, UpdateOrderStatusRequest,
        },
        cart::{AddCartItemRequest, CartResponse, RemoveCartItemRequest, UpdateCartItemRequest},
        catalog::{CategoryTree, ProductDetail, ProductList},
        checkout::{CheckoutRequest, CheckoutStatus, CheckoutStatusQuery, SessionCreated},
    },
    middleware::session::SESSION_HEADER,
    models::{
        Address, AdminUser, BuyerInfo, Category, CheckoutHandoff, DashboardMetrics, Order,
        OrderItem, OrderItemProduct, OrderStatus, Product, ProductColor, Subcategory,
        UploadedImage,
    },
    response::{ApiResponse, Meta},
    routes::{admin, cart, catalog, checkout, health, session},
};

struct SessionAddon;

impl Modify for SessionAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_id",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(SESSION_HEADER))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        session::create_session,
        catalog::list_products,
        catalog::get_product,
        catalog::list_categories,
        cart::view_cart,
        cart::add_item,
        cart::update_item,
        cart::remove_item,
        cart::clear_cart,
        checkout::checkout,
        checkout::checkout_status,
        admin::login,
        admin::logout,
        admin::list_products,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::list_categories,
        admin::create_category,
        admin::update_category,
        admin::delete_category,
        admin::list_subcategories,
        admin::create_subcategory,
        admin::update_subcategory,
        admin::delete_subcategory,
        admin::list_orders,
        admin::update_order_status,
        admin::dashboard_metrics,
        admin::revenue_summary,
        admin::upload_image
    ),
    components(
        schemas(
            Product,
            ProductColor,
            Category,
            Subcategory,
            Order,
            OrderItem,
            OrderItemProduct,
            OrderStatus,
            BuyerInfo,
            Address,
            AdminUser,
            DashboardMetrics,
            CheckoutHandoff,
            UploadedImage,
            CartView,
            CartLineView,
            CartNotice,
            ProductFilters,
            AddCartItemRequest,
            UpdateCartItemRequest,
            RemoveCartItemRequest,
            CartResponse,
            ProductList,
            ProductDetail,
            CategoryTree,
            SessionCreated,
            CheckoutRequest,
            CheckoutStatusQuery,
            CheckoutStatus,
            LoginRequest,
            ProductForm,
            CategoryForm,
            SubcategoryForm,
            SubcategoryQuery,
            UpdateOrderStatusRequest,
            OrderListQuery,
            OrderList,
            SubcategoryList,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartResponse>,
            ApiResponse<OrderList>,
            ApiResponse<Order>
        )
    ),
    modifiers(&SessionAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Session", description = "Storefront sessions"),
        (name = "Catalog", description = "Product and category browsing"),
        (name = "Cart", description = "Session cart"),
        (name = "Checkout", description = "Order placement and payment handoff"),
        (name = "Admin", description = "Admin console endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
