mod common;

use rust_decimal::Decimal;
use serde_json::json;
use storefront_gateway::{
    dto::admin::{LoginRequest, OrderListQuery, ProductForm, UpdateOrderStatusRequest},
    error::AppError,
    middleware::auth::AdminSession,
    models::OrderStatus,
    services::admin_service,
    state::AppState,
};

fn seeded_orders() -> Vec<serde_json::Value> {
    vec![
        json!({"id": "A1", "total": 100, "status": "pending",
               "buyer": {"name": "Ana Souza", "email": "ana@example.com", "cpf": "111"}}),
        json!({"id": "B2", "total": "200.50", "status": "delivered",
               "customer": "{\"name\":\"Bruno\",\"email\":\"bruno@example.com\"}"}),
    ]
}

async fn signed_in(state: &AppState) -> AdminSession {
    let session_id = state.sessions.create().await;
    admin_service::login(
        state,
        session_id,
        LoginRequest {
            email: "admin@loja.com".into(),
            password: "secret".into(),
        },
    )
    .await
    .unwrap();

    let token = state.sessions.read(session_id, |s| s.token.clone()).await;
    AdminSession {
        session_id,
        api: state.api_with(token),
    }
}

fn status(value: &str) -> UpdateOrderStatusRequest {
    UpdateOrderStatusRequest {
        status: value.into(),
        payment_id: None,
    }
}

#[tokio::test]
async fn login_stores_token_and_logout_drops_it() {
    let (state, _upstream) = common::gateway().await;
    let session_id = state.sessions.create().await;

    let user = admin_service::login(
        &state,
        session_id,
        LoginRequest {
            email: " admin@loja.com ".into(),
            password: "secret".into(),
        },
    )
    .await
    .unwrap()
    .data
    .unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.email, "admin@loja.com");
    assert_eq!(
        state.sessions.read(session_id, |s| s.token.clone()).await.as_deref(),
        Some("tok-admin")
    );

    admin_service::logout(&state, session_id).await;
    assert!(state.sessions.read(session_id, |s| s.token.is_none()).await);
}

#[tokio::test]
async fn wrong_password_surfaces_upstream_message() {
    let (state, _upstream) = common::gateway().await;
    let session_id = state.sessions.create().await;

    let err = admin_service::login(
        &state,
        session_id,
        LoginRequest {
            email: "admin@loja.com".into(),
            password: "nope".into(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Credenciais inválidas");
    assert!(state.sessions.read(session_id, |s| s.token.is_none()).await);
}

#[tokio::test]
async fn order_list_filters_by_label_and_search() -> anyhow::Result<()> {
    let (state, upstream) = common::gateway().await;
    upstream.seed_orders(seeded_orders());
    let admin = signed_in(&state).await;

    let delivered = admin_service::list_orders(
        &state,
        &admin,
        OrderListQuery {
            status: Some("Entregue".into()),
            search: None,
        },
    )
    .await?
    .data
    .unwrap()
    .items;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].buyer.name, "Bruno");
    assert_eq!(delivered[0].total, Decimal::new(20050, 2));

    let by_name = admin_service::list_orders(
        &state,
        &admin,
        OrderListQuery {
            status: None,
            search: Some("ana".into()),
        },
    )
    .await?
    .data
    .unwrap()
    .items;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "A1");

    let bad = admin_service::list_orders(
        &state,
        &admin,
        OrderListQuery {
            status: Some("shipped".into()),
            search: None,
        },
    )
    .await;
    assert!(matches!(bad, Err(AppError::BadRequest(_))));

    let auth = upstream.auth_headers.lock().unwrap().clone();
    assert!(auth.iter().all(|h| h == "Bearer tok-admin"));
    Ok(())
}

#[tokio::test]
async fn status_update_is_applied_and_confirmed() -> anyhow::Result<()> {
    let (state, upstream) = common::gateway().await;
    upstream.seed_orders(seeded_orders());
    let admin = signed_in(&state).await;
    admin_service::list_orders(&state, &admin, OrderListQuery::default()).await?;

    let resp = admin_service::update_order_status(&state, &admin, "A1", status("Finalizado")).await?;

    assert_eq!(resp.message, "Pedido A1 atualizado para Finalizado");
    assert_eq!(resp.data.map(|o| o.status), Some(OrderStatus::Finished));
    assert_eq!(
        upstream.writes_to("PATCH /orders/A1/status"),
        [json!({ "status": "finished" })]
    );
    let on_board = state
        .sessions
        .read(admin.session_id, |s| s.orders.find("A1").map(|o| o.status))
        .await;
    assert_eq!(on_board, Some(OrderStatus::Finished));
    Ok(())
}

#[tokio::test]
async fn rejected_update_reloads_the_board() -> anyhow::Result<()> {
    let (state, upstream) = common::gateway().await;
    upstream.seed_orders(seeded_orders());
    let admin = signed_in(&state).await;
    admin_service::list_orders(&state, &admin, OrderListQuery::default()).await?;

    // The server moved on since the board was loaded.
    let mut fresh = seeded_orders();
    fresh.push(json!({"id": "C3", "total": 10, "status": "canceled"}));
    upstream.seed_orders(fresh);
    *upstream.reject_status_updates.lock().unwrap() = true;

    let err = admin_service::update_order_status(&state, &admin, "A1", status("delivered"))
        .await
        .unwrap_err();

    match &err {
        AppError::Upstream(api) => assert_eq!(api.status(), Some(409)),
        other => panic!("unexpected error: {other:?}"),
    }
    let (a1, ids) = state
        .sessions
        .read(admin.session_id, |s| {
            (
                s.orders.find("A1").map(|o| o.status),
                s.orders.filtered(None, None).into_iter().map(|o| o.id).collect::<Vec<_>>(),
            )
        })
        .await;
    assert_eq!(a1, Some(OrderStatus::Pending));
    assert_eq!(ids, ["A1", "B2", "C3"]);
    Ok(())
}

#[tokio::test]
async fn invalid_status_is_rejected_before_any_change() -> anyhow::Result<()> {
    let (state, upstream) = common::gateway().await;
    upstream.seed_orders(seeded_orders());
    let admin = signed_in(&state).await;

    let err = admin_service::update_order_status(&state, &admin, "A1", status("lost"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(upstream.writes_to("PATCH /orders/A1/status").is_empty());
    Ok(())
}

#[tokio::test]
async fn metrics_and_revenue_summary() -> anyhow::Result<()> {
    let (state, upstream) = common::gateway().await;
    upstream.seed_orders(seeded_orders());
    let admin = signed_in(&state).await;

    let metrics = admin_service::metrics(&admin).await?.data.unwrap();
    assert_eq!(metrics.total_revenue, Decimal::new(30050, 2));
    assert_eq!(metrics.avg_ticket, Decimal::new(15025, 2));
    assert_eq!(metrics.pending_orders, 1);
    assert_eq!(metrics.status_counts.get("Entregue"), Some(&1));
    assert_eq!(metrics.status_counts.get("Finalizado"), Some(&0));

    let revenue = admin_service::revenue(&state, &admin).await?.data.unwrap();
    assert_eq!(revenue.total_revenue, Decimal::new(30050, 2));
    assert_eq!(revenue.total_orders, 2);
    Ok(())
}

#[tokio::test]
async fn product_update_requires_a_real_id() {
    let (state, _upstream) = common::gateway().await;
    let admin = signed_in(&state).await;
    let form = || ProductForm {
        name: "Saia".into(),
        category_id: "1".into(),
        ..ProductForm::default()
    };

    for id in ["", "  ", ":p"] {
        let err = admin_service::update_product(&admin, id, form()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)), "id {id:?}");
    }

    let missing = admin_service::create_product(&admin, ProductForm::default())
        .await
        .unwrap_err();
    match missing {
        AppError::Validation(fields) => assert_eq!(fields, ["name", "categoryId"]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn upload_without_configuration_is_unavailable() {
    let (state, _upstream) = common::gateway().await;

    let err = admin_service::upload_image(&state, "a.png", Some("image/png"), vec![1, 2, 3])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Upload(storefront_gateway::client::UploadError::NotConfigured)
    ));
}
