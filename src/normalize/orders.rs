use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};

use super::coerce::{
    field, first_field, first_string, safe_count, safe_decimal, safe_quantity, safe_string,
    try_json, unwrap_array, unwrap_object,
};
use crate::models::{Address, BuyerInfo, DashboardMetrics, Order, OrderItem, OrderItemProduct, OrderStatus};

/// Id given to orders that arrive without one.
pub const FALLBACK_ORDER_ID: &str = "PED-000";
const FALLBACK_BUYER_NAME: &str = "Cliente";
const FALLBACK_BUYER_EMAIL: &str = "-";
const FALLBACK_ITEM_NAME: &str = "Produto";

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() { default.to_string() } else { value }
}

fn normalize_address(value: &Value) -> Address {
    Address {
        street: safe_string(field(value, "street")),
        number: safe_string(field(value, "number")),
        complement: safe_string(field(value, "complement")),
        neighborhood: safe_string(field(value, "neighborhood")),
        city: safe_string(field(value, "city")),
        state: safe_string(field(value, "state")),
        cep: safe_string(field(value, "cep")),
    }
}

fn normalize_buyer(order: &Value) -> BuyerInfo {
    let customer = try_json(first_field(order, &["buyer", "customer"]), empty_object());
    let address = try_json(field(&customer, "address"), empty_object());

    let name = {
        let name = safe_string(field(&customer, "name"));
        if name.is_empty() { safe_string(field(order, "customer_name")) } else { name }
    };
    let email = {
        let email = safe_string(field(&customer, "email"));
        if email.is_empty() { safe_string(field(order, "customer_email")) } else { email }
    };

    BuyerInfo {
        name: or_default(name, FALLBACK_BUYER_NAME),
        email: or_default(email, FALLBACK_BUYER_EMAIL),
        cpf: safe_string(field(&customer, "cpf")),
        phone: safe_string(field(&customer, "phone")),
        address: normalize_address(&address),
    }
}

fn normalize_order_item(item: &Value) -> OrderItem {
    let product = field(item, "product");
    let name = product
        .map(|p| safe_string(field(p, "name")))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| first_string(item, &["title", "name"]));
    let price = product
        .and_then(|p| field(p, "price"))
        .or_else(|| first_field(item, &["unit_price", "price"]));

    OrderItem {
        product: OrderItemProduct {
            name: or_default(name, FALLBACK_ITEM_NAME),
            price: safe_decimal(price),
        },
        quantity: safe_quantity(field(item, "quantity")),
        selected_size: first_string(item, &["selectedSize", "size"]),
        selected_color: first_string(item, &["selectedColor", "color"]),
    }
}

pub fn normalize_order(value: &Value) -> Order {
    let items = try_json(field(value, "items"), Value::Array(Vec::new()));
    let created_at = first_string(value, &["createdAt", "created_at", "date"]);
    let payment_id = first_string(value, &["payment_id", "paymentId"]);

    Order {
        id: or_default(
            first_string(value, &["id", "orderId", "code", "_id"]),
            FALLBACK_ORDER_ID,
        ),
        items: unwrap_array(&items).iter().map(normalize_order_item).collect(),
        total: safe_decimal(first_field(value, &["total", "total_amount", "totalAmount"])),
        status: OrderStatus::from_api(&safe_string(field(value, "status"))),
        created_at: if created_at.is_empty() { Utc::now().to_rfc3339() } else { created_at },
        buyer: normalize_buyer(value),
        payment_id: (!payment_id.is_empty()).then_some(payment_id),
    }
}

pub fn normalize_orders(value: &Value) -> Vec<Order> {
    unwrap_array(value).iter().map(normalize_order).collect()
}

/// Status lookups answer with a bare string, `{status}`, or `{data: {status}}`.
pub fn normalize_order_status(value: &Value) -> OrderStatus {
    match value {
        Value::String(s) => OrderStatus::from_api(s),
        _ => OrderStatus::from_api(&safe_string(field(unwrap_object(value), "status"))),
    }
}

pub fn normalize_metrics(value: &Value) -> DashboardMetrics {
    let value = unwrap_object(value);

    let mut status_counts: BTreeMap<String, u64> = OrderStatus::ALL
        .iter()
        .map(|status| (status.label().to_string(), 0))
        .collect();
    if let Some(Value::Object(counts)) = first_field(value, &["statusCounts", "status_counts"]) {
        for (key, count) in counts {
            let label = OrderStatus::from_api(key).label().to_string();
            let slot = status_counts.entry(label).or_default();
            *slot = slot.saturating_add(safe_count(Some(count)));
        }
    }

    let total_revenue = safe_decimal(first_field(value, &["totalRevenue", "total_revenue"]));
    let total_orders = safe_count(first_field(value, &["totalOrders", "total_orders"]));
    let avg_ticket = match first_field(value, &["avgTicket", "avg_ticket"]) {
        Some(avg) => safe_decimal(Some(avg)),
        None if total_orders > 0 => (total_revenue / Decimal::from(total_orders))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        None => Decimal::ZERO,
    };
    let pending_orders = match first_field(value, &["pendingOrders", "pending_orders"]) {
        Some(pending) => safe_count(Some(pending)),
        None => status_counts
            .get(OrderStatus::Pending.label())
            .copied()
            .unwrap_or_default(),
    };

    DashboardMetrics {
        total_revenue,
        total_orders,
        avg_ticket,
        pending_orders,
        status_counts,
    }
}

/// Hosted-payment responses name the redirect differently across providers.
pub fn checkout_redirect_url(value: &Value) -> String {
    first_string(
        unwrap_object(value),
        &["init_point", "url", "checkoutUrl", "redirectUrl", "sandbox_init_point"],
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_round_trips_through_api_vocabulary() {
        let status = OrderStatus::parse("Entregue").unwrap_or(OrderStatus::Pending);
        let api = status.api_value();
        assert_eq!(api, "delivered");

        let back = normalize_order(&json!({"id": 1, "status": api})).status;
        assert_eq!(back.label(), "Entregue");
    }

    #[test]
    fn status_aliases_and_unknowns() {
        assert_eq!(OrderStatus::from_api("cancelled"), OrderStatus::Canceled);
        assert_eq!(OrderStatus::from_api("APPROVED"), OrderStatus::Finished);
        assert_eq!(OrderStatus::from_api("paid"), OrderStatus::Finished);
        assert_eq!(OrderStatus::from_api("shipped"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_api(""), OrderStatus::Pending);
    }

    #[test]
    fn order_with_string_encoded_buyer_and_items() {
        let order = normalize_order(&json!({
            "orderId": 77,
            "total_amount": "259.80",
            "created_at": "2026-01-02T10:00:00Z",
            "status": "finished",
            "customer": "{\"name\":\"Ana\",\"email\":\"ana@example.com\",\"cpf\":\"123\",\"address\":{\"city\":\"Recife\"}}",
            "items": "[{\"title\":\"Vestido\",\"unit_price\":129.9,\"quantity\":2,\"size\":\"M\",\"color\":\"Azul\"}]",
            "payment_id": 555
        }));

        assert_eq!(order.id, "77");
        assert_eq!(order.total, Decimal::new(25980, 2));
        assert_eq!(order.created_at, "2026-01-02T10:00:00Z");
        assert_eq!(order.status, OrderStatus::Finished);
        assert_eq!(order.buyer.name, "Ana");
        assert_eq!(order.buyer.address.city, "Recife");
        assert_eq!(order.payment_id.as_deref(), Some("555"));

        let item = &order.items[0];
        assert_eq!(item.product.name, "Vestido");
        assert_eq!(item.product.price, Decimal::new(1299, 1));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.selected_size, "M");
        assert_eq!(item.selected_color, "Azul");
    }

    #[test]
    fn order_with_object_buyer_and_cart_shaped_items() {
        let order = normalize_order(&json!({
            "id": "abc",
            "total": 100,
            "buyer": {"name": "Bruno", "email": "b@example.com"},
            "items": [{
                "product": {"name": "Camisa", "price": "100"},
                "quantity": 0,
                "selectedSize": "G",
                "selectedColor": "Preto"
            }]
        }));

        assert_eq!(order.buyer.name, "Bruno");
        assert_eq!(order.items[0].product.name, "Camisa");
        assert_eq!(order.items[0].quantity, 1);
        assert!(order.payment_id.is_none());
    }

    #[test]
    fn empty_order_uses_placeholders() {
        let order = normalize_order(&json!({"items": "{not json"}));

        assert_eq!(order.id, "PED-000");
        assert_eq!(order.buyer.name, "Cliente");
        assert_eq!(order.buyer.email, "-");
        assert!(order.items.is_empty());
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.created_at.is_empty());
    }

    #[test]
    fn customer_name_fallback_fields() {
        let order = normalize_order(&json!({
            "id": 3,
            "customer_name": "Carla",
            "customer_email": "c@example.com"
        }));
        assert_eq!(order.buyer.name, "Carla");
        assert_eq!(order.buyer.email, "c@example.com");
    }

    #[test]
    fn metrics_rekey_status_counts_to_labels() {
        let metrics = normalize_metrics(&json!({
            "data": {
                "totalRevenue": "1000.50",
                "totalOrders": 4,
                "statusCounts": {"pending": 2, "delivered": "1", "cancelled": 1}
            }
        }));

        assert_eq!(metrics.total_revenue, Decimal::new(100050, 2));
        assert_eq!(metrics.avg_ticket, Decimal::new(25013, 2));
        assert_eq!(metrics.pending_orders, 2);
        assert_eq!(metrics.status_counts.get("Pendente"), Some(&2));
        assert_eq!(metrics.status_counts.get("Entregue"), Some(&1));
        assert_eq!(metrics.status_counts.get("Cancelado"), Some(&1));
        assert_eq!(metrics.status_counts.get("Finalizado"), Some(&0));
    }

    #[test]
    fn redirect_url_from_any_known_key() {
        assert_eq!(
            checkout_redirect_url(&json!({"init_point": "https://pay.example/1"})),
            "https://pay.example/1"
        );
        assert_eq!(
            checkout_redirect_url(&json!({"data": {"checkoutUrl": "https://pay.example/2"}})),
            "https://pay.example/2"
        );
        assert_eq!(checkout_redirect_url(&json!({})), "");
    }

    #[test]
    fn order_status_lookup_shapes() {
        assert_eq!(normalize_order_status(&json!("delivered")), OrderStatus::Delivered);
        assert_eq!(normalize_order_status(&json!({"status": "canceled"})), OrderStatus::Canceled);
        assert_eq!(
            normalize_order_status(&json!({"data": {"status": "finished"}})),
            OrderStatus::Finished
        );
        assert_eq!(normalize_order_status(&json!(null)), OrderStatus::Pending);
    }
}
