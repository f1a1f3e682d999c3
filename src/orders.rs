//! The admin's working copy of the order list.
//!
//! Status changes are applied here first and confirmed remotely afterwards; when the
//! remote call is rejected the board is replaced wholesale from a fresh fetch.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DashboardMetrics, Order, OrderStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBoard {
    orders: Vec<Order>,
}

impl OrderBoard {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn replace(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    pub fn find(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Returns false when the board does not hold the order.
    pub fn apply_status(&mut self, id: &str, status: OrderStatus) -> bool {
        match self.orders.iter_mut().find(|order| order.id == id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    /// Search matches buyer name, email, CPF or order id.
    pub fn filtered(&self, status: Option<OrderStatus>, search: Option<&str>) -> Vec<Order> {
        let query = search
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.orders
            .iter()
            .filter(|order| status.is_none_or(|status| order.status == status))
            .filter(|order| match &query {
                Some(q) => {
                    order.buyer.name.to_lowercase().contains(q)
                        || order.buyer.email.to_lowercase().contains(q)
                        || order.buyer.cpf.contains(q.as_str())
                        || order.id.to_lowercase().contains(q)
                }
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Revenue figures computed from the orders on the board.
    pub fn summary(&self) -> DashboardMetrics {
        let total_revenue = self
            .orders
            .iter()
            .fold(Decimal::ZERO, |sum, order| sum.saturating_add(order.total));
        let total_orders = self.orders.len() as u64;
        let avg_ticket = if total_orders > 0 {
            (total_revenue / Decimal::from(total_orders))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };

        let status_counts: BTreeMap<String, u64> = OrderStatus::ALL
            .iter()
            .map(|status| {
                let count = self
                    .orders
                    .iter()
                    .filter(|order| order.status == *status)
                    .count() as u64;
                (status.label().to_string(), count)
            })
            .collect();
        let pending_orders = status_counts
            .get(OrderStatus::Pending.label())
            .copied()
            .unwrap_or_default();

        DashboardMetrics {
            total_revenue,
            total_orders,
            avg_ticket,
            pending_orders,
            status_counts,
        }
    }
}
