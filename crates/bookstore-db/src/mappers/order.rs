//! Order models -> entities

use std::collections::HashMap;

use bookstore_core::entities::{Order, OrderDetails, OrderItem, OrderLine};

use crate::models::{OrderItemModel, OrderLineModel, OrderModel};

impl From<OrderModel> for Order {
    fn from(model: OrderModel) -> Self {
        Order {
            id: model.id,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<OrderItemModel> for OrderItem {
    fn from(model: OrderItemModel) -> Self {
        OrderItem {
            id: model.id,
            order_id: model.order_id,
            book_id: model.book_id,
            quantity: model.quantity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<OrderLineModel> for OrderLine {
    fn from(model: OrderLineModel) -> Self {
        OrderLine {
            item: OrderItem {
                id: model.id,
                order_id: model.order_id,
                book_id: model.book_id,
                quantity: model.quantity,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
            book_title: model.book_title,
            book_price: model.book_price,
            genre_name: model.genre_name,
        }
    }
}

/// Attach lines to their orders.
///
/// Keeps the order of `orders`; lines keep their incoming order within each
/// order. Orders without lines get an empty list.
pub fn assemble_orders(orders: Vec<OrderModel>, lines: Vec<OrderLineModel>) -> Vec<OrderDetails> {
    let mut by_order: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    for line in lines {
        by_order
            .entry(line.order_id)
            .or_default()
            .push(OrderLine::from(line));
    }

    orders
        .into_iter()
        .map(|order| OrderDetails {
            lines: by_order.remove(&order.id).unwrap_or_default(),
            order: Order::from(order),
        })
        .collect()
}
