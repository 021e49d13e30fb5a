use super::{CartItem, PersistentVec, Storage};
use crate::{CheckoutError, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const ORDERS_KEY: &str = "toy-orders";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Обрабатывается",
            OrderStatus::Shipped => "Отправлен",
            OrderStatus::Delivered => "Доставлен",
            OrderStatus::Cancelled => "Отменён",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Sbp,
    Cash,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Банковская карта",
            PaymentMethod::Sbp => "СБП",
            PaymentMethod::Cash => "Наличные при получении",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    /// Every field must be non-blank; reports the first one that is not.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| Err(CheckoutError::MissingField(field)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub date: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub total: u64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub customer_info: CustomerInfo,
}

/// Order history, newest first.
pub struct OrderStore {
    inner: PersistentVec<Order>,
}

impl OrderStore {
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistentVec::open(storage, ORDERS_KEY, Vec::new)?,
        })
    }

    pub fn orders(&self) -> &[Order] {
        self.inner.items()
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders().iter().find(|o| o.id == id)
    }

    /// Records a new order in `Processing` state.
    pub fn place(
        &mut self,
        items: Vec<CartItem>,
        total: u64,
        payment_method: PaymentMethod,
        customer_info: CustomerInfo,
    ) -> Result<Order, StoreError> {
        let date = Utc::now();
        let mut stamp = date.timestamp_millis();
        while self.get(&format!("ORDER-{stamp}")).is_some() {
            stamp += 1;
        }
        let order = Order {
            id: format!("ORDER-{stamp}"),
            date,
            items,
            total,
            status: OrderStatus::Processing,
            payment_method,
            customer_info,
        };
        self.inner.update(|orders| orders.insert(0, order.clone()))?;
        Ok(order)
    }

    /// Drops an order that must not outlive a failed checkout.
    pub(crate) fn discard(&mut self, id: &str) -> Result<(), StoreError> {
        self.inner.update(|orders| orders.retain(|o| o.id != id))
    }

    /// Returns whether an order with this id exists.
    pub fn update_status(&mut self, id: &str, status: OrderStatus) -> Result<bool, StoreError> {
        self.inner
            .update(|orders| match orders.iter_mut().find(|o| o.id == id) {
                Some(order) => {
                    order.status = status;
                    true
                }
                None => false,
            })
    }
}
