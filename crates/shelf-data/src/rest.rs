//! REST implementation of the backend contract.
//!
//! Talks to the store's REST API: `book/all`, `payments/create`,
//! `orders/create?userId=`, `payments/user/{id}`. The wire format is the
//! backend's camelCase JSON with decimal rand amounts; everything is
//! converted to domain types (cents-based [`Money`], newtype IDs) at this
//! boundary.

use crate::api::BookstoreApi;
use crate::error::FetchError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shelf_commerce::catalog::Book;
use shelf_commerce::checkout::{
    NewPayment, OrderDraft, PaymentRecord, PaymentStatus, PlacedOrder,
};
use shelf_commerce::ids::{BookId, CustomerId, OrderId, PaymentId};
use shelf_commerce::money::{Currency, Money};
use std::time::Duration;

/// Configuration for the REST backend client.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Create a config with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// REST client for the store backend.
#[derive(Debug, Clone)]
pub struct RestBookstore {
    client: reqwest::Client,
    base_url: String,
}

impl RestBookstore {
    /// Build a client from configuration.
    pub fn new(config: StoreConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl BookstoreApi for RestBookstore {
    async fn fetch_books(&self) -> Result<Vec<Book>, FetchError> {
        let response = self.client.get(self.url("book/all")).send().await?;
        let dtos: Vec<BookDto> = Self::handle(response).await?;
        Ok(dtos.into_iter().map(BookDto::into_book).collect())
    }

    async fn create_payment(&self, payment: &NewPayment) -> Result<PaymentRecord, FetchError> {
        let body = CreatePaymentRequest {
            amount: rand_from_cents(payment.amount.amount_cents),
            status: payment.status.as_str(),
            transaction_code: &payment.transaction_code,
        };
        let response = self
            .client
            .post(self.url("payments/create"))
            .json(&body)
            .send()
            .await?;
        let created: CreatedPaymentDto = Self::handle(response).await?;

        Ok(PaymentRecord {
            id: PaymentId::new(created.id.to_string()),
            amount: payment.amount,
            status: payment.status,
            transaction_code: payment.transaction_code.clone(),
        })
    }

    async fn create_order(
        &self,
        customer: &CustomerId,
        draft: &OrderDraft,
    ) -> Result<PlacedOrder, FetchError> {
        let body = CreateOrderRequest {
            shipping_address: &draft.shipping_address,
            payment_method: draft.payment_method.as_str(),
            items: draft
                .items
                .iter()
                .map(|i| OrderLineDto {
                    book_id: i.book_id.as_str(),
                    quantity: i.quantity,
                    unit_price: rand_from_cents(i.unit_price.amount_cents),
                })
                .collect(),
            payment_id: draft.payment_id.as_str(),
        };
        let response = self
            .client
            .post(self.url(&format!("orders/create?userId={}", customer)))
            .json(&body)
            .send()
            .await?;
        let created: CreatedOrderDto = Self::handle(response).await?;

        Ok(PlacedOrder {
            order_id: OrderId::new(created.order_id.to_string()),
        })
    }

    async fn payments_for_customer(
        &self,
        customer: &CustomerId,
    ) -> Result<Vec<PaymentRecord>, FetchError> {
        let response = self
            .client
            .get(self.url(&format!("payments/user/{}", customer)))
            .send()
            .await?;
        let dtos: Vec<PaymentListDto> = Self::handle(response).await?;
        Ok(dtos.into_iter().map(PaymentListDto::into_record).collect())
    }
}

/// Convert a wire decimal rand amount to cents.
fn cents_from_rand(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert cents back to the wire decimal rand amount.
fn rand_from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

// ---- Wire DTOs ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookDto {
    book_id: i64,
    title: String,
    author: String,
    #[serde(default)]
    pages: Option<i64>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    isbn: Option<String>,
    quantity: i64,
    price: f64,
}

impl BookDto {
    fn into_book(self) -> Book {
        Book {
            id: BookId::new(self.book_id.to_string()),
            title: self.title,
            author: self.author,
            genre: self.genre,
            pages: self.pages,
            isbn: self.isbn,
            price: Money::new(cents_from_rand(self.price), Currency::ZAR),
            stock: self.quantity.max(0),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePaymentRequest<'a> {
    amount: f64,
    status: &'a str,
    transaction_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedPaymentDto {
    id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest<'a> {
    shipping_address: &'a str,
    payment_method: &'a str,
    items: Vec<OrderLineDto<'a>>,
    payment_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderLineDto<'a> {
    book_id: &'a str,
    quantity: i64,
    unit_price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedOrderDto {
    order_id: i64,
}

/// The list endpoint speaks snake_case, unlike the rest of the API.
#[derive(Debug, Deserialize)]
struct PaymentListDto {
    payment_id: String,
    amount: f64,
    status: String,
    transaction_code: String,
}

impl PaymentListDto {
    fn into_record(self) -> PaymentRecord {
        PaymentRecord {
            id: PaymentId::new(self.payment_id),
            amount: Money::new(cents_from_rand(self.amount), Currency::ZAR),
            status: PaymentStatus::from_str(&self.status).unwrap_or_default(),
            transaction_code: self.transaction_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_cents_round_trip() {
        assert_eq!(cents_from_rand(89.99), 8999);
        assert_eq!(cents_from_rand(650.0), 65000);
        assert_eq!(rand_from_cents(8999), 89.99);
    }

    #[test]
    fn test_book_dto_maps_quantity_to_stock() {
        let dto: BookDto = serde_json::from_value(serde_json::json!({
            "bookId": 7,
            "title": "The Great Gatsby",
            "author": "F. Scott Fitzgerald",
            "pages": 180,
            "genre": "Classic",
            "quantity": 2,
            "price": 199.5
        }))
        .unwrap();
        let book = dto.into_book();

        assert_eq!(book.id.as_str(), "7");
        assert_eq!(book.stock, 2);
        assert_eq!(book.price.amount_cents, 19950);
        assert_eq!(book.price.currency, Currency::ZAR);
    }

    #[test]
    fn test_book_dto_negative_quantity_clamped() {
        let dto: BookDto = serde_json::from_value(serde_json::json!({
            "bookId": 1,
            "title": "T",
            "author": "A",
            "quantity": -3,
            "price": 10.0
        }))
        .unwrap();
        assert_eq!(dto.into_book().stock, 0);
    }

    #[test]
    fn test_payment_list_dto_parses_lowercase_status() {
        let dto: PaymentListDto = serde_json::from_value(serde_json::json!({
            "payment_id": "41",
            "amount": 607.49,
            "status": "paid",
            "total": 607.49,
            "transaction_code": "TX-1724650000000"
        }))
        .unwrap();
        let record = dto.into_record();

        assert_eq!(record.status, PaymentStatus::Paid);
        assert_eq!(record.amount.amount_cents, 60749);
        assert_eq!(record.id.as_str(), "41");
    }

    #[test]
    fn test_order_request_wire_shape() {
        let body = CreateOrderRequest {
            shipping_address: "12 Long Street",
            payment_method: "Card",
            items: vec![OrderLineDto {
                book_id: "7",
                quantity: 2,
                unit_price: 199.5,
            }],
            payment_id: "41",
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["shippingAddress"], "12 Long Street");
        assert_eq!(json["paymentMethod"], "Card");
        assert_eq!(json["paymentId"], "41");
        assert_eq!(json["items"][0]["bookId"], "7");
        assert_eq!(json["items"][0]["unitPrice"], 199.5);
    }
}
