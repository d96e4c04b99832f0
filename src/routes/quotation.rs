//! Quotation page handlers

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use chrono::Utc;
use serde::Deserialize;

use crate::config::StationProfile;
use crate::error::Result;
use crate::models::Customer;
use crate::quotation::{
    load_quotation, qr_image, qr_payload, quotation_reference, table_rows, QuotationRow,
    QuotationSummary,
};
use crate::AppState;

/// Contact printed in the signature block, overriding the configured staff.
#[derive(Debug, Default, Deserialize)]
pub struct QuotationQuery {
    #[serde(default)]
    pub staff_name: Option<String>,
    #[serde(default)]
    pub staff_phone: Option<String>,
}

#[derive(Template)]
#[template(path = "quotation.html")]
pub struct QuotationTemplate {
    station: StationProfile,
    customer: Customer,
    category_label: &'static str,
    reference: String,
    issue_date: String,
    rows: Vec<QuotationRow>,
    filler_rows: Vec<usize>,
    summary: QuotationSummary,
    qr_code: String,
    staff_name: String,
    staff_phone: String,
}

struct CustomerLink {
    id: String,
    company: String,
    contact: String,
    order_count: usize,
}

#[derive(Template)]
#[template(path = "quotation_index.html")]
pub struct QuotationIndexTemplate {
    station_name: String,
    customers: Vec<CustomerLink>,
}

/// Customers that a quotation can be printed for
pub async fn index(State(state): State<AppState>) -> QuotationIndexTemplate {
    let customers = state
        .store
        .read(|d| {
            d.customers
                .iter()
                .map(|c| CustomerLink {
                    id: c.id.clone(),
                    company: c.company.clone(),
                    contact: c.name.clone(),
                    order_count: d.orders.iter().filter(|o| o.customer_id == c.id).count(),
                })
                .collect()
        })
        .await;

    QuotationIndexTemplate {
        station_name: state.config.station.name.clone(),
        customers,
    }
}

/// Printable quotation for one customer
pub async fn document(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(query): Query<QuotationQuery>,
) -> Result<Html<String>> {
    let data = load_quotation(&state, &customer_id).await?;

    let today = Utc::now().date_naive();
    let reference = quotation_reference(&data.customer.id, today);
    let qr_code = qr_image(&state, &qr_payload(&reference, &data.totals)).await?;
    let (rows, filler) = table_rows(&data.orders);

    let template = QuotationTemplate {
        station: state.config.station.clone(),
        customer: data.customer.clone(),
        category_label: data.customer.category.label(),
        reference,
        issue_date: today.format("%d %B %Y").to_string(),
        rows,
        filler_rows: (0..filler).collect(),
        summary: QuotationSummary::from(&data.totals),
        qr_code: qr_code.to_string(),
        staff_name: non_blank(query.staff_name).unwrap_or_else(|| state.config.staff_name.clone()),
        staff_phone: non_blank(query.staff_phone)
            .unwrap_or_else(|| state.config.staff_phone.clone()),
    };

    Ok(Html(template.render()?))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, send, send_raw};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    async fn seed_order(app: &axum::Router) -> String {
        let (_, customer) = send(
            app,
            Method::POST,
            "/api/customers",
            Some(json!({ "company": "Lotus Mall", "name": "Dao", "phone": "055-999999" })),
        )
        .await;
        let customer_id = customer["id"].as_str().unwrap().to_string();
        let (_, product) = send(
            app,
            Method::POST,
            "/api/products",
            Some(json!({ "product_type": "onAir", "name": "Morning Spot", "price": "125" })),
        )
        .await;
        send(
            app,
            Method::POST,
            "/api/orders",
            Some(json!({
                "customer_id": customer_id,
                "order_type": "Produce",
                "item_id": product["id"],
                "start_date": "2024-01-01",
                "duration": { "mode": "dates", "end_date": "2024-03-20" },
                "days_of_week": [0, 1, 2, 3, 4, 5, 6],
                "payment_type": "before_airing"
            })),
        )
        .await;
        customer_id
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Ann ".to_string())), Some("Ann".to_string()));
        assert_eq!(non_blank(None), None);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_not_found() {
        let (app, _state, _dir) = app();
        let (status, _) = send_raw(&app, Method::GET, "/quotation/CUST-missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_quotation_document() {
        let (app, state, _dir) = app();
        let customer_id = seed_order(&app).await;

        let (status, bytes) = send_raw(
            &app,
            Method::GET,
            &format!("/quotation/{}?staff_name=Somchai", customer_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("Lotus Mall"));
        assert!(html.contains("Morning Spot"));
        assert!(html.contains("8,132.00"));
        assert!(html.contains("Somchai"));
        assert!(html.contains(&state.config.staff_phone));
        assert!(html.contains("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_quotation_index_lists_customers() {
        let (app, _state, _dir) = app();
        let customer_id = seed_order(&app).await;

        let (status, bytes) = send_raw(&app, Method::GET, "/quotation", None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains(&customer_id));
        assert!(html.contains("Lotus Mall"));
    }
}
