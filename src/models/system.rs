//! The full data snapshot and record-keeping operations on it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{Package, Product, ProductType};
use super::customer::{Customer, CustomerForm};
use super::order::{Order, OrderTotals};
use crate::error::AppError;

pub const SNAPSHOT_VERSION: &str = "4.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub last_save: Option<DateTime<Utc>>,
    pub version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_save: None,
            version: SNAPSHOT_VERSION.to_string(),
        }
    }
}

/// Every record the sales desk keeps, saved and restored as one blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemData {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub settings: Settings,
}

impl SystemData {
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn search_customers(&self, query: Option<&str>) -> Vec<Customer> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => self.customers.iter().filter(|c| c.matches(q)).cloned().collect(),
            None => self.customers.clone(),
        }
    }

    pub fn add_customer(&mut self, customer: Customer) {
        self.customers.push(customer);
    }

    /// Replace a customer's details, keeping its id and creation time.
    pub fn update_customer(&mut self, id: &str, form: CustomerForm) -> Result<Customer, AppError> {
        let existing = self
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("customer {}", id)))?;

        let updated = form.into_customer(existing.id.clone(), existing.created)?;
        *existing = updated.clone();
        Ok(updated)
    }

    /// Orders of a removed customer are kept; they still count in campaign totals.
    pub fn remove_customer(&mut self, id: &str) -> Result<Customer, AppError> {
        let index = self
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("customer {}", id)))?;
        Ok(self.customers.remove(index))
    }

    pub fn products_of_type(&self, product_type: Option<ProductType>) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| product_type.map_or(true, |t| p.product_type == t))
            .cloned()
            .collect()
    }

    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn remove_product(&mut self, id: &str) -> Result<Product, AppError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("product {}", id)))?;
        Ok(self.products.remove(index))
    }

    pub fn add_package(&mut self, package: Package) {
        self.packages.push(package);
    }

    pub fn remove_package(&mut self, id: &str) -> Result<Package, AppError> {
        let index = self
            .packages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("package {}", id)))?;
        Ok(self.packages.remove(index))
    }

    pub fn orders_for(&self, customer_id: Option<&str>) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| customer_id.map_or(true, |id| o.customer_id == id))
            .cloned()
            .collect()
    }

    pub fn add_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn remove_order(&mut self, id: &str) -> Result<Order, AppError> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| AppError::NotFound(format!("order {}", id)))?;
        Ok(self.orders.remove(index))
    }

    /// Totals over all orders, or one customer's orders.
    pub fn totals(&self, customer_id: Option<&str>) -> OrderTotals {
        OrderTotals::from_orders(
            self.orders
                .iter()
                .filter(|o| customer_id.map_or(true, |id| o.customer_id == id)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::tests::sample_order;
    use rust_decimal_macros::dec;

    fn customer_form(company: &str) -> CustomerForm {
        CustomerForm {
            company: company.to_string(),
            name: "Contact".to_string(),
            phone: "055-111111".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_customer_keeps_identity() {
        let mut data = SystemData::default();
        let created = Utc::now();
        data.add_customer(customer_form("Old Name").into_customer("c1".to_string(), created).unwrap());

        let updated = data.update_customer("c1", customer_form("New Name")).unwrap();
        assert_eq!(updated.id, "c1");
        assert_eq!(updated.created, created);
        assert_eq!(data.customers[0].company, "New Name");

        assert!(matches!(
            data.update_customer("missing", customer_form("x")),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_search_customers() {
        let mut data = SystemData::default();
        data.add_customer(customer_form("Phitsanulok Motors").into_customer("c1".to_string(), Utc::now()).unwrap());
        data.add_customer(customer_form("Sukhothai Rice").into_customer("c2".to_string(), Utc::now()).unwrap());

        assert_eq!(data.search_customers(None).len(), 2);
        assert_eq!(data.search_customers(Some("  ")).len(), 2);
        let found = data.search_customers(Some("motors"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "c1");
    }

    #[test]
    fn test_customer_and_campaign_totals() {
        let mut data = SystemData::default();
        data.add_order(sample_order("o1", "c1", dec!(100)));
        data.add_order(sample_order("o2", "c2", dec!(200)));
        data.add_order(sample_order("o3", "c1", dec!(50)));

        assert_eq!(data.totals(None).base_total, dec!(1750));
        assert_eq!(data.totals(Some("c1")).base_total, dec!(750));
        assert_eq!(data.totals(Some("c1")).order_count, 2);
        assert_eq!(data.orders_for(Some("c2")).len(), 1);

        data.remove_order("o1").unwrap();
        assert_eq!(data.totals(Some("c1")).base_total, dec!(250));
        assert!(data.remove_order("o1").is_err());
    }

    #[test]
    fn test_empty_snapshot_parses() {
        let data: SystemData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.settings.version, SNAPSHOT_VERSION);
        assert!(data.orders.is_empty());
    }
}
