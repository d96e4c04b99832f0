//! Sellable products and packages

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "onAir")]
    OnAir,
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "production")]
    Production,
}

impl ProductType {
    pub fn id_prefix(self) -> &'static str {
        match self {
            ProductType::OnAir => "ON",
            ProductType::Online => "ON",
            ProductType::Production => "PR",
        }
    }
}

/// Whether a product currently runs a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Promotion {
    #[default]
    #[serde(alias = "ไม่มี")]
    None,
    #[serde(alias = "มี")]
    Active,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub promotion: Promotion,
    #[serde(default)]
    pub promotion_detail: String,
    #[serde(default)]
    pub note: String,
    pub created: DateTime<Utc>,
}

/// A bundle of products sold at the sum of their prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    pub products: Vec<Product>,
    pub total_price: Decimal,
    #[serde(default)]
    pub note: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductForm {
    pub product_type: ProductType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub promotion: Promotion,
    #[serde(default)]
    pub promotion_detail: String,
    #[serde(default)]
    pub note: String,
}

impl ProductForm {
    /// Name and a non-zero price are required.
    pub fn into_product(self, id: String, created: DateTime<Utc>) -> Result<Product, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("product name is required".to_string()));
        }
        if self.price <= Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "product price must be positive, got {}",
                self.price
            )));
        }

        Ok(Product {
            id,
            product_type: self.product_type,
            name: self.name.trim().to_string(),
            price: self.price,
            promotion: self.promotion,
            promotion_detail: self.promotion_detail,
            note: self.note,
            created,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
    #[serde(default)]
    pub note: String,
}

impl PackageForm {
    /// Build a package from the catalogue, copying the chosen products.
    pub fn into_package(
        self,
        catalogue: &[Product],
        id: String,
        created: DateTime<Utc>,
    ) -> Result<Package, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("package name is required".to_string()));
        }

        let products: Vec<Product> = catalogue
            .iter()
            .filter(|p| self.product_ids.contains(&p.id))
            .cloned()
            .collect();
        if products.is_empty() {
            return Err(AppError::Validation(
                "package needs at least one existing product".to_string(),
            ));
        }

        let total_price = products.iter().map(|p| p.price).sum();

        Ok(Package {
            id,
            name: self.name.trim().to_string(),
            products,
            total_price,
            note: self.note,
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: &str, price: Decimal) -> Product {
        Product {
            id: id.to_string(),
            product_type: ProductType::OnAir,
            name: format!("Spot {}", id),
            price,
            promotion: Promotion::None,
            promotion_detail: String::new(),
            note: String::new(),
            created: Utc::now(),
        }
    }

    #[test]
    fn test_product_requires_positive_price() {
        let form = ProductForm {
            product_type: ProductType::Online,
            name: "Facebook live mention".to_string(),
            price: dec!(0),
            promotion: Promotion::None,
            promotion_detail: String::new(),
            note: String::new(),
        };
        assert!(matches!(
            form.into_product("ON-1".to_string(), Utc::now()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_package_sums_selected_products() {
        let catalogue = vec![
            product("a", dec!(1500)),
            product("b", dec!(250.50)),
            product("c", dec!(999)),
        ];
        let form = PackageForm {
            name: "Songkran bundle".to_string(),
            product_ids: vec!["a".to_string(), "b".to_string(), "missing".to_string()],
            note: String::new(),
        };

        let package = form.into_package(&catalogue, "PKG-1".to_string(), Utc::now()).unwrap();
        assert_eq!(package.products.len(), 2);
        assert_eq!(package.total_price, dec!(1750.50));
    }

    #[test]
    fn test_package_rejects_empty_selection() {
        let form = PackageForm {
            name: "Empty".to_string(),
            product_ids: vec!["nope".to_string()],
            note: String::new(),
        };
        assert!(form.into_package(&[], "PKG-2".to_string(), Utc::now()).is_err());
    }

    #[test]
    fn test_product_snapshot_format() {
        let json = r#"{
            "id": "ON-1", "type": "onAir", "name": "30s spot", "price": 800,
            "promotion": "มี", "promotionDetail": "buy 10 get 2",
            "created": "2024-01-01T00:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_type, ProductType::OnAir);
        assert_eq!(product.price, dec!(800));
        assert_eq!(product.promotion, Promotion::Active);
    }
}
