//! Customer records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pricing::CustomerCategory;

/// Sales potential assigned by the account owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotentialLevel {
    #[serde(alias = "สูง")]
    High,
    #[default]
    #[serde(alias = "กลาง")]
    Medium,
    #[serde(alias = "ต่ำ")]
    Low,
}

/// An advertiser (company or agency) and its contact person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub company: String,
    #[serde(rename = "type")]
    pub category: CustomerCategory,
    /// Line of business, free text.
    #[serde(default, rename = "category")]
    pub business_category: String,
    #[serde(default)]
    pub address: String,
    pub name: String,
    #[serde(default)]
    pub position: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub potential: PotentialLevel,
    #[serde(default)]
    pub note: String,
    pub created: DateTime<Utc>,
}

/// Customer fields as entered on the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub category: CustomerCategory,
    #[serde(default)]
    pub business_category: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub potential: PotentialLevel,
    #[serde(default)]
    pub note: String,
}

impl CustomerForm {
    /// Company, contact name and phone are required.
    pub fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = [
            ("company", &self.company),
            ("name", &self.name),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "customer is missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn into_customer(self, id: String, created: DateTime<Utc>) -> Result<Customer, AppError> {
        self.validate()?;
        Ok(Customer {
            id,
            company: self.company.trim().to_string(),
            category: self.category,
            business_category: self.business_category,
            address: self.address,
            name: self.name.trim().to_string(),
            position: self.position,
            phone: self.phone.trim().to_string(),
            email: self.email,
            potential: self.potential,
            note: self.note,
            created,
        })
    }
}

impl Customer {
    /// Case-insensitive match on company or contact name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.company.to_lowercase().contains(&query) || self.name.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CustomerForm {
        CustomerForm {
            company: "Nan River Hotel".to_string(),
            name: "Somchai".to_string(),
            phone: "081-234-5678".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(form().validate().is_ok());

        let mut missing = form();
        missing.company = "  ".to_string();
        missing.phone.clear();
        let err = missing.validate().unwrap_err();
        assert!(err.to_string().contains("company, phone"));
    }

    #[test]
    fn test_search_matches_company_or_contact() {
        let customer = form().into_customer("CUST-1".to_string(), Utc::now()).unwrap();
        assert!(customer.matches("river"));
        assert!(customer.matches("SOMCHAI"));
        assert!(!customer.matches("bangkok"));
    }

    #[test]
    fn test_snapshot_field_names() {
        let json = r#"{
            "id": "CUST-1700000000000", "company": "Provincial Office",
            "type": "ราชการ", "category": "Government", "name": "Malee",
            "phone": "055-000000", "email": "", "potential": "สูง",
            "created": "2024-05-01T08:30:00.000Z"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.category, CustomerCategory::Government);
        assert_eq!(customer.business_category, "Government");
        assert_eq!(customer.potential, PotentialLevel::High);
        assert!(customer.address.is_empty());
    }
}
