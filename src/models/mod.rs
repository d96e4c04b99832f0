//! Sales desk records

pub mod catalog;
pub mod customer;
pub mod order;
pub mod system;

pub use catalog::{Package, PackageForm, Product, ProductForm, ProductType, Promotion};
pub use customer::{Customer, CustomerForm, PotentialLevel};
pub use order::{Order, OrderKind, OrderTotals};
pub use system::{Settings, SystemData, SNAPSHOT_VERSION};

/// New record id with a type prefix, e.g. `CUST-3f2a...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
