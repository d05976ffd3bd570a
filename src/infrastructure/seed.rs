//! Demo data: seating tables, payment methods and a small menu.
//! Every insert ignores rows that already exist, so seeding is repeatable.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::domain::{Availability, ProductStatus};
use crate::models::{dining_table, payment_method, product};

const DEMO_TABLES: usize = 8;

const PAYMENT_METHODS: [&str; 3] = ["Cash", "Credit Card", "E-Wallet"];

// name, code, price, stock
const PRODUCTS: [(&str, &str, f64, i32); 8] = [
    ("Coca Cola", "BEV-001", 1.99, 0),
    ("Pepsi", "BEV-002", 1.89, 120),
    ("Potato Chips", "SNK-001", 2.49, 80),
    ("Pretzels", "SNK-002", 1.79, 60),
    ("Cheesecake", "DST-001", 4.50, 5),
    ("Chicken Breast", "MEA-001", 6.99, 40),
    ("Hot Tea", "HBEV-001", 1.50, 100),
    ("Latte", "HBEV-002", 2.99, 50),
];

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = Utc::now().to_rfc3339();

    for n in 1..=DEMO_TABLES {
        let table = dining_table::ActiveModel {
            name: Set(format!("Table {}", n)),
            status: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        dining_table::Entity::insert(table)
            .on_conflict(
                OnConflict::column(dining_table::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    for name in PAYMENT_METHODS {
        let method = payment_method::ActiveModel {
            name: Set(name.to_owned()),
            status: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        payment_method::Entity::insert(method)
            .on_conflict(
                OnConflict::column(payment_method::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    for (name, code, price, stock) in PRODUCTS {
        let item = product::ActiveModel {
            name: Set(name.to_owned()),
            code_product: Set(code.to_owned()),
            price: Set(price),
            stock: Set(stock),
            availability: Set(Availability::for_stock(stock).as_str().to_owned()),
            status: Set(ProductStatus::Active.as_str().to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            deleted_at: Set(None),
            ..Default::default()
        };
        product::Entity::insert(item)
            .on_conflict(
                OnConflict::column(product::Column::CodeProduct)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
