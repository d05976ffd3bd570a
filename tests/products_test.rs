use std::sync::Arc;

use resto_pos::db;
use resto_pos::domain::{ProductRepository, UpdateProductInput};
use resto_pos::infrastructure::SeaOrmProductRepository;
use resto_pos::models::{OrderItemDto, dining_table, product};
use resto_pos::services::order_service;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_table(db: &DatabaseConnection, name: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let table = dining_table::ActiveModel {
        name: Set(name.to_string()),
        status: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    dining_table::Entity::insert(table)
        .exec(db)
        .await
        .expect("Failed to create table")
        .last_insert_id
}

async fn create_product(db: &DatabaseConnection, name: &str, stock: i32) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let item = product::ActiveModel {
        name: Set(name.to_string()),
        code_product: Set(format!("CODE-{}", name)),
        price: Set(2.0),
        stock: Set(stock),
        availability: Set("In Stock".to_string()),
        status: Set("Active".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };
    product::Entity::insert(item)
        .exec(db)
        .await
        .expect("Failed to create product")
        .last_insert_id
}

async fn product_row(db: &DatabaseConnection, id: i32) -> product::Model {
    product::Entity::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .expect("product exists")
}

fn rename(name: String) -> UpdateProductInput {
    UpdateProductInput {
        name: Some(name),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_rename_keeps_order_driven_stock() {
    let db = setup_test_db().await;
    let repo = SeaOrmProductRepository::new(db.clone());
    let t = create_table(&db, "T1").await;
    let p = create_product(&db, "Espresso", 7).await;

    order_service::create_order(
        &db,
        "Alice",
        t,
        vec![OrderItemDto {
            id: None,
            product_id: p,
            quantity: 3,
        }],
    )
    .await
    .unwrap();
    assert_eq!(product_row(&db, p).await.availability, "Low Stock");

    let renamed = repo.update(p, rename("Double Espresso".into())).await.unwrap();
    assert_eq!(renamed.name, "Double Espresso");
    assert_eq!(renamed.stock, 4);
    assert_eq!(renamed.availability, "Low Stock");

    let restocked = repo
        .update(
            p,
            UpdateProductInput {
                stock: Some(40),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(restocked.stock, 40);
    assert_eq!(restocked.availability, "In Stock");
    assert_eq!(restocked.name, "Double Espresso");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_renames_never_lose_order_stock() {
    const ORDERS: i32 = 20;

    let db = setup_test_db().await;
    let repo = Arc::new(SeaOrmProductRepository::new(db.clone()));
    let p = create_product(&db, "Mocha", 1000).await;

    let mut tables = Vec::new();
    for n in 0..ORDERS {
        tables.push(create_table(&db, &format!("T{}", n)).await);
    }

    let mut orders = Vec::new();
    let mut renames = Vec::new();
    for (n, table_id) in tables.into_iter().enumerate() {
        let db = db.clone();
        orders.push(tokio::spawn(async move {
            let line = OrderItemDto {
                id: None,
                product_id: p,
                quantity: 1,
            };
            order_service::create_order(&db, "Guest", table_id, vec![line]).await
        }));

        let repo = repo.clone();
        renames.push(tokio::spawn(async move {
            repo.update(p, rename(format!("Mocha {}", n))).await
        }));
    }

    for handle in orders {
        handle.await.unwrap().expect("order should succeed");
    }
    for handle in renames {
        handle.await.unwrap().expect("rename should succeed");
    }

    assert_eq!(product_row(&db, p).await.stock, 1000 - ORDERS);
}

#[tokio::test]
async fn test_update_and_delete_of_missing_product() {
    let db = setup_test_db().await;
    let repo = SeaOrmProductRepository::new(db.clone());
    let p = create_product(&db, "Cortado", 5).await;

    repo.delete(p).await.unwrap();

    assert!(matches!(
        repo.update(p, rename("Ghost".into())).await,
        Err(resto_pos::domain::DomainError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete(p).await,
        Err(resto_pos::domain::DomainError::NotFound(_))
    ));
    assert!(repo.find_by_id(p).await.unwrap().is_none());
}
