//! Placement pipeline tests over a real SQLite database
//!
//! Exercises the properties the checkout core guarantees: all-or-nothing
//! placement, stock conservation, total correctness, cart preserved on any
//! failure and cleared only on success, and no oversell under concurrent
//! placements against the same product.

use rust_decimal::Decimal;
use shared::models::{
    CartLine, DeliveryMethod, LineRejection, OrderStatus, PaymentMethod, PlaceOrder,
};
use sqlx::SqlitePool;
use store_server::cart::{self, CartStore};
use store_server::checkout::{PlacementError, money, place_order, validator};
use store_server::db::DbService;
use store_server::db::repository::{ConstraintKind, RepoError, order, product};
use tempfile::TempDir;

async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("store.db");
    let db = DbService::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("open database");
    (dir, db.pool)
}

async fn seed_product(pool: &SqlitePool, id: i64, name: &str, price: f64, stock: i64) {
    sqlx::query(
        "INSERT INTO product (id, name, description, price, category, article, is_active, is_bestseller, stock_quantity, created_at) VALUES (?1, ?2, '', ?3, '', '', 1, 0, ?4, ?5)",
    )
    .bind(id)
    .bind(name)
    .bind(price)
    .bind(stock)
    .bind(shared::util::now_millis())
    .execute(pool)
    .await
    .expect("seed product");
}

/// Add a product to the given cart through the normal editing path.
async fn add_to_cart(pool: &SqlitePool, carts: &CartStore, cart_id: &str, product_id: i64, qty: i64) {
    let p = product::find_by_id(pool, product_id)
        .await
        .expect("lookup")
        .expect("product exists");
    let mut lines = carts.get(cart_id);
    cart::add_line(&mut lines, &p, qty, shared::util::now_millis()).expect("add line");
    carts.save(cart_id, lines);
}

fn checkout_request(method: DeliveryMethod) -> PlaceOrder {
    PlaceOrder {
        customer_name: "Alice Dorn".into(),
        customer_email: "alice@example.com".into(),
        customer_phone: "+7 912 345-67-89".into(),
        shipping_address: "12 Garden Street, Springfield".into(),
        delivery_method: method,
        payment_method: PaymentMethod::Card,
        comment: String::new(),
        user_id: None,
    }
}

async fn stock_of(pool: &SqlitePool, id: i64) -> i64 {
    product::find_by_id(pool, id)
        .await
        .expect("lookup")
        .expect("product exists")
        .stock_quantity
}

async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .expect("count orders")
}

async fn item_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM order_item")
        .fetch_one(pool)
        .await
        .expect("count items")
}

#[tokio::test]
async fn successful_placement_decrements_stock_and_clears_cart() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 1, "Evening Dress", 4990.0, 5).await;
    add_to_cart(&pool, &carts, "s1", 1, 2).await;

    let placed = place_order(&pool, &carts, "s1", &checkout_request(DeliveryMethod::Courier))
        .await
        .expect("placement succeeds");

    // 2 * 4990 + 300 courier fee
    assert_eq!(placed.total_amount, 10280.0);
    assert_eq!(stock_of(&pool, 1).await, 3);
    assert!(carts.get("s1").is_empty(), "cart must be cleared on success");

    let detail = order::find_detail(&pool, placed.order_id)
        .await
        .expect("confirmation lookup");
    assert_eq!(detail.order.status, OrderStatus::New);
    assert_eq!(detail.order.total_amount, 10280.0);
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].product_id, 1);
    assert_eq!(detail.items[0].quantity, 2);
    assert_eq!(detail.items[0].unit_price, 4990.0);
    assert_eq!(detail.items[0].total_price, 9980.0);
}

#[tokio::test]
async fn total_equals_item_totals_plus_delivery_fee() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 1, "Scarf", 10.99, 10).await;
    seed_product(&pool, 2, "Button", 0.01, 10).await;
    add_to_cart(&pool, &carts, "s1", 1, 3).await;
    add_to_cart(&pool, &carts, "s1", 2, 7).await;

    let placed = place_order(
        &pool,
        &carts,
        "s1",
        &checkout_request(DeliveryMethod::NationalPost),
    )
    .await
    .expect("placement succeeds");

    // 3*10.99 + 7*0.01 = 33.04, plus 200 post fee
    assert_eq!(placed.total_amount, 233.04);

    let detail = order::find_detail(&pool, placed.order_id).await.expect("detail");
    let items_sum: Decimal = detail.items.iter().map(|i| money::to_decimal(i.total_price)).sum();
    assert_eq!(
        detail.order.total_amount,
        money::to_f64(items_sum + Decimal::from(200))
    );
}

#[tokio::test]
async fn empty_cart_is_rejected_without_touching_storage() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();

    let err = place_order(&pool, &carts, "nobody", &checkout_request(DeliveryMethod::Pickup))
        .await
        .expect_err("empty cart must fail");
    assert!(matches!(err, PlacementError::EmptyCart));
    assert_eq!(order_count(&pool).await, 0);
}

#[tokio::test]
async fn stock_shortage_rejects_and_preserves_cart() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 7, "Summer Dress", 100.0, 5).await;
    add_to_cart(&pool, &carts, "s1", 7, 3).await;

    // Stock drops after the cart was filled
    product::set_stock(&pool, 7, 1).await.expect("set stock");

    let before = carts.get("s1");
    let err = place_order(&pool, &carts, "s1", &checkout_request(DeliveryMethod::Courier))
        .await
        .expect_err("short stock must fail");

    match err {
        PlacementError::StockChanged(rejections) => {
            assert_eq!(
                rejections,
                vec![LineRejection::InsufficientStock {
                    product_id: 7,
                    product_name: "Summer Dress".into(),
                    available: 1,
                }]
            );
        }
        other => panic!("expected StockChanged, got {other:?}"),
    }

    assert_eq!(carts.get("s1"), before, "cart must be preserved unchanged");
    assert_eq!(stock_of(&pool, 7).await, 1, "no decrement may stick");
    assert_eq!(order_count(&pool).await, 0);
    assert_eq!(item_count(&pool).await, 0);
}

#[tokio::test]
async fn one_bad_line_aborts_the_whole_placement() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 1, "Good Dress", 50.0, 10).await;
    seed_product(&pool, 99, "Ghost Dress", 60.0, 10).await;
    add_to_cart(&pool, &carts, "s1", 1, 2).await;
    add_to_cart(&pool, &carts, "s1", 99, 1).await;

    // Product 99 disappears from the catalog before checkout
    sqlx::query("DELETE FROM product WHERE id = 99")
        .execute(&pool)
        .await
        .expect("delete unreferenced product");

    let err = place_order(&pool, &carts, "s1", &checkout_request(DeliveryMethod::Pickup))
        .await
        .expect_err("missing product must fail");

    match err {
        PlacementError::StockChanged(rejections) => {
            assert_eq!(rejections.len(), 1);
            assert!(matches!(
                rejections[0],
                LineRejection::ProductNotFound { product_id: 99, .. }
            ));
        }
        other => panic!("expected StockChanged, got {other:?}"),
    }

    // All-or-nothing: the valid line must not leave any trace either
    assert_eq!(stock_of(&pool, 1).await, 10);
    assert_eq!(order_count(&pool).await, 0);
    assert_eq!(item_count(&pool).await, 0);
    assert_eq!(carts.get("s1").len(), 2);
}

#[tokio::test]
async fn deactivated_product_is_rejected() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 3, "Retired Dress", 80.0, 10).await;
    add_to_cart(&pool, &carts, "s1", 3, 1).await;

    sqlx::query("UPDATE product SET is_active = 0 WHERE id = 3")
        .execute(&pool)
        .await
        .expect("deactivate");

    let err = place_order(&pool, &carts, "s1", &checkout_request(DeliveryMethod::Pickup))
        .await
        .expect_err("inactive product must fail");
    match err {
        PlacementError::StockChanged(rejections) => {
            assert!(matches!(
                rejections[0],
                LineRejection::ProductInactive { product_id: 3, .. }
            ));
        }
        other => panic!("expected StockChanged, got {other:?}"),
    }
    assert_eq!(stock_of(&pool, 3).await, 10);
}

#[tokio::test]
async fn concurrent_placements_cannot_oversell_the_last_unit() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 5, "Last Dress", 120.0, 1).await;
    add_to_cart(&pool, &carts, "a", 5, 1).await;
    add_to_cart(&pool, &carts, "b", 5, 1).await;

    let req = checkout_request(DeliveryMethod::Pickup);
    let (ra, rb) = tokio::join!(
        place_order(&pool, &carts, "a", &req),
        place_order(&pool, &carts, "b", &req),
    );

    let oks = [ra.is_ok(), rb.is_ok()].iter().filter(|&&ok| ok).count();
    assert_eq!(oks, 1, "exactly one of two concurrent orders may win");

    let loser = if ra.is_ok() { rb } else { ra };
    match loser.expect_err("loser must be rejected") {
        PlacementError::StockChanged(rejections) => {
            assert_eq!(
                rejections,
                vec![LineRejection::InsufficientStock {
                    product_id: 5,
                    product_name: "Last Dress".into(),
                    available: 0,
                }]
            );
        }
        other => panic!("expected StockChanged, got {other:?}"),
    }

    assert_eq!(stock_of(&pool, 5).await, 0, "stock must never go negative");
    assert_eq!(order_count(&pool).await, 1);
}

#[tokio::test]
async fn revalidation_is_idempotent_on_unchanged_catalog() {
    let (_dir, pool) = setup_db().await;
    seed_product(&pool, 1, "Dress", 50.0, 1).await;

    let lines = vec![
        CartLine {
            id: 1,
            product_id: 1,
            product_name: "Dress".into(),
            unit_price: 50.0,
            quantity: 3,
            added_at: 0,
        },
        CartLine {
            id: 2,
            product_id: 404,
            product_name: "Gone".into(),
            unit_price: 10.0,
            quantity: 1,
            added_at: 0,
        },
    ];

    let first = validator::validate_cart(&pool, &lines).await.expect("validate");
    let second = validator::validate_cart(&pool, &lines).await.expect("validate");
    assert_eq!(first, second);
    assert_eq!(first.len(), 2, "every problem line is reported at once");
}

#[tokio::test]
async fn deleting_an_order_restores_stock() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 1, "Dress", 200.0, 5).await;
    add_to_cart(&pool, &carts, "s1", 1, 2).await;

    let placed = place_order(&pool, &carts, "s1", &checkout_request(DeliveryMethod::Courier))
        .await
        .expect("placement succeeds");
    assert_eq!(stock_of(&pool, 1).await, 3);

    order::delete_restoring_stock(&pool, placed.order_id)
        .await
        .expect("delete order");

    assert_eq!(stock_of(&pool, 1).await, 5);
    assert_eq!(order_count(&pool).await, 0);
    assert_eq!(item_count(&pool).await, 0, "items cascade with their order");

    let err = order::delete_restoring_stock(&pool, placed.order_id)
        .await
        .expect_err("second delete must miss");
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn status_update_is_the_only_order_mutation() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 1, "Dress", 200.0, 5).await;
    add_to_cart(&pool, &carts, "s1", 1, 1).await;

    let placed = place_order(&pool, &carts, "s1", &checkout_request(DeliveryMethod::Pickup))
        .await
        .expect("placement succeeds");

    order::update_status(&pool, placed.order_id, OrderStatus::Confirmed)
        .await
        .expect("status update");
    let detail = order::find_detail(&pool, placed.order_id).await.expect("detail");
    assert_eq!(detail.order.status, OrderStatus::Confirmed);
    // Everything else untouched
    assert_eq!(detail.order.total_amount, 200.0);

    let err = order::update_status(&pool, 424242, OrderStatus::Shipped)
        .await
        .expect_err("unknown order id");
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn referenced_product_cannot_be_deleted() {
    let (_dir, pool) = setup_db().await;
    let carts = CartStore::new();
    seed_product(&pool, 1, "Dress", 200.0, 5).await;
    add_to_cart(&pool, &carts, "s1", 1, 1).await;
    place_order(&pool, &carts, "s1", &checkout_request(DeliveryMethod::Pickup))
        .await
        .expect("placement succeeds");

    let err = sqlx::query("DELETE FROM product WHERE id = 1")
        .execute(&pool)
        .await
        .map(|_| ())
        .expect_err("delete must be refused while order items reference it");
    let classified = RepoError::from(err);
    assert!(matches!(
        classified,
        RepoError::Constraint(ConstraintKind::ForeignKey, _)
    ));
}

#[tokio::test]
async fn confirmation_lookup_with_unknown_id_is_not_found() {
    let (_dir, pool) = setup_db().await;
    let err = order::find_detail(&pool, 999)
        .await
        .expect_err("unknown order");
    assert!(matches!(err, RepoError::NotFound(_)));
}
