//! End-to-end checkout flow.

use rust_decimal::Decimal;

use feira_core::ProductId;
use feira_integration_tests::TestContext;
use feira_storefront::cart::NewLineItem;
use feira_storefront::checkout::{CheckoutError, ShippingDetails, place_order};

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

fn details() -> ShippingDetails {
    ShippingDetails {
        name: "Ana Souza".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: "+55 11 91234-5678".to_owned(),
        address: "Rua das Flores, 123".to_owned(),
        city: "São Paulo".to_owned(),
        state: "SP".to_owned(),
        zip_code: "01310-100".to_owned(),
    }
}

fn fill_cart(ctx: &TestContext) {
    for id in ["basket", "mug", "mug"] {
        let id = ProductId::new(id);
        let product = ctx.state.catalog().product(&id).expect("fixture product");
        ctx.state
            .cart()
            .add(NewLineItem::from(product))
            .expect("add");
    }
}

#[test]
fn test_order_snapshots_cart_and_empties_it() {
    let ctx = TestContext::new();
    fill_cart(&ctx);

    let order = place_order(ctx.state.cart(), details()).expect("place order");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total, dec("59.90"));
    assert_eq!(order.contact.as_str(), "ana@example.com");

    // The cart is gone for this process and for any later one.
    assert!(ctx.state.cart().items().is_empty());
    assert!(ctx.reopen().cart().items().is_empty());
}

#[test]
fn test_cannot_check_out_an_empty_cart() {
    let ctx = TestContext::new();
    assert!(matches!(
        place_order(ctx.state.cart(), details()),
        Err(CheckoutError::EmptyCart)
    ));
}

#[test]
fn test_invalid_details_leave_cart_intact() {
    let ctx = TestContext::new();
    fill_cart(&ctx);

    let mut bad = details();
    bad.email = "ana-at-example".to_owned();
    assert!(matches!(
        place_order(ctx.state.cart(), bad),
        Err(CheckoutError::InvalidDetails(_))
    ));
    assert_eq!(ctx.state.cart().items().len(), 2);
}

#[test]
fn test_order_placement_fires_the_change_signal() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let ctx = TestContext::new();
    fill_cart(&ctx);

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    ctx.state.cart().subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    place_order(ctx.state.cart(), details()).expect("place order");
    // Exactly the clear's signal: the cart badge empties on checkout.
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}
