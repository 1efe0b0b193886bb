//! Criterion benchmarks for bridge message decoding.
//!
//! Decoding runs on the host's UI-adjacent thread for every message the page
//! posts, so each channel decoder is measured on a representative body.
//!
//! Run with:
//! ```bash
//! cargo bench --package checkout-core --bench decode_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use checkout_core::{decode_message, BridgeMessage};

// ── Message fixtures ──────────────────────────────────────────────────────────

fn make_pixel() -> BridgeMessage {
    BridgeMessage::new(
        "pixel-analytics",
        r#"{"name":"checkout_started","event":{"type":"standard","id":"sh-1","name":"checkout_started","timestamp":"2023-12-20T16:39:23+0000","context":{"navigator":{"language":"en-GB"}},"data":{"checkout":{"currencyCode":"GBP","order":{"id":"123"},"totalPrice":{"amount":13.99,"currencyCode":"GBP"},"lineItems":[{"id":"1","quantity":1,"title":"The Box"}]}}}}"#,
    )
}

fn make_custom_pixel() -> BridgeMessage {
    BridgeMessage::new(
        "pixel-analytics",
        r#"{"name":"wishlist_add","event":{"type":"custom","id":"sh-2","timestamp":"2023-12-20T16:39:23+0000","customData":{"sku":"BOX-1","list":"default"}}}"#,
    )
}

fn make_error() -> BridgeMessage {
    BridgeMessage::new(
        "error",
        r#"[{"group":"expired","reason":"Checkout has expired","code":"cart_completed"}]"#,
    )
}

fn make_legacy_completed() -> BridgeMessage {
    BridgeMessage::new(
        "completed",
        r#"{"orderDetails":{"id":"gid://shopify/OrderIdentity/9697125302294","cart":{"token":"123","lines":[{"title":"The Box","quantity":1,"price":{"amount":8,"currencyCode":"GBP"}}],"price":{"total":{"amount":13.99,"currencyCode":"GBP"}}},"email":"a.user@shopify.com","paymentMethods":[{"type":"wallet","details":{"name":"SHOP_PAY"}}]}}"#,
    )
}

fn make_current_completed() -> BridgeMessage {
    BridgeMessage::new(
        "completed",
        r#"{"orderConfirmation":{"order":{"id":"order-123"},"number":"1001","isFirstOrder":false},"cart":{"id":"cart-456","lines":[{"id":"l1","quantity":1,"merchandise":{"id":"v1","title":"Mug","product":{"id":"p1","title":"Mug"}},"cost":{"amountPerQuantity":{"amount":"10.00","currencyCode":"USD"},"subtotalAmount":{"amount":"10.00","currencyCode":"USD"},"totalAmount":{"amount":"10.00","currencyCode":"USD"}}}],"cost":{"subtotalAmount":{"amount":"10.00","currencyCode":"USD"},"totalAmount":{"amount":"10.00","currencyCode":"USD"}},"buyerIdentity":{"email":"test@example.com"},"delivery":{"addresses":[]}}}"#,
    )
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_message");
    let fixtures = [
        ("standard_pixel", make_pixel()),
        ("custom_pixel", make_custom_pixel()),
        ("error", make_error()),
        ("completed_legacy", make_legacy_completed()),
        ("completed_current", make_current_completed()),
    ];

    for (name, msg) in &fixtures {
        group.bench_function(*name, |b| {
            b.iter(|| {
                let decoded = decode_message(black_box(msg));
                black_box(decoded.is_ok())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
