use std::sync::Arc;

use common::{CategoryId, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{CartService, CatalogService, CheckoutService, OrderDetails};
use shop_store::{InMemoryStore, Product, ShopStore};

fn order_details() -> OrderDetails {
    OrderDetails {
        full_name: "Bench User".into(),
        phone: "555-0000".into(),
        address: "1 Bench St".into(),
        city: "Benchville".into(),
        payment_method: "cod".into(),
    }
}

fn bench_add_to_cart(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = Arc::new(InMemoryStore::new());
    let product = Product::new("Widget", 1000, 1_000_000_000, 4.0, CategoryId::new());
    let product_id = product.id;
    rt.block_on(async { store.insert_product(product).await.unwrap() });
    let cart = CartService::new(store);
    let user = UserId::new();

    c.bench_function("cart/add_to_cart", |b| {
        b.iter(|| {
            rt.block_on(async {
                cart.add_to_cart(user, product_id).await.unwrap();
            });
        });
    });
}

fn bench_place_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("checkout/place_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = Arc::new(InMemoryStore::new());
                let product = Product::new("Widget", 1000, 100, 4.0, CategoryId::new());
                let product_id = product.id;
                store.insert_product(product).await.unwrap();

                let cart = CartService::new(store.clone());
                let checkout = CheckoutService::new(store);
                let user = UserId::new();

                cart.add_to_cart(user, product_id).await.unwrap();
                cart.add_to_cart(user, product_id).await.unwrap();
                checkout.place_order(user, order_details()).await.unwrap();
            });
        });
    });
}

fn bench_product_list(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = Arc::new(InMemoryStore::new());
    let catalog = CatalogService::new(store.clone());
    rt.block_on(async {
        catalog.seed_categories().await.unwrap();
        catalog.seed_demo_products().await.unwrap();
    });

    c.bench_function("catalog/product_list", |b| {
        b.iter(|| {
            rt.block_on(async {
                catalog
                    .product_list(Some("books"), Some(shop_store::ProductSort::PriceAsc))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_add_to_cart,
    bench_place_order,
    bench_product_list
);
criterion_main!(benches);
