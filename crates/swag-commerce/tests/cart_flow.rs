//! End-to-end cart tests against the file-backed store.

use std::fs;

use swag_cache::{FileStore, KeyValueStore};
use swag_commerce::prelude::*;
use tempfile::TempDir;

fn catalog() -> Catalog {
    Catalog::from_json(
        r#"[
            {
                "id": 1,
                "sku": "POL-001",
                "name": "Polera algodón",
                "category": "textil",
                "basePrice": 1000,
                "priceBreaks": [
                    { "minQty": 10, "price": 900 },
                    { "minQty": 50, "price": 800 }
                ],
                "stock": 300,
                "colors": ["rojo", "azul"],
                "sizes": ["S", "M", "L"]
            },
            {
                "id": 2,
                "sku": "TAZ-001",
                "name": "Taza cerámica",
                "category": "tazas",
                "basePrice": 3990,
                "stock": 40
            }
        ]"#,
    )
    .unwrap()
}

fn open_cart(dir: &TempDir) -> CartStore<KvCartPersistence<FileStore>> {
    let store = FileStore::open(dir.path().join("cart.json")).unwrap();
    CartStore::open(KvCartPersistence::new(store))
}

#[test]
fn cart_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog();
    let polera = catalog.require(ProductId::new(1)).unwrap();
    let taza = catalog.require(ProductId::new(2)).unwrap();

    {
        let mut cart = open_cart(&dir);
        let unit = effective_unit_price(polera.base_price, &polera.price_breaks, 25).unwrap();
        cart.add_item(polera, 25, VariantSelection::color("rojo").with_size("M"), Some(unit));
        cart.add_item(taza, 2, VariantSelection::none(), None);
        assert_eq!(cart.total(), Money::new(30_480));
    }

    let mut cart = open_cart(&dir);
    assert_eq!(cart.line_count(), 2);
    assert_eq!(cart.count(), 27);
    assert_eq!(cart.total(), Money::new(30_480));

    let red_m = LineKey::new(1, VariantSelection::color("rojo").with_size("M"));
    assert_eq!(cart.line(&red_m).map(|l| l.unit_price()), Some(Money::new(900)));

    cart.remove_item(&red_m);
    drop(cart);

    let cart = open_cart(&dir);
    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.items()[0].name(), "Taza cerámica");
}

#[test]
fn corrupt_file_opens_empty_and_recovers() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cart.json"), "{ this is not json").unwrap();

    let store = FileStore::open(dir.path().join("cart.json")).unwrap();
    let mut cart = CartStore::open(KvCartPersistence::new(store));
    assert!(cart.is_empty());

    let catalog = catalog();
    let taza = catalog.require(ProductId::new(2)).unwrap();
    let event = cart.add_item(taza, 3, VariantSelection::none(), None);
    assert_eq!(event.map(|e| e.to_string()), Some("Agregado: 3× Taza cerámica".to_string()));
    drop(cart);

    assert_eq!(open_cart(&dir).count(), 3);
}

#[test]
fn stored_value_uses_flat_line_records() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog();
    let polera = catalog.require(ProductId::new(1)).unwrap();

    let mut cart = open_cart(&dir);
    cart.add_item(polera, 2, VariantSelection::color("azul"), None);

    let raw = cart.persistence().store().get_raw(CART_STORAGE_KEY).unwrap().unwrap();
    let lines: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(lines[0]["sku"], "POL-001");
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["selectedColor"], "azul");
    assert_eq!(lines[0]["totalPrice"], 2000);
}

#[test]
fn checkout_from_reopened_cart() {
    let dir = TempDir::new().unwrap();
    let catalog = catalog();
    let polera = catalog.require(ProductId::new(1)).unwrap();

    {
        let mut cart = open_cart(&dir);
        cart.add_item(polera, 3, VariantSelection::size("L"), None);
    }

    let cart = open_cart(&dir);
    let order = OrderRequest::from_cart(&cart).unwrap();
    assert_eq!(order.subject(), "Pedido (3 ítems) – Total $3.000");
    assert!(order.body().contains("• Talla: L"));
}
