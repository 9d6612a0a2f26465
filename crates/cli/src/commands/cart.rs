//! `paw cart` and `paw checkout` - cart operations.

use pawstore_core::{LineId, Price, ProductId};
use pawstore_storefront::models::PaymentMethod;
use pawstore_storefront::state::Storefront;

/// Show cart contents, totals, and remaining daily capacity.
pub async fn show(store: &Storefront) {
    let cart = store.cart().lock().await;

    if cart.is_empty() {
        println!("Cart is empty");
    } else {
        println!("{:<36}  {:<40} {:>4} {:>12}", "LINE", "PRODUCT", "QTY", "TOTAL");
        for line in cart.items() {
            println!(
                "{:<36}  {:<40} {:>4} {:>12}",
                line.line_id,
                line.description,
                line.quantity,
                Price::from_amount(line.line_total()).display(),
            );
        }
        println!();
        println!("Subtotal: {}", Price::from_amount(cart.subtotal()).display());
        println!("Tax:      {}", Price::from_amount(cart.tax().await).display());
        println!("Total:    {}", Price::from_amount(cart.total().await).display());
    }

    // Negative capacity means the cap shrank after items were added;
    // display clamps to zero.
    let remaining = cart.remaining_capacity_today().await.max(0);
    println!("You can add {remaining} more item(s) today");
}

/// Add a product to the cart by catalog ID.
pub async fn add(
    store: &Storefront,
    product_id: ProductId,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = store.backend().product(product_id).await?;
    store.cart().lock().await.add_item(&product, quantity).await;
    Ok(())
}

/// Change a line's quantity (0 removes it).
pub async fn update(store: &Storefront, line_id: LineId, quantity: u32) {
    store.cart().lock().await.update_quantity(line_id, quantity).await;
}

/// Remove a line.
pub async fn remove(store: &Storefront, line_id: LineId) {
    store.cart().lock().await.remove_item(line_id);
}

/// Empty the cart.
pub async fn clear(store: &Storefront) {
    store.cart().lock().await.remove_all();
}

/// Place an order from the current cart.
pub async fn checkout(
    store: &Storefront,
    payment: PaymentMethod,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = store.place_order(payment).await?;
    println!(
        "Order #{} ({}) - {}",
        summary.id,
        summary.status,
        Price::from_amount(summary.total).display(),
    );
    Ok(())
}
