//! `paw orders` - order history for the signed-in account.

use pawstore_core::Price;
use pawstore_storefront::state::Storefront;

/// List past orders, newest first as served by the backend.
pub async fn list(store: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    let email = {
        let session = store.session().lock().await;
        match session.current_user() {
            Some(account) if session.is_authenticated() => account.email.clone(),
            _ => {
                println!("Sign in to see your orders");
                return Ok(());
            }
        }
    };

    let orders = store.backend().customer_orders(&email).await?;
    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    println!("{:>6}  {:<12} {:>12}  {}", "ORDER", "STATUS", "TOTAL", "PLACED");
    for order in &orders {
        println!(
            "{:>6}  {:<12} {:>12}  {}",
            order.id.to_string(),
            order.status.to_string(),
            Price::from_amount(order.total).display(),
            order.placed_at.format("%Y-%m-%d %H:%M"),
        );
    }

    Ok(())
}
