//! `paw params` - show the effective system parameters.

use pawstore_storefront::state::Storefront;

/// Print the three tunable limits, after fallback resolution.
pub async fn show(store: &Storefront) {
    let params = store.params();

    println!("Max items per day:   {}", params.max_daily_items().await);
    println!("Max login attempts:  {}", params.max_login_attempts().await);
    println!("Tax rate:            {}", params.tax_rate().await);
}
