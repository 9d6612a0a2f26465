//! `paw auth` - session management.

use pawstore_core::Email;
use pawstore_storefront::state::Storefront;
use secrecy::SecretString;

/// Sign in with email and password.
pub async fn login(
    store: &Storefront,
    email: &str,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;
    let account = store
        .session()
        .lock()
        .await
        .login(&email, SecretString::from(password))
        .await?;
    println!("Signed in as {} ({})", account.email, account.role);
    Ok(())
}

/// Sign out.
pub async fn logout(store: &Storefront) {
    store.session().lock().await.logout();
}

/// Show the signed-in account.
pub async fn whoami(store: &Storefront) {
    let session = store.session().lock().await;
    match session.current_user() {
        Some(account) if session.is_authenticated() => {
            println!("{} ({})", account.email, account.role);
        }
        Some(account) => println!("{} (inactive account)", account.email),
        None => println!("Not signed in"),
    }
}
