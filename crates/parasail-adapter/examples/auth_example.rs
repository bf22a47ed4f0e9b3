/*
[INPUT]:  PARASAIL_PRIVATE_KEY environment variable
[OUTPUT]: Signed consent payload and, optionally, a bearer token
[POS]:    Examples - authentication flow demonstration
[UPDATE]: When auth flow changes
*/

use std::sync::Arc;

use parasail_adapter::*;

/// Example: Authentication flow
///
/// 1. Sign the consent message with the wallet key
/// 2. Exchange it for a bearer token via POST /user/verify
/// 3. Fetch node stats with the new session
#[tokio::main]
async fn main() {
    println!("=== Parasail Authentication Example ===\n");

    let Ok(private_key) = std::env::var("PARASAIL_PRIVATE_KEY") else {
        println!("Set PARASAIL_PRIVATE_KEY to run the live flow.");
        return;
    };

    let payload = match sign_consent(&private_key).await {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Failed to sign consent message: {}", e);
            return;
        }
    };
    println!("✓ Consent signed for {}", payload.address);

    let client = match ParasailClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let manager = SessionManager::new(
        Arc::new(client),
        private_key,
        Session::default(),
        Arc::new(MemorySessionStore::new()),
    );

    match manager.node_stats().await {
        Ok(stats) => println!("✓ Points: {} | Cards: {}", stats.points, stats.card_count),
        Err(e) => eprintln!("Failed to fetch node stats: {}", e),
    }
}
