//! Basic example demonstrating the Stash API client.
//!
//! Run with:
//! ```
//! STASH_API_TOKEN=your-token cargo run --example basic
//! ```

use stashapi::{List, StashClient, StoragePolicy, StoragePolicyAssignment, TargetKind};

#[tokio::main]
async fn main() -> stashapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Stash client...");
    let client = StashClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List available storage policies
    println!("\n--- Listing Storage Policies ---");
    let policies = StoragePolicy::list_all(&client, &Default::default()).await?;
    println!("Found {} policies", policies.len());

    for policy in &policies {
        println!("  - {} ({})", policy.name.as_deref().unwrap_or("unnamed"), policy.id);
    }

    // Resolve the effective assignment for a user
    let user_id = "5678";
    println!("\n--- Resolving Assignment for User {user_id} ---");
    match StoragePolicyAssignment::for_target(&client, TargetKind::User, user_id).await {
        Ok(assignment) => {
            println!("Assignment: {}", assignment.id);
            println!("  Policy:   {}", assignment.policy_id());
            println!(
                "  Level:    {} ({})",
                assignment.target_kind(),
                assignment.target_id()
            );

            // Upsert: move the user onto the first listed policy
            if let Some(policy) = policies.first() {
                println!("\n--- Assigning Policy {} ---", policy.id);
                let moved = policy.assign(&client, user_id).await?;
                println!("User {user_id} is now on policy {}", moved.policy_id());
            }
        }
        Err(e) if e.is_not_found() => {
            println!("No assignment resolves for user {user_id}");
        }
        Err(e) => return Err(e),
    }

    println!("\nDone!");
    Ok(())
}
