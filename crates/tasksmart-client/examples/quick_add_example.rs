/*
[INPUT]:  TaskSmart API endpoint and a free-text task line
[OUTPUT]: Structured task created through a guest session
[POS]:    Examples - guest session and quick add demonstration
[UPDATE]: When auth or task endpoints change
*/

use tasksmart_client::*;

/// Example: create a guest session, add a task from free text, list tasks.
///
/// Usage: `cargo run --example quick_add_example -- "buy milk tomorrow"`
#[tokio::main]
async fn main() {
    println!("=== TaskSmart Quick Add Example ===\n");

    let base_url = std::env::var("TASKSMART_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = match TaskSmartClient::with_config_and_base_url(ClientConfig::default(), &base_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}", base_url);

    let auth = AuthManager::new(client);
    match auth.start_guest_session().await {
        Ok(session) => println!("✓ Guest session started (guest id {})", session.user.id),
        Err(e) => {
            eprintln!("Failed to start guest session: {}", e.user_message());
            return;
        }
    }

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Call the dentist next week".to_string());
    match auth.client().process_task(&text).await {
        Ok(task) => println!(
            "✓ Created [{}] {} ({} / {})",
            task.id, task.title, task.category, task.priority
        ),
        Err(e) => eprintln!("Quick add failed: {}", e.user_message()),
    }

    match auth.client().list_tasks().await {
        Ok(tasks) => {
            println!("\nTasks:");
            for task in tasks {
                let mark = if task.completed { "x" } else { " " };
                println!("  [{}] {}", mark, task.title);
            }
        }
        Err(e) => eprintln!("Listing tasks failed: {}", e.user_message()),
    }
}
