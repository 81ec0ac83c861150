/// Rank a handful of notes against a query and print the reasoning.
///
/// Set `RUST_LOG=notesai=debug` to see the request spans.
///
/// Run with: cargo run --example semantic-search -- "trip planning"
use dotenv::dotenv;
use notesai::{CompletionClient, DEFAULT_SEARCH_LIMIT, SearchableItem};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "trip planning".to_string());

    let notes = vec![
        SearchableItem::new(
            "journal/2024-05-01.md",
            "Booked flights to Lisbon for the second week of June.",
        ),
        SearchableItem::new(
            "work/standup.md",
            "Blocked on the sync engine review. Pairing with Rui tomorrow.",
        ),
        SearchableItem::new(
            "travel/lisbon.md",
            "Things to see: Alfama, Belém tower, LX Factory. Try pastéis de nata.",
        ),
        SearchableItem::new("recipes/bread.md", "500g flour, 350g water, 10g salt, 2g yeast."),
    ];

    let client = CompletionClient::from_env();
    let outcome = client
        .semantic_search(&query, &notes, DEFAULT_SEARCH_LIMIT)
        .await?;

    println!("Query: {query}\n");
    for (rank, note) in outcome.results.iter().enumerate() {
        println!("{}. {}", rank + 1, note.path);
    }
    println!("\nReasoning: {}", outcome.reasoning);

    Ok(())
}
