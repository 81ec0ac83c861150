/// Summarize a note, then answer a question about it.
///
/// Both calls share the client, so the provider is only built once.
///
/// Run with: cargo run --example ask
use dotenv::dotenv;
use notesai::CompletionClient;

const NOTE: &str = "Sprint review, 12 May. Attendees: Ana, Rui, Marta. \
The sync engine ships behind a flag on 3 June. Marta owns the rollout \
checklist. Open risk: conflict resolution for offline edits is untested.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let client = CompletionClient::from_env();

    let (summary, answer) = tokio::join!(
        client.summarize(NOTE),
        client.answer("Who owns the rollout checklist?", NOTE),
    );

    println!("Summary:\n{}\n", summary?);
    println!("Answer:\n{}", answer?);

    Ok(())
}
