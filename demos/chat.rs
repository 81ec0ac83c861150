/// Free-form chat through OpenRouter, printing raw request/response bodies.
///
/// Requires `OPENROUTER_API_KEY`.
///
/// Run with: cargo run --example chat
use dotenv::dotenv;
use notesai::{ClientConfig, CompletionClient, InspectorConfig, Message, Provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let inspector = InspectorConfig::default()
        .on_request(|req| {
            println!("━━━ REQUEST ━━━");
            println!("{}", serde_json::to_string_pretty(req).unwrap_or_default());
            println!();
        })
        .on_response(|res| {
            println!("━━━ RESPONSE ━━━");
            println!("{}", serde_json::to_string_pretty(res).unwrap_or_default());
            println!();
        });

    let client = CompletionClient::with_config(
        ClientConfig::new(Provider::OpenRouter).with_inspector(inspector),
    );

    let reply = client
        .chat(&[
            Message::user("I keep a daily journal in markdown."),
            Message::assistant("Nice! How can I help with it?"),
            Message::user("Suggest three headings for a weekly review note."),
        ])
        .await?;

    println!("━━━ FINAL RESULT ━━━");
    println!("{reply}");

    Ok(())
}
