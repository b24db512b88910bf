//! Search-grounded completion against Perplexity, then JSON-mode extraction against OpenAI.

use openai_client::{ChatRequest, Message, OpenAIClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let search = OpenAIClient::perplexity(std::env::var("PERPLEXITY_API_KEY")?);
    let extraction = OpenAIClient::new(std::env::var("OPENAI_API_KEY")?);

    println!("=== Search ===");
    let research = search
        .chat_completion(
            ChatRequest::new("sonar-pro")
                .message(Message::user(
                    "Lista 5 apartamentos en venta en Laureles, Medellín con precio y área.",
                ))
                .temperature(0.2),
        )
        .await?;

    println!("{}", research.content);
    for url in &research.citations {
        println!("  source: {}", url);
    }

    println!("\n=== Extraction ===");
    let structured = extraction
        .chat_completion(
            ChatRequest::new("gpt-4o-mini")
                .message(Message::system(
                    "Devuelve JSON con la forma {\"comparables\": [{\"precio\": number, \"area_m2\": number}]}",
                ))
                .message(Message::user(research.content))
                .json_mode(),
        )
        .await?;

    println!("{}", structured.content);
    Ok(())
}
