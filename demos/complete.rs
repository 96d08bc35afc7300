use dotenv::dotenv;
use webpilot::{CompletionParams, CompletionProvider, OpenAiClient, OpenAiConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Prompt comes from the command line, with a fallback for a quick try.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let prompt = if args.is_empty() {
        "Write a one-line haiku about web browsers.".to_string()
    } else {
        args.join(" ")
    };

    // Expects OPENAI_API_KEY in the environment or a .env file.
    let client = OpenAiClient::new(OpenAiConfig::from_env()?, CompletionParams::default())?;
    let text = client.complete(&prompt, None).await?;
    println!("{}", text.trim());

    Ok(())
}
