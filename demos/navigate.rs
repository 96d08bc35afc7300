use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use webpilot::NavigatorChain;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // RUST_LOG=webpilot=debug shows the prompt clipping and HTTP calls.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let chain = NavigatorChain::with_openai("Find the documentation search box")?;

    let url = "https://www.rust-lang.org/";
    let browser_content = r#"<link id=1>Install</link>
<link id=2>Learn</link>
<link id=3>Playground</link>
<link id=4>Tools</link>
<link id=5>Governance</link>
<link id=6>Community</link>
<input id=7 alt="Search documentation"></input>
<button id=8>(Submit)</button>"#;

    let outputs = chain.run(url, browser_content).await?;
    println!("{}", outputs[chain.output_key()]);

    Ok(())
}
