use gemini_notes::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::main().await
}
