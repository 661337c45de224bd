use anyhow::Context;
use reqwest::Client as ReqwestClient;
use std::env;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use promptbox::apis::OpenAiClient;
use promptbox::controller::SessionController;
use promptbox::display::{self, Display};
use promptbox::session::{ResponseType, SessionEvent, SessionState};

#[derive(Debug, Clone, Copy, PartialEq)]
enum ReplCommand {
    Help,
    Text,
    Image,
    Show,
    Quit,
}

const USAGE: &str = "\
Type a prompt and press enter to generate.
  /text   respond with generated text (default)
  /image  respond with a generated image URL
  /show   re-render the current result
  /help   display this text
  /quit   exit";

fn parse_repl_command(line: &str) -> Option<ReplCommand> {
    match line {
        "/help" | "/start" => Some(ReplCommand::Help),
        "/text" => Some(ReplCommand::Text),
        "/image" => Some(ReplCommand::Image),
        "/show" => Some(ReplCommand::Show),
        "/quit" | "/exit" => Some(ReplCommand::Quit),
        _ => None,
    }
}

fn render(state: &SessionState) {
    match display::resolve(state) {
        Display::Loading => println!("Generating..."),
        Display::Error(message) => println!("error: {message}"),
        Display::Text(text) => println!("{text}"),
        Display::Image(url) => println!("[image] {url}"),
        Display::Placeholder => println!("{}", display::PLACEHOLDER_MESSAGE),
    }
}

fn prompt_marker(response_type: ResponseType) {
    print!("({response_type})> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("promptbox=warn")),
        )
        .init();

    dotenvy::dotenv().ok();

    let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set!")?;
    let base_url =
        env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

    let client = ReqwestClient::new();
    let service = Arc::new(OpenAiClient::with_base_url(client, api_key, base_url));
    let mut controller = SessionController::new(service);
    info!("generation client initialized");

    println!("{USAGE}");
    render(controller.state());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt_marker(controller.state().response_type);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end().to_string();

        if let Some(command) = parse_repl_command(line.trim()) {
            debug!("parsed command: {:?}", command);
            match command {
                ReplCommand::Help => println!("{USAGE}"),
                ReplCommand::Text => {
                    controller.handle(SessionEvent::ResponseTypeSelected(ResponseType::Text));
                    println!("response type: text");
                }
                ReplCommand::Image => {
                    controller.handle(SessionEvent::ResponseTypeSelected(ResponseType::Image));
                    println!("response type: image");
                }
                ReplCommand::Show => render(controller.state()),
                ReplCommand::Quit => break,
            }
            prompt_marker(controller.state().response_type);
            continue;
        }

        controller.handle(SessionEvent::PromptEdited(line));
        controller.submit_with_hook(render).await;
        prompt_marker(controller.state().response_type);
    }

    info!("session over");
    Ok(())
}
