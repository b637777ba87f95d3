// Terminal chat client for a running fanforge server. Holds the session
// transcript plus an explicit single-flight guard, so a slow request can
// never be doubled up by an eager Enter key.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;

use crate::models::{ConceptResponse, Message, Role};

pub const WELCOME_MESSAGE: &str = "Hi! I'm your AI design assistant. I'll help you create stunning merchandise designs. What kind of design would you like to create today?";
const ERROR_MESSAGE: &str = "I apologize, but I encountered an error. Please try again.";

pub struct ChatSession {
    server_url: String,
    http: reqwest::Client,
    pub messages: Vec<Message>,
    pub input: String,
    in_flight: bool,
}

impl ChatSession {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            messages: vec![Message::assistant(WELCOME_MESSAGE)],
            input: String::new(),
            in_flight: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Single-flight guard. Appends the user message and yields the prompt,
    /// or `None` when the input is blank or a request is already running.
    pub fn try_begin(&mut self) -> Option<String> {
        let prompt = self.input.trim().to_string();
        if prompt.is_empty() || self.in_flight {
            return None;
        }
        self.messages.push(Message::user(prompt.clone()));
        self.input.clear();
        self.in_flight = true;
        Some(prompt)
    }

    /// Append the assistant's reply and release the guard.
    pub fn finish(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
        self.in_flight = false;
    }

    /// Submit the current input to the server and append the outcome as an
    /// assistant message. No-ops when the guard refuses.
    pub async fn submit(&mut self) {
        let Some(prompt) = self.try_begin() else {
            return;
        };

        let reply = match self.request_concepts(&prompt).await {
            Ok(response) => summarize_concepts(&response),
            Err(e) => {
                debug!("Chat request failed: {:?}", e);
                ERROR_MESSAGE.to_string()
            }
        };
        self.finish(reply);
    }

    async fn request_concepts(&self, prompt: &str) -> Result<ConceptResponse> {
        let url = format!("{}/api/chat", self.server_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .context("Failed to reach the design assistant server")?
            .error_for_status()
            .context("Design assistant server returned an error")?;

        response
            .json::<ConceptResponse>()
            .await
            .context("Failed to decode concept response")
    }
}

fn summarize_concepts(response: &ConceptResponse) -> String {
    let mut lines = Vec::new();
    if let Some(error) = &response.error {
        lines.push(format!("(Heads up: {error})"));
    }
    lines.push("Here are your design concepts:".to_string());
    for (index, concept) in response.concepts.iter().enumerate() {
        lines.push(format!(
            "{}. {} [{}]: {}",
            index + 1,
            concept.title,
            concept.style,
            concept.description
        ));
    }
    lines.join("\n")
}

/// Interactive stdin loop against a running server. Ends on EOF.
pub async fn run_chat(server_url: &str) -> Result<()> {
    let mut session = ChatSession::new(server_url);
    for message in &session.messages {
        print_message(message);
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        session.input = line;
        let already_printed = session.messages.len();
        session.submit().await;
        for message in &session.messages[already_printed..] {
            print_message(message);
        }
    }
    Ok(())
}

fn print_message(message: &Message) {
    let timestamp = Local::now().format("%H:%M:%S");
    let sender = match message.role {
        Role::User => "you",
        Role::Assistant => "fanforge",
    };
    println!("[{timestamp}] {sender}: {}", message.content);
}
