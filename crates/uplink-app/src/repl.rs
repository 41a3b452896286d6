//! Line-based operator console.
//!
//! Plain lines go to the chat model, `/image <prompt>` goes to the image
//! model. Both run as background tasks so a chat and an image request can
//! be in flight at the same time. Each control is engaged here, before the
//! task is spawned, so a line read right behind another sees it locked.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use uplink_common::UplinkError;
use uplink_config::UplinkConfig;
use uplink_renderer::{ImageGallery, ImageSurface, RenderSurface, StatusReadout, TerminalSurface};

use crate::console::{
    shared, spawn_status_ticker, with_locked, ChatHandler, ImageHandler, Light, Shared,
};
use crate::init;

/// Minimum readout refresh period.
const MIN_TICK_MS: u64 = 100;

pub const HELP: &str = "\
COMMANDS
  <text>            transmit a query to the chat model
  /image <prompt>   request imagery from the image model
  /status           show the status readout
  /history          show how many exchanges the session holds
  /help             show this list
  /quit             wait for open requests, then exit";

const CHAT_LOCKED: &str = "-- chat input locked: transmission in progress";
const IMAGE_LOCKED: &str = "-- image input locked: synthesis in progress";
const IMAGE_USAGE: &str = "-- usage: /image <prompt>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Chat(&'a str),
    Image(&'a str),
    Status,
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

pub fn parse(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return Command::Chat(line);
    }
    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };
    match name {
        "/image" | "/img" => Command::Image(rest),
        "/status" => Command::Status,
        "/history" => Command::History,
        "/help" | "/?" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Unknown(other),
    }
}

/// What the read loop should do after a line is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Nothing,
    Print(String),
    Quit,
}

pub struct Console<S, G> {
    chat: Arc<ChatHandler<S>>,
    image: Arc<ImageHandler<G>>,
    readout: Shared<StatusReadout>,
    pending: Vec<JoinHandle<()>>,
}

impl<S, G> Console<S, G>
where
    S: RenderSurface + Send + 'static,
    G: ImageSurface + Send + 'static,
{
    pub fn new(chat: ChatHandler<S>, image: ImageHandler<G>, readout: Shared<StatusReadout>) -> Self {
        Self {
            chat: Arc::new(chat),
            image: Arc::new(image),
            readout,
            pending: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, line: &str) -> Reply {
        self.pending.retain(|task| !task.is_finished());

        match parse(line) {
            Command::Chat(text) => {
                if text.trim().is_empty() {
                    return Reply::Nothing;
                }
                let Some(guard) = self.chat.control().engage() else {
                    return Reply::Print(CHAT_LOCKED.into());
                };
                let chat = self.chat.clone();
                let text = text.to_string();
                self.pending.push(tokio::spawn(async move {
                    chat.submit_engaged(guard, &text).await;
                }));
                Reply::Nothing
            }
            Command::Image(prompt) => {
                if prompt.is_empty() {
                    return Reply::Print(IMAGE_USAGE.into());
                }
                let Some(guard) = self.image.control().engage() else {
                    return Reply::Print(IMAGE_LOCKED.into());
                };
                let image = self.image.clone();
                let prompt = prompt.to_string();
                self.pending.push(tokio::spawn(async move {
                    image.submit_engaged(guard, &prompt).await;
                }));
                Reply::Nothing
            }
            Command::Status => Reply::Print(with_locked(&self.readout, |r| r.render())),
            Command::History => Reply::Print(self.history_line()),
            Command::Help => Reply::Print(HELP.into()),
            Command::Quit => Reply::Quit,
            Command::Unknown(name) => {
                Reply::Print(format!("-- unknown command {name}; /help lists commands"))
            }
        }
    }

    fn history_line(&self) -> String {
        if !self.chat.is_available() {
            return "SESSION OFFLINE".into();
        }
        match self.chat.exchange_count() {
            Some(n) => format!("SESSION {n} exchange(s) on record"),
            None => "SESSION BUSY: transmission in progress".into(),
        }
    }

    /// Requests still running.
    pub fn in_flight(&self) -> usize {
        self.pending.iter().filter(|t| !t.is_finished()).count()
    }

    /// Wait for every request that is still running.
    pub async fn drain(&mut self) {
        for task in self.pending.drain(..) {
            if let Err(e) = task.await {
                tracing::warn!("Request task ended abnormally: {e}");
            }
        }
    }
}

/// Bring up both services and read operator lines from stdin until
/// `/quit` or end of input.
pub async fn run(config: UplinkConfig, image_dir: PathBuf) -> Result<(), UplinkError> {
    let api_key = config.api.resolve_key();
    let session = init::init_chat_session(&config, api_key.as_deref());
    let image_backend = init::init_image_backend(&config, api_key.as_deref());

    let chat = ChatHandler::new(session, shared(TerminalSurface::stdout()));
    let image = ImageHandler::new(
        image_backend,
        init::image_request(&config.image),
        shared(ImageGallery::stdout(&image_dir)),
    );

    let readout = shared(StatusReadout::new());
    let ticker = spawn_status_ticker(
        readout.clone(),
        Light {
            control: chat.control().clone(),
            online: chat.is_available(),
        },
        Light {
            control: image.control().clone(),
            online: image.is_available(),
        },
        chat.tokens().clone(),
        Duration::from_millis(config.status.tick_interval_ms.max(MIN_TICK_MS)),
        config.status.show_latency,
    );

    println!(
        "UPLINK CONSOLE v{} | CHAT {} | IMAGE {} | images -> {}",
        env!("CARGO_PKG_VERSION"),
        config.chat.model,
        config.image.model,
        image_dir.display()
    );
    println!("/help lists commands");

    let mut console = Console::new(chat, image, readout);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match console.dispatch(&line) {
            Reply::Nothing => {}
            Reply::Print(text) => println!("{text}"),
            Reply::Quit => break,
        }
    }

    if console.in_flight() > 0 {
        println!("-- waiting for {} open request(s)", console.in_flight());
    }
    console.drain().await;
    ticker.abort();
    tracing::info!("Console closed");
    Ok(())
}
