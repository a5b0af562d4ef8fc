use crate::{
    event::{Event, EventBus, QueueAction},
    pattern::Pattern,
};
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP: &str = "Commands: play <sample>... | beat <pattern> | status | help. \
Patterns separate beats with '|' and rests with '-', e.g. beat kick.wav hat.wav | snare.wav | - | hat.wav";

#[derive(Debug, PartialEq)]
pub enum Command {
    Queue(QueueAction),
    Help,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match cmd {
        "" => Command::Empty,
        "play" => Command::Queue(QueueAction::EnqueueSamples {
            ids: rest.split_whitespace().map(str::to_string).collect(),
        }),
        "beat" => Command::Queue(QueueAction::EnqueuePattern {
            pattern: Pattern::parse(rest),
        }),
        "status" => Command::Queue(QueueAction::Status),
        "help" => Command::Help,
        other => Command::Unknown(other.to_string()),
    }
}

pub fn init(bus: &EventBus) {
    let bus = bus.clone();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("stdin closed, no more commands");
                    break;
                }
                Err(e) => {
                    error!("Failed to read from stdin: {e}");
                    break;
                }
            };

            match parse_command(&line) {
                Command::Queue(action) => bus.send(Event::Queue(action)),
                Command::Help => info!("{HELP}"),
                Command::Empty => {}
                Command::Unknown(cmd) => warn!("Unknown command {cmd:?}. {HELP}"),
            }
        }
    });
}
