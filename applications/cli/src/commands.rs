//! Interactive commands read from stdin

use crate::error::{PlayerError, Result};
use std::str::FromStr;
use swyphex_playback::{format_clock, MediaAdapter, TransportController};

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    Seek(f64),
    Volume(f32),
    Mute,
    Shuffle,
    Repeat,
    Select(usize),
    Status,
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  play | pause | toggle       transport
  next | prev                 skip (prev restarts after 3s)
  seek <seconds>              jump within the current item
  vol <0..1>                  set volume (0 mutes)
  mute                        toggle mute
  shuffle                     toggle shuffle
  repeat                      cycle repeat none -> all -> one
  select <index>              play queue entry
  status | list | help | quit";

impl FromStr for Command {
    type Err = PlayerError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| PlayerError::UnknownCommand(String::new()))?
            .to_ascii_lowercase();
        let argument = words.next();

        let command = match name.as_str() {
            "play" => Command::Play,
            "pause" => Command::Pause,
            "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "seek" => Command::Seek(parse_argument(&name, argument)?),
            "vol" | "volume" => Command::Volume(parse_argument(&name, argument)?),
            "mute" => Command::Mute,
            "shuffle" => Command::Shuffle,
            "repeat" => Command::Repeat,
            "select" => Command::Select(parse_argument(&name, argument)?),
            "status" | "s" => Command::Status,
            "list" | "ls" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(PlayerError::UnknownCommand(line.trim().to_string())),
        };
        Ok(command)
    }
}

fn parse_argument<T: FromStr>(name: &str, argument: Option<&str>) -> Result<T> {
    let raw = argument
        .ok_or_else(|| PlayerError::UnknownCommand(format!("{} needs an argument", name)))?;
    raw.parse()
        .map_err(|_| PlayerError::UnknownCommand(format!("{}: invalid argument {}", name, raw)))
}

impl Command {
    /// Run the command against the controller
    ///
    /// Returns a line to show the user, if any. `List`, `Help` and `Quit`
    /// are handled by the caller.
    pub fn apply<A: MediaAdapter>(
        self,
        controller: &mut TransportController<A>,
    ) -> Result<Option<String>> {
        match self {
            Command::Play => controller.play()?,
            Command::Pause => controller.pause(),
            Command::Toggle => controller.toggle_play()?,
            Command::Next => controller.next()?,
            Command::Previous => controller.previous()?,
            Command::Seek(seconds) => controller.seek(seconds)?,
            Command::Volume(level) => controller.set_volume(level),
            Command::Mute => {
                controller.toggle_mute();
            }
            Command::Shuffle => {
                controller.toggle_shuffle();
            }
            Command::Repeat => {
                controller.cycle_repeat();
            }
            Command::Select(index) => controller.select(index)?,
            Command::Status => return Ok(Some(status_line(controller))),
            Command::List | Command::Help | Command::Quit => {}
        }
        Ok(None)
    }
}

/// Single-line summary of the controller state
pub fn status_line<A: MediaAdapter>(controller: &TransportController<A>) -> String {
    let snapshot = controller.snapshot();
    let title = snapshot
        .current_item
        .as_ref()
        .map(|item| format!("{} - {}", item.title, item.artist))
        .unwrap_or_else(|| "nothing queued".to_string());
    let duration = snapshot
        .duration_seconds
        .map(format_clock)
        .unwrap_or_else(|| "-:--".to_string());
    let volume = if snapshot.is_muted {
        "muted".to_string()
    } else {
        format!("{:.0}%", snapshot.volume * 100.0)
    };

    format!(
        "[{:?}] {}  {}/{}  vol {}  shuffle {}  repeat {:?}",
        snapshot.state,
        title,
        format_clock(snapshot.position_seconds),
        duration,
        volume,
        if snapshot.shuffle { "on" } else { "off" },
        snapshot.repeat
    )
}
