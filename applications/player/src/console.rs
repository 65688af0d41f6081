//! Line-oriented command console
//!
//! Each input line maps to one [`Command`]. Parsing is separate from
//! execution so the grammar can be tested without a controller.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// One console command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Play an artist's catalog, 1-based artist and optional track position
    Artist { artist: usize, track: usize },
    /// Play the album shelf
    Albums,
    /// Play a named playlist
    Playlist(String),
    /// Play a single catalog track by title
    Single(String),
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    Shuffle,
    Repeat,
    /// Seek to a percentage of the current track
    Seek(f64),
    /// Advance the simulated clock
    Tick(Duration),
    /// Run the current source to its end
    End,
    Like,
    /// Add the current track to a playlist
    Add(String),
    /// List playlist names
    Playlists,
    /// Open the expanded player
    Open,
    /// Drag the expanded player down by this many pixels
    Swipe(f64),
    Status,
    Help,
    Quit,
}

/// Rejected console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseCommandError {}

fn invalid(message: impl Into<String>) -> ParseCommandError {
    ParseCommandError(message.into())
}

fn position(arg: &str, what: &str) -> Result<usize, ParseCommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(format!("{what} must be a positive number"))),
    }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, ParseCommandError> {
    if rest.is_empty() {
        Err(invalid(format!("usage: {usage}")))
    } else {
        Ok(rest)
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "artist" => {
                let mut args = required(rest, "artist <n> [track]")?.split_whitespace();
                let artist = position(args.next().unwrap_or_default(), "artist")?;
                let track = match args.next() {
                    Some(arg) => position(arg, "track")?,
                    None => 1,
                };
                Command::Artist { artist, track }
            }
            "albums" => Command::Albums,
            "playlist" => Command::Playlist(required(rest, "playlist <name>")?.to_string()),
            "single" => Command::Single(required(rest, "single <title>")?.to_string()),
            "play" => Command::Play,
            "pause" => Command::Pause,
            "toggle" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "shuffle" => Command::Shuffle,
            "repeat" => Command::Repeat,
            "seek" => {
                let percent = required(rest, "seek <percent>")?
                    .trim_end_matches('%')
                    .parse::<f64>()
                    .map_err(|_| invalid("seek takes a percentage"))?;
                Command::Seek(percent)
            }
            "tick" => {
                let secs = if rest.is_empty() {
                    1.0
                } else {
                    rest.parse::<f64>()
                        .map_err(|_| invalid("tick takes a number of seconds"))?
                };
                let elapsed = Duration::try_from_secs_f64(secs)
                    .map_err(|_| invalid("tick takes a non-negative number of seconds"))?;
                Command::Tick(elapsed)
            }
            "end" => Command::End,
            "like" => Command::Like,
            "add" => Command::Add(required(rest, "add <playlist>")?.to_string()),
            "playlists" => Command::Playlists,
            "open" => Command::Open,
            "swipe" => {
                let distance = required(rest, "swipe <pixels>")?
                    .parse::<f64>()
                    .map_err(|_| invalid("swipe takes a distance in pixels"))?;
                Command::Swipe(distance)
            }
            "status" | "s" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => return Err(invalid("empty command")),
            other => return Err(invalid(format!("unknown command: {other} (try help)"))),
        };

        Ok(command)
    }
}

/// Console usage text
pub const HELP: &str = "\
artist <n> [track]   play an artist's catalog
albums               play the album shelf
playlist <name>      play a playlist
single <title>       play one catalog track
play | pause | toggle
next | prev
shuffle | repeat     toggle modes
seek <percent>       jump within the track
tick [secs]          advance the clock (default 1s)
end                  run the track to its end
like                 add the current track to Liked
add <playlist>       add the current track to a playlist
playlists            list playlists
open | swipe <px>    open or drag the expanded player
status               show the player
quit";
