// SPDX-License-Identifier: MIT OR Apache-2.0

//! REPL command parsing

use dots_core::{Address, Direction, MoveType};
use std::str::FromStr;
use thiserror::Error;

/// Commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// List running agents
    Agents,
    /// Switch the acting agent
    As(String),
    /// Create a game against an agent name or address
    NewGame(String),
    /// Select the current game
    SetGame(Address),
    /// List games of the acting agent
    Games,
    /// Show the move variants
    Moves,
    Place { x: i64, y: i64, direction: Direction },
    /// Raw JSON move type, e.g. `{"Place":{"x":0,"y":0,"direction":"Up"}}`
    MakeMove(MoveType),
    State,
    Render,
    Exit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid {what}: {value}")]
    Invalid { what: &'static str, value: String },
}

pub const HELP: &str = "\
Commands:
  help                      show this help
  agents                    list agents
  as <agent>                act as another agent
  new_game <opponent>       create a game against an agent name or address
  set_game <address>        select a game
  games                     list games of the current agent
  moves                     show the move format
  place <x> <y> <up|right>  draw a line
  make_move <json>          draw a line from a JSON move type
  state                     print the game state as JSON
  render                    print the board
  exit | quit               leave";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name.to_lowercase().as_str() {
            "" => return Err(ParseError::Empty),
            "help" | "?" => Command::Help,
            "agents" => Command::Agents,
            "as" => Command::As(single(&args, "as <agent>")?.to_string()),
            "new_game" => Command::NewGame(single(&args, "new_game <opponent>")?.to_string()),
            "set_game" => {
                let value = single(&args, "set_game <address>")?;
                let address = Address::parse(value).map_err(|_| ParseError::Invalid {
                    what: "game address",
                    value: value.to_string(),
                })?;
                Command::SetGame(address)
            }
            "games" => Command::Games,
            "moves" | "valid_moves" => Command::Moves,
            "place" => parse_place(&args)?,
            "make_move" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage("make_move <json move type>"));
                }
                let move_type = serde_json::from_str(rest).map_err(|_| ParseError::Invalid {
                    what: "move type",
                    value: rest.to_string(),
                })?;
                Command::MakeMove(move_type)
            }
            "state" => Command::State,
            "render" | "show" => Command::Render,
            "exit" | "quit" => Command::Exit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn single<'a>(args: &[&'a str], usage: &'static str) -> Result<&'a str, ParseError> {
    match args {
        [one] => Ok(one),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn parse_place(args: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "place <x> <y> <up|right>";
    let [x, y, direction] = args else {
        return Err(ParseError::Usage(USAGE));
    };

    let coord = |value: &str| {
        value.parse::<i64>().map_err(|_| ParseError::Invalid {
            what: "coordinate",
            value: value.to_string(),
        })
    };
    let direction = match direction.to_lowercase().as_str() {
        "up" | "u" => Direction::Up,
        "right" | "r" => Direction::Right,
        _ => {
            return Err(ParseError::Invalid {
                what: "direction",
                value: direction.to_string(),
            })
        }
    };

    Ok(Command::Place {
        x: coord(*x)?,
        y: coord(*y)?,
        direction,
    })
}
