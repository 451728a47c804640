// SPDX-License-Identifier: MIT OR Apache-2.0

//! REPL state: the acting agent and the selected game

use crate::command::{Command, HELP};
use crate::render;
use anyhow::{anyhow, bail, Context, Result};
use dots_core::{Address, MoveInput, MoveType};
use dots_network::{AgentHandle, Conductor, ConductorEvent};
use std::io::{self, Write};

/// What the terminal should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Exit,
}

pub struct Repl {
    conductor: Conductor,
    agent: AgentHandle,
    game: Option<Address>,
}

impl Repl {
    /// Start acting as `agent`, starting it if the conductor does not know it
    pub fn new(conductor: Conductor, agent: &str) -> Self {
        let agent = conductor.add_agent(agent);
        Self {
            conductor,
            agent,
            game: None,
        }
    }

    pub fn agent(&self) -> &AgentHandle {
        &self.agent
    }

    pub fn game(&self) -> Option<&Address> {
        self.game.as_ref()
    }

    pub fn prompt(&self) -> String {
        render::prompt(self.agent.name(), self.game.as_ref())
    }

    /// Write the prompt and flush it, since it has no trailing newline
    pub fn write_prompt(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.prompt().as_bytes())?;
        out.flush()
    }

    /// Agent name for an address, or its short form
    pub fn name_of(&self, address: &Address) -> String {
        self.conductor
            .agent_by_address(address)
            .map(|agent| agent.name().to_string())
            .unwrap_or_else(|| address.short().to_string())
    }

    pub fn describe(&self, event: &ConductorEvent) -> String {
        render::describe_event(event, |a| self.name_of(a))
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        let text = match command {
            Command::Help => HELP.to_string(),
            Command::Exit => return Ok(Reply::Exit),
            Command::Agents => self
                .conductor
                .agents()
                .iter()
                .map(|agent| {
                    let marker = if agent.name() == self.agent.name() { "*" } else { " " };
                    format!("{} {} {}", marker, agent.name(), agent.address())
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Command::As(name) => {
                self.agent = self
                    .conductor
                    .agent(&name)
                    .ok_or_else(|| anyhow!("Unknown agent: {}", name))?;
                format!("Acting as {}", name)
            }
            Command::NewGame(opponent) => {
                let opponent = self.resolve_agent(&opponent)?;
                let game = self.agent.create_game(&opponent, timestamp())?;
                self.game = Some(game.clone());
                format!("Game {} created, {} moves first", game, self.name_of(&opponent))
            }
            Command::SetGame(game) => {
                let session = self.agent.get_state(&game)?;
                self.game = Some(game);
                render::game_summary(&session, |a| self.name_of(a))
            }
            Command::Games => {
                let games = self.agent.my_games();
                if games.is_empty() {
                    "No games".to_string()
                } else {
                    let mut lines = Vec::with_capacity(games.len());
                    for game in games {
                        let session = self.agent.get_state(&game)?;
                        lines.push(render::game_summary(&session, |a| self.name_of(a)));
                    }
                    lines.join("\n")
                }
            }
            Command::Moves => self
                .agent
                .valid_moves()
                .iter()
                .map(|mv| serde_json::to_string(mv).context("Failed to encode move"))
                .collect::<Result<Vec<_>>>()?
                .join("\n"),
            Command::Place { x, y, direction } => self.submit(MoveType::place(x, y, direction))?,
            Command::MakeMove(move_type) => self.submit(move_type)?,
            Command::State => {
                let session = self.agent.get_state(self.current_game()?)?;
                serde_json::to_string_pretty(&session).context("Failed to encode game state")?
            }
            Command::Render => self.agent.render_state(self.current_game()?)?,
        };
        Ok(Reply::Text(text))
    }

    fn submit(&mut self, move_type: MoveType) -> Result<String> {
        let game = self.current_game()?.clone();
        let digest = self.agent.make_move(MoveInput {
            game: game.clone(),
            move_type,
            timestamp: timestamp(),
        })?;
        tracing::debug!(game_id = %game.short(), digest = %digest, "Move accepted");

        let board = self.agent.render_state(&game)?;
        Ok(format!("State {}\n{}", digest, board))
    }

    fn current_game(&self) -> Result<&Address> {
        self.game
            .as_ref()
            .ok_or_else(|| anyhow!("No game selected, use new_game or set_game"))
    }

    fn resolve_agent(&self, name_or_address: &str) -> Result<Address> {
        if let Some(agent) = self.conductor.agent(name_or_address) {
            return Ok(agent.address().clone());
        }
        match Address::parse(name_or_address) {
            Ok(address) => Ok(address),
            Err(_) => bail!("Unknown agent: {}", name_or_address),
        }
    }
}

fn timestamp() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
