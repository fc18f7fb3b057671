//! Line-oriented text protocol for driving an [`Engine`].
//!
//! Framing follows GTP: each command may start with a numeric id, replies
//! start with `=` (success) or `?` (failure), followed by the id if one was
//! given, and end with a blank line.
//!
//! ## Supported Commands
//!
//! - `name` / `version` - Engine identification
//! - `list_commands` / `known_command <cmd>` - Introspection
//! - `play <row> <col>` - Play for the player to move (rows and columns are 0-7)
//! - `restart [player1|player2]` - New game, optionally choosing who starts
//! - `setboard <turn> <row0> ... <row7>` - New game from a custom position
//!   (rows use `X`, `O` and `.`)
//! - `showboard` - Print the board
//! - `moves` - List legal moves for the player to move
//! - `history` - Number of past states and the turn of each, most recent first
//! - `score` - Piece counts
//! - `summary` - Full diagnostic dump
//! - `quit` - Exit

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::board::{Board, Turn, serialize};
use crate::engine::{Engine, PartialState};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "history",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "play",
    "quit",
    "restart",
    "score",
    "setboard",
    "showboard",
    "summary",
    "version",
];

/// Text shell state.
pub struct Shell {
    engine: Engine,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Engine::new())
    }
}

impl Shell {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write reply")?;
            output.flush().context("failed to flush reply")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());

        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "play" => {
                let [row, col] = args else {
                    return (false, "expected: play <row> <col>".to_string());
                };
                let (Ok(row), Ok(col)) = (row.parse::<isize>(), col.parse::<isize>()) else {
                    return (false, "invalid coordinate".to_string());
                };
                if self.engine.play(row, col) {
                    (true, self.engine.state().turn.to_string())
                } else {
                    (false, "illegal move".to_string())
                }
            }

            "restart" => {
                let mut partial = PartialState::default();
                if let Some(turn) = args.first() {
                    match turn.parse::<Turn>() {
                        Ok(turn) => partial = partial.with_turn(turn),
                        Err(e) => return (false, e),
                    }
                }
                self.engine.restart(partial);
                (true, String::new())
            }

            "setboard" => {
                let Some((turn, rows)) = args.split_first() else {
                    return (false, "expected: setboard <turn> <rows...>".to_string());
                };
                let turn = match turn.parse::<Turn>() {
                    Ok(turn) => turn,
                    Err(e) => return (false, e),
                };
                match rows.join("\n").parse::<Board>() {
                    Ok(board) => {
                        self.engine
                            .restart(PartialState::default().with_board(board).with_turn(turn));
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", serialize(&self.engine.state().board))),

            "moves" => {
                let moves = self
                    .engine
                    .where_can_play()
                    .iter()
                    .map(|(r, c)| format!("{r},{c}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                (true, moves)
            }

            "history" => {
                let history = self.engine.history();
                let turns = history
                    .iter()
                    .map(|v| v.state.turn.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                (true, format!("{} {turns}", history.len()).trim_end().to_string())
            }

            "score" => {
                let (p1, p2) = self.engine.score();
                (true, format!("{p1} {p2}"))
            }

            "summary" => (true, format!("\n{}", self.engine.summary())),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = Shell::parse_id("123 moves");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "moves");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = Shell::parse_id("moves");
        assert_eq!(id, None);
        assert_eq!(cmd, "moves");
    }

    #[test]
    fn test_known_command() {
        let mut shell = Shell::default();

        let (success, response) = shell.execute("known_command", &["play"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = shell.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_play_and_moves() {
        let mut shell = Shell::default();

        let (success, response) = shell.execute("moves", &[]);
        assert!(success);
        assert_eq!(response, "2,3 3,2 4,5 5,4");

        let (success, response) = shell.execute("play", &["2", "3"]);
        assert!(success);
        assert_eq!(response, "Player2");

        let (success, response) = shell.execute("play", &["0", "0"]);
        assert!(!success);
        assert_eq!(response, "illegal move");

        let (success, _) = shell.execute("play", &["a", "b"]);
        assert!(!success);

        let (success, response) = shell.execute("score", &[]);
        assert!(success);
        assert_eq!(response, "4 1");
    }

    #[test]
    fn test_restart_and_history() {
        let mut shell = Shell::default();
        shell.execute("play", &["2", "3"]);

        let (_, response) = shell.execute("history", &[]);
        assert_eq!(response, "1 Player1");

        let (success, _) = shell.execute("restart", &["player2"]);
        assert!(success);
        assert_eq!(shell.engine().state().turn, Turn::Player2);
        assert_eq!(shell.engine().state().board, Board::opening());

        let (success, _) = shell.execute("restart", &["nobody"]);
        assert!(!success);
    }

    #[test]
    fn test_setboard() {
        let mut shell = Shell::default();
        let rows = [
            "XO......", "........", "........", "........", "........", "........", "........",
            "........",
        ];
        let mut args = vec!["player1"];
        args.extend(rows);
        let (success, _) = shell.execute("setboard", &args);
        assert!(success);
        assert_eq!(shell.engine().state().board.at((0, 0)), Cell::Player1);
        assert_eq!(shell.engine().state().board.at((0, 1)), Cell::Player2);

        let (success, response) = shell.execute("setboard", &["player1", "........"]);
        assert!(!success);
        assert_eq!(response, "expected 8 rows, got 1");
    }

    #[test]
    fn test_run_framing() {
        let mut shell = Shell::default();
        let input = "1 play 2 3\n# comment\n\nplay 0 0\n2 quit\nmoves\n";
        let mut output = Vec::new();
        shell.run(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "=1 Player2\n\n? illegal move\n\n=2 \n\n");
    }
}
