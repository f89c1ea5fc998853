//! Line-oriented play session.
//!
//! Reads one command per line and writes the board and game status after
//! every applied move. Commands:
//! - `e2e4`, `e2 e4`, `e7e8q`: play a move for the side to move
//! - `moves <square>`: list legal moves of the piece on a square
//! - `board`, `fen`, `json`: show the current position
//! - `help`: list these commands
//! - `quit`: end the session

use crate::config::{Glyphs, TermConfig};
use chess_core::{Color, Square};
use chess_engine::{Game, GameResult};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

const HELP: &str = "\
Commands:
  e2e4, e2 e4, e7e8q  play a move (promotion letter: q, r, b, n)
  moves <square>      list legal moves of the piece on a square
  board               show the board
  fen                 print the position as FEN
  json                print the position as JSON
  help                show this list
  quit                end the session";

/// An interactive game fed from a line reader.
pub struct Session {
    game: Game,
    glyphs: Glyphs,
    show_legal_moves: bool,
}

impl Session {
    pub fn new(game: Game, config: &TermConfig) -> Self {
        Session {
            game,
            glyphs: config.glyphs,
            show_legal_moves: config.show_legal_moves,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs until `quit`, end of input, or the game ends.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        self.write_position(&mut out)?;

        for line in input.lines() {
            let line = line?;
            let command = line.trim();
            if command.is_empty() {
                continue;
            }
            if command == "quit" {
                break;
            }
            if self.handle(command, &mut out)? {
                info!(fen = %self.game.to_fen(), "game over");
                break;
            }
        }

        out.flush()
    }

    /// Handles one command. Returns true once the game has ended.
    fn handle(&mut self, command: &str, out: &mut impl Write) -> io::Result<bool> {
        if let Some(("moves", arg)) = command.split_once(' ') {
            self.write_moves_of(arg.trim(), out)?;
            return Ok(false);
        }

        match command {
            "moves" => writeln!(out, "Usage: moves <square>")?,
            "help" => writeln!(out, "{}", HELP)?,
            "board" => self.write_position(out)?,
            "fen" => writeln!(out, "{}", self.game.to_fen())?,
            "json" => {
                let snapshot = serde_json::to_string(&self.game).map_err(io::Error::other)?;
                writeln!(out, "{}", snapshot)?;
            }
            text => match self.game.apply_uci(text) {
                Ok(m) => {
                    info!(mv = %m, "played");
                    self.write_position(out)?;
                    return Ok(self.game.outcome().is_some());
                }
                Err(reason) => {
                    warn!(input = text, %reason, "move refused");
                    writeln!(out, "Rejected: {}", reason)?;
                }
            },
        }
        Ok(false)
    }

    fn write_moves_of(&self, arg: &str, out: &mut impl Write) -> io::Result<()> {
        let Some(sq) = Square::from_algebraic(arg) else {
            return writeln!(out, "Not a square: '{}'", arg);
        };
        let moves = self.game.legal_moves(sq);
        let list: Vec<String> = moves.as_slice().iter().map(|m| m.to_uci()).collect();
        writeln!(out, "{}: {}", sq, list.join(" "))
    }

    fn write_position(&self, out: &mut impl Write) -> io::Result<()> {
        let board = self.game.board();
        let grid = match self.glyphs {
            Glyphs::Unicode => board.render(),
            Glyphs::Ascii => board.render_ascii(),
        };
        write!(out, "{}", grid)?;
        writeln!(out, "{}", self.status_line())?;

        if self.show_legal_moves && self.game.outcome().is_none() {
            let moves = self.game.all_legal_moves(self.game.turn());
            let list: Vec<String> = moves.as_slice().iter().map(|m| m.to_uci()).collect();
            writeln!(out, "Legal: {}", list.join(" "))?;
        }
        Ok(())
    }

    fn status_line(&self) -> String {
        let turn = self.game.turn();
        match self.game.outcome() {
            Some(GameResult::WhiteWins) => format!("Checkmate: {} wins", Color::White),
            Some(GameResult::BlackWins) => format!("Checkmate: {} wins", Color::Black),
            Some(GameResult::Stalemate) => format!("Stalemate: {} cannot move", turn),
            None if self.game.in_check(turn) => format!("{} to move (check)", turn),
            None => format!("{} to move", turn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(config: &TermConfig, game: Game, input: &str) -> (Session, String) {
        let mut session = Session::new(game, config);
        let mut out = Vec::new();
        session.run(Cursor::new(input), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    fn ascii() -> TermConfig {
        TermConfig {
            glyphs: Glyphs::Ascii,
            ..TermConfig::default()
        }
    }

    #[test]
    fn plays_moves_and_reports_turn() {
        let (session, out) = run(&ascii(), Game::new(), "e2e4\ne7 e5\n");
        assert_eq!(session.game().turn(), Color::White);
        assert!(out.starts_with("rnbqkbnr\n"));
        assert!(out.contains("Black to move"));
        assert!(out.trim_end().ends_with("White to move"));
    }

    #[test]
    fn reports_rejections() {
        let (session, out) = run(&ascii(), Game::new(), "e2e5\nzz\n");
        assert_eq!(session.game(), &Game::new());
        assert!(out.contains("Rejected: illegal move: e2e5"));
        assert!(out.contains("Rejected: unreadable move: 'zz'"));
    }

    #[test]
    fn stops_at_checkmate() {
        let input = "f2f3\ne7e5\ng2g4\nd8h4\na2a3\n";
        let (session, out) = run(&ascii(), Game::new(), input);
        assert!(out.contains("Checkmate: Black wins"));
        assert!(session.game().is_checkmate(Color::White));
        assert!(!out.contains("Rejected"));
    }

    #[test]
    fn lists_moves_of_a_square() {
        let (_, out) = run(&ascii(), Game::new(), "moves g1\nmoves z9\nquit\ne2e4\n");
        assert!(out.contains("g1: g1f3 g1h3"));
        assert!(out.contains("Not a square: 'z9'"));
        assert!(!out.contains("Black to move"));
    }

    #[test]
    fn moves_without_square_prints_usage() {
        let (session, out) = run(&ascii(), Game::new(), "moves\nhelp\n");
        assert!(out.contains("Usage: moves <square>"));
        assert!(out.contains("moves <square>      list legal moves"));
        assert!(!out.contains("Rejected"));
        assert_eq!(session.game(), &Game::new());
    }

    #[test]
    fn show_moves_on_crowded_board() {
        let config = TermConfig {
            show_legal_moves: true,
            ..ascii()
        };
        let game = Game::from_fen("QQQ2QQQ/3Q4/Q5Q1/Q5Q1/Q2Q4/Q6Q/Q3QQ1Q/KQQ4Q w").unwrap();
        let (_, out) = run(&config, game, "");
        let legal = out.lines().find(|l| l.starts_with("Legal: ")).unwrap();
        assert!(legal.split_whitespace().count() > 257);
    }

    #[test]
    fn snapshot_commands() {
        let (_, out) = run(&ascii(), Game::new(), "fen\njson\n");
        assert!(out.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"));
        assert!(out.contains("\"turn\":\"White\""));
    }

    #[test]
    fn shows_legal_moves_when_configured() {
        let config = TermConfig {
            show_legal_moves: true,
            ..ascii()
        };
        let (_, out) = run(&config, Game::new(), "");
        let legal = out.lines().find(|l| l.starts_with("Legal: ")).unwrap();
        assert_eq!(legal.split_whitespace().count(), 21);
    }

    #[test]
    fn reports_stalemate_status() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b").unwrap();
        let (_, out) = run(&ascii(), game, "");
        assert!(out.contains("Stalemate: Black cannot move"));
    }
}
