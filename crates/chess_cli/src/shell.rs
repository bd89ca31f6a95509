//! Read loop that turns console commands into board calls.

use anyhow::{Context, Result, bail};
use chess_core::{Board, Color};
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::config::ShellConfig;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { from: (i8, i8), to: (i8, i8) },
    Promote {
        from: (i8, i8),
        to: (i8, i8),
        kind: char,
    },
    Board,
    Text,
    Help,
    Exit,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&name) = parts.first() else {
        bail!("empty command");
    };
    match name {
        "move" => {
            let [r, c, r1, c1] = coords(&parts[1..])?;
            Ok(Command::Move {
                from: (r, c),
                to: (r1, c1),
            })
        }
        "promote" => {
            if parts.len() != 6 {
                bail!("usage: promote <row> <col> <row1> <col1> <Q|R|B|N>");
            }
            let [r, c, r1, c1] = coords(&parts[1..5])?;
            Ok(Command::Promote {
                from: (r, c),
                to: (r1, c1),
                kind: single_char(parts[5])?,
            })
        }
        "board" => Ok(Command::Board),
        "text" => Ok(Command::Text),
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => bail!("unknown command: {other}"),
    }
}

fn coords(args: &[&str]) -> Result<[i8; 4]> {
    if args.len() != 4 {
        bail!("expected four coordinates, got {}", args.len());
    }
    let mut out = [0i8; 4];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .with_context(|| format!("not a coordinate: {arg}"))?;
    }
    Ok(out)
}

fn single_char(arg: &str) -> Result<char> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c.to_ascii_uppercase()),
        _ => bail!("expected one piece letter, got {arg}"),
    }
}

fn print_usage<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  move <row> <col> <row1> <col1>          move a piece")?;
    writeln!(out, "  promote <row> <col> <row1> <col1> <P>   move a pawn, promote to Q/R/B/N")?;
    writeln!(out, "  board                                   show the board")?;
    writeln!(out, "  text                                    show the board encoding")?;
    writeln!(out, "  exit                                    leave the game")?;
    Ok(())
}

pub struct Shell {
    board: Board,
    store: SessionStore,
    config: ShellConfig,
}

impl Shell {
    /// Restores the saved game unless `fresh` is set or there is none.
    pub fn new(config: ShellConfig, fresh: bool) -> Result<Self> {
        let mut store = SessionStore::load(&config.session_path)?;
        if fresh {
            store.clear_session();
        }
        let board = match store.restore() {
            Ok(Some(board)) => {
                info!(turn = %board.current_player_color(), "restored saved session");
                board
            }
            Ok(None) => Board::new(),
            Err(e) => {
                warn!("discarding saved session: {e:#}");
                store.clear_session();
                Board::new()
            }
        };
        Ok(Self {
            board,
            store,
            config,
        })
    }

    /// Runs commands from `input` until `exit`, end of input, or mate.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let mut lines = input.lines();
        if !self.store.leaderboard.is_empty() {
            writeln!(
                out,
                "Games won: White {}, Black {}",
                self.store.wins(Color::White),
                self.store.wins(Color::Black)
            )?;
        }
        print_usage(out)?;
        writeln!(out, "{}", self.board)?;
        loop {
            writeln!(out, "Turn of {}:", self.board.current_player_color())?;
            out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let cmd = match parse_command(&line) {
                Ok(cmd) => cmd,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            };
            let played = match cmd {
                Command::Exit => break,
                Command::Help => {
                    print_usage(out)?;
                    continue;
                }
                Command::Board => {
                    writeln!(out, "{}", self.board)?;
                    continue;
                }
                Command::Text => {
                    writeln!(out, "{}", self.board.field_as_text())?;
                    continue;
                }
                Command::Move { from, to } => {
                    if self.board.is_promoting_move(from.0, from.1, to.0, to.1) {
                        writeln!(out, "Promote to (Q, R, B, N):")?;
                        out.flush()?;
                        let answer = match lines.next() {
                            Some(line) => line?,
                            None => break,
                        };
                        let kind = single_char(answer.trim()).unwrap_or('?');
                        self.board
                            .try_move_and_promote_pawn(from.0, from.1, to.0, to.1, kind)
                    } else {
                        self.board.try_move_piece(from.0, from.1, to.0, to.1)
                    }
                }
                Command::Promote { from, to, kind } => self
                    .board
                    .try_move_and_promote_pawn(from.0, from.1, to.0, to.1, kind),
            };

            match played {
                Ok(()) => {
                    writeln!(out, "Turn succeeded")?;
                    writeln!(out, "{}", self.board)?;
                    if self.after_move(out)? {
                        break;
                    }
                }
                Err(reason) => writeln!(out, "Wrong move ({reason})! Try again!")?,
            }
        }
        self.save()
    }

    /// Reports check and mate and saves progress. Returns true once the game is over.
    fn after_move<W: Write>(&mut self, out: &mut W) -> Result<bool> {
        if let Some(mated) = self.board.get_mate() {
            let winner: Color = mated.opponent();
            writeln!(out, "Checkmate! {winner} wins.")?;
            self.store.record_winner(winner);
            self.store.clear_session();
            return Ok(true);
        }
        if let Some(color) = self.board.get_check() {
            writeln!(out, "{color} is in check.")?;
        }
        if self.config.autosave {
            self.store.add_move(&self.board);
        }
        Ok(false)
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.config.session_path)
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod shell_tests;
