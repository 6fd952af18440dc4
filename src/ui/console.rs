//! Line-oriented terminal front-end.

use super::narration::{describe, tone, Tone};
use super::presenter::{
    parse_item, parse_target, parse_yes_no, OfferChoice, PlayerAction, Presenter, TableView,
};
use crate::core::{GameError, Result};
use crate::events::GameEvent;
use crate::items::ItemKind;
use crate::table::Seat;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{queue, ExecutableCommand};
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// What to do at the title prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    NewGame,
    Load,
}

impl StartChoice {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "n" | "new" | "new game" => Ok(Self::NewGame),
            "l" | "load" | "continue" => Ok(Self::Load),
            other => Err(GameError::InvalidUserSelection(other.to_string())),
        }
    }
}

pub struct ConsolePresenter<I: BufRead, W: Write> {
    input: I,
    output: W,
    styled: bool,
    clear_on_stage: bool,
}

impl ConsolePresenter<StdinLock<'static>, Stdout> {
    /// Colours and screen clearing on the real terminal.
    pub fn stdio() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
            styled: true,
            clear_on_stage: true,
        }
    }
}

impl<I: BufRead, W: Write> ConsolePresenter<I, W> {
    /// Plain text, no terminal control sequences.
    pub fn new(input: I, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
            clear_on_stage: false,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn choose_start(&mut self) -> Result<StartChoice> {
        let line = self.ask("[n]ew game or [l]oad? ")?;
        StartChoice::parse(&line)
    }

    /// Print a line outside the event stream.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(line.trim().to_string())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.output.execute(Clear(ClearType::All))?;
        self.output.execute(MoveTo(0, 0))?;
        Ok(())
    }

    fn write_line(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        let color = match tone {
            Tone::Plain => None,
            Tone::Good => Some(Color::Green),
            Tone::Bad => Some(Color::Red),
            Tone::Warning => Some(Color::Yellow),
            Tone::Reveal => Some(Color::Cyan),
            Tone::Heading => Some(Color::Magenta),
        };
        match color {
            Some(color) if self.styled => {
                queue!(
                    self.output,
                    SetForegroundColor(color),
                    Print(text),
                    ResetColor,
                    Print("\n")
                )?;
            }
            _ => writeln!(self.output, "{}", text)?,
        }
        self.output.flush()
    }

    fn show_table(&mut self, view: &TableView) -> io::Result<()> {
        let list = |items: &[ItemKind]| {
            if items.is_empty() {
                "-".to_string()
            } else {
                items
                    .iter()
                    .map(|i| i.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        };
        writeln!(
            self.output,
            "\n[Stage {} | Round {}] You: {} lives | Dealer: {} lives | Shells: {} ({} live, {} blank)",
            view.stage,
            view.round,
            view.player_lives,
            view.opponent_lives,
            view.magazine.total,
            view.magazine.live,
            view.magazine.blank
        )?;
        writeln!(self.output, "Your items: {}", list(&view.player_items))?;
        writeln!(self.output, "Dealer items: {}", list(&view.opponent_items))
    }
}

impl<I: BufRead, W: Write> Presenter for ConsolePresenter<I, W> {
    fn narrate(&mut self, event: &GameEvent) {
        let result = (|| -> io::Result<()> {
            if self.clear_on_stage && matches!(event, GameEvent::StageStarted { .. }) {
                self.clear()?;
            }
            self.write_line(&describe(event), tone(event))
        })();
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not write narration");
        }
    }

    fn choose_action(&mut self, view: &TableView) -> Result<PlayerAction> {
        self.show_table(view)?;
        let line = self.ask("[f]ire or use an [i]tem? ")?;
        PlayerAction::parse(&line)
    }

    fn choose_target(&mut self) -> Result<Seat> {
        let line = self.ask("Shoot [s]elf or the [d]ealer? ")?;
        parse_target(&line)
    }

    fn choose_item(&mut self, held: &[ItemKind]) -> Result<ItemKind> {
        for (i, item) in held.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, item)?;
        }
        let line = self.ask("Which item? ")?;
        parse_item(&line, held)
    }

    fn offer_item(&mut self, item: ItemKind) -> Result<OfferChoice> {
        let line = self.ask(&format!("Take {}? [y]es / [n]o / [q]uit box: ", item))?;
        OfferChoice::parse(&line)
    }

    fn confirm_infinite_mode(&mut self) -> Result<bool> {
        let line = self.ask("Play infinite mode? [y/n]: ")?;
        parse_yes_no(&line)
    }

    fn confirm_double_or_quit(&mut self, winnings: u64) -> Result<bool> {
        let line = self.ask(&format!("You have ${}. Double it? [y/n]: ", winnings))?;
        parse_yes_no(&line)
    }
}
