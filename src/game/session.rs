use rand::Rng;
use std::io::{BufRead, Write};

use crate::error::Result;
use crate::game::board::{Board, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "r" | "restart" => Some(Command::Restart),
            "q" | "quit" => Some(Command::Quit),
            other => Direction::from_input(other).map(Command::Move),
        }
    }
}

/// One game plus the best score seen across restarts
#[derive(Debug, Clone)]
pub struct GameSession {
    pub board: Board,
    pub high_score: u32,
    pub won: bool,
    pub over: bool,
}

impl GameSession {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            board: Board::start(rng),
            high_score: 0,
            won: false,
            over: false,
        }
    }

    /// Apply a move; ignored once the game is won or over
    pub fn play<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> bool {
        if self.won || self.over {
            return false;
        }

        let (next, moved) = self.board.slide(direction);
        if moved {
            self.board = next.spawn_tile(rng);
        }

        self.high_score = self.high_score.max(self.board.score());
        self.won = self.board.has_won();
        self.over = self.board.is_game_over();
        moved
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.high_score = self.high_score.max(self.board.score());
        self.board = Board::start(rng);
        self.won = false;
        self.over = false;
    }
}

/// Line-oriented game loop over any input/output pair
pub fn run_text_game<I, O, R>(input: &mut I, output: &mut O, rng: &mut R) -> Result<GameSession>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
{
    let mut session = GameSession::new(rng);
    writeln!(output, "Welcome to 2048!")?;
    writeln!(output, "Moves: w/a/s/d, r to restart, q to quit")?;

    loop {
        writeln!(output, "\n{}High Score: {}", session.board, session.high_score)?;
        if session.won {
            writeln!(output, "You Win!")?;
        } else if session.over {
            writeln!(output, "Game Over!")?;
        }
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match Command::parse(&line) {
            Some(Command::Move(direction)) => {
                session.play(direction, rng);
            }
            Some(Command::Restart) => session.restart(rng),
            Some(Command::Quit) => break,
            None => writeln!(output, "Unknown command '{}'", line.trim())?,
        }
    }

    tracing::debug!(
        score = session.board.score(),
        high_score = session.high_score,
        "Game finished"
    );
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::{GRID_SIZE, WIN_TILE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("q\n"), Some(Command::Quit));
        assert_eq!(Command::parse("R"), Some(Command::Restart));
        assert_eq!(Command::parse("s"), Some(Command::Move(Direction::Down)));
        assert_eq!(Command::parse("jump"), None);
    }

    #[test]
    fn test_moves_ignored_after_win() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = GameSession::new(&mut rng);

        let mut grid = [[0; GRID_SIZE]; GRID_SIZE];
        grid[0][0] = WIN_TILE;
        grid[0][3] = 2;
        session.board = Board::from_grid(grid);
        session.won = session.board.has_won();

        assert!(!session.play(Direction::Left, &mut rng));
        assert_eq!(session.board.grid()[0][3], 2);
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = GameSession::new(&mut rng);

        let mut grid = [[0; GRID_SIZE]; GRID_SIZE];
        grid[0][0] = 64;
        grid[0][1] = 64;
        session.board = Board::from_grid(grid);

        assert!(session.play(Direction::Left, &mut rng));
        assert_eq!(session.high_score, 128);

        session.restart(&mut rng);
        assert_eq!(session.board.score(), 0);
        assert_eq!(session.high_score, 128);
    }

    #[test]
    fn test_text_game_quits_on_command() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(11);
        let mut input = Cursor::new("hello\na\nq\nd\n");
        let mut output = Vec::new();

        run_text_game(&mut input, &mut output, &mut rng)?;

        let text = String::from_utf8_lossy(&output);
        assert!(text.starts_with("Welcome to 2048!"));
        assert!(text.contains("Unknown command 'hello'"));
        assert_eq!(text.matches("High Score:").count(), 3);

        Ok(())
    }
}
