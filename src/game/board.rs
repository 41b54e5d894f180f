use rand::Rng;
use std::fmt;

use crate::utils::constants::{FOUR_TILE_PROBABILITY, GRID_SIZE, WIN_TILE};

pub type Grid = [[u32; GRID_SIZE]; GRID_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Accepts `w/a/s/d` as well as the full direction names
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "a" | "left" => Some(Direction::Left),
            "d" | "right" => Some(Direction::Right),
            "w" | "up" => Some(Direction::Up),
            "s" | "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Grid and score; every move returns a new board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    grid: Grid,
    score: u32,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self { grid, score: 0 }
    }

    /// Empty board with two spawned tiles
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new().spawn_tile(rng).spawn_tile(rng)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Slide every line toward `direction`; the flag is false when nothing moved
    pub fn slide(&self, direction: Direction) -> (Board, bool) {
        let mut next = *self;

        for i in 0..GRID_SIZE {
            let line = self.read_line(direction, i);
            let (merged, gained) = merge_line(line);
            next.write_line(direction, i, merged);
            next.score += gained;
        }

        let moved = next.grid != self.grid;
        (next, moved)
    }

    /// Put a 2 (or, rarely, a 4) on a random empty cell
    pub fn spawn_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Board {
        let empty: Vec<(usize, usize)> = (0..GRID_SIZE)
            .flat_map(|i| (0..GRID_SIZE).map(move |j| (i, j)))
            .filter(|&(i, j)| self.grid[i][j] == 0)
            .collect();

        let mut next = *self;
        if !empty.is_empty() {
            let (i, j) = empty[rng.random_range(0..empty.len())];
            next.grid[i][j] = if rng.random_bool(FOUR_TILE_PROBABILITY) {
                4
            } else {
                2
            };
        }
        next
    }

    pub fn has_won(&self) -> bool {
        self.grid.iter().flatten().any(|&v| v >= WIN_TILE)
    }

    /// No empty cell and no equal neighbours in any row or column
    pub fn is_game_over(&self) -> bool {
        for i in 0..GRID_SIZE {
            for j in 0..GRID_SIZE {
                let value = self.grid[i][j];
                if value == 0 {
                    return false;
                }
                if j + 1 < GRID_SIZE && value == self.grid[i][j + 1] {
                    return false;
                }
                if i + 1 < GRID_SIZE && value == self.grid[i + 1][j] {
                    return false;
                }
            }
        }
        true
    }

    /// Line `index` ordered from the edge tiles move toward
    fn read_line(&self, direction: Direction, index: usize) -> [u32; GRID_SIZE] {
        let mut line = [0; GRID_SIZE];
        for (k, cell) in line.iter_mut().enumerate() {
            let (i, j) = cell_at(direction, index, k);
            *cell = self.grid[i][j];
        }
        line
    }

    fn write_line(&mut self, direction: Direction, index: usize, line: [u32; GRID_SIZE]) {
        for (k, value) in line.into_iter().enumerate() {
            let (i, j) = cell_at(direction, index, k);
            self.grid[i][j] = value;
        }
    }
}

/// Grid position of the `k`-th cell of line `index`, counted from the leading edge
fn cell_at(direction: Direction, index: usize, k: usize) -> (usize, usize) {
    let last = GRID_SIZE - 1;
    match direction {
        Direction::Left => (index, k),
        Direction::Right => (index, last - k),
        Direction::Up => (k, index),
        Direction::Down => (last - k, index),
    }
}

/// Compress toward index 0, merging equal pairs once; returns the line and points gained
pub fn merge_line(line: [u32; GRID_SIZE]) -> ([u32; GRID_SIZE], u32) {
    let tiles: Vec<u32> = line.into_iter().filter(|&v| v != 0).collect();
    let mut merged = [0; GRID_SIZE];
    let mut gained = 0;

    let mut out = 0;
    let mut k = 0;
    while k < tiles.len() {
        if k + 1 < tiles.len() && tiles[k] == tiles[k + 1] {
            let value = tiles[k] * 2;
            merged[out] = value;
            gained += value;
            k += 2;
        } else {
            merged[out] = tiles[k];
            k += 1;
        }
        out += 1;
    }

    (merged, gained)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        for row in &self.grid {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>5}", ".")
                    } else {
                        format!("{:>5}", v)
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join(""))?;
        }
        Ok(())
    }
}
