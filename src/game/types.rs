//! Core domain types: symbols, cells, and the 3x3 board.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A player symbol.
///
/// Exactly two exist; a session seats the human at one and the engine at the
/// complement. X always moves first, whoever holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// The opening symbol.
    X,
    /// The answering symbol.
    O,
}

impl Symbol {
    /// Returns the complementary symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

/// A cell on the board.
///
/// On the wire a cell is a one-character string: `"X"`, `"O"`, or `"_"` for
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell occupied by a symbol.
    Occupied(Symbol),
}

impl Cell {
    /// Returns the occupying symbol, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(symbol) => Some(symbol),
        }
    }

    fn as_wire(self) -> &'static str {
        match self {
            Cell::Empty => "_",
            Cell::Occupied(Symbol::X) => "X",
            Cell::Occupied(Symbol::O) => "O",
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.as_str() {
            "_" => Ok(Cell::Empty),
            "X" => Ok(Cell::Occupied(Symbol::X)),
            "O" => Ok(Cell::Occupied(Symbol::O)),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &r#"one of "X", "O", "_""#,
            )),
        }
    }
}

/// The 3x3 board, cells in row-major order (0-8).
///
/// Serializes as a flat array of exactly nine cell strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board([Cell; 9]);

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self([Cell::Empty; 9])
    }

    /// Builds a board from nine cells in row-major order.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self(cells)
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.0.get(index).copied()
    }

    /// Sets the cell at the given index.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), &'static str> {
        if index >= 9 {
            return Err("cell index out of bounds");
        }
        self.0[index] = cell;
        Ok(())
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.0
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let glyph = match self.0[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Occupied(symbol) => symbol.to_string(),
                };
                result.push_str(&glyph);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
