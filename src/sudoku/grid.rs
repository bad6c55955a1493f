//! Sudoku grids: loading, validation and printing.

use crate::error::{Error, InvalidInstance, Result};
use itertools::Itertools;
use std::fmt;
use std::fs;
use std::path::Path;

/// Largest supported block width (grids up to 49 x 49).
pub const MAX_BLOCK_SIZE: usize = 7;

/// Kind of a cell group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Row,
    Column,
    Block,
}

/// A row, column or block: cells that must hold distinct values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    pub index: usize,
    /// Row-major cell indices
    pub cells: Vec<usize>,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            GroupKind::Row => "row",
            GroupKind::Column => "column",
            GroupKind::Block => "block",
        };
        write!(f, "{} {}", kind, self.index)
    }
}

/// All groups of a `size x size` grid: rows first, then columns, then blocks.
pub fn groups(size: usize, block: usize) -> Vec<Group> {
    let mut groups = Vec::with_capacity(3 * size);

    for r in 0..size {
        groups.push(Group {
            kind: GroupKind::Row,
            index: r,
            cells: (0..size).map(|c| r * size + c).collect(),
        });
    }

    for c in 0..size {
        groups.push(Group {
            kind: GroupKind::Column,
            index: c,
            cells: (0..size).map(|r| r * size + c).collect(),
        });
    }

    for (b, (br, bc)) in (0..block).cartesian_product(0..block).enumerate() {
        let cells = (0..block)
            .cartesian_product(0..block)
            .map(|(r, c)| (br * block + r) * size + bc * block + c)
            .collect();
        groups.push(Group {
            kind: GroupKind::Block,
            index: b,
            cells,
        });
    }

    groups
}

/// A puzzle: a square grid where 0 marks a blank and other values are given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudokuGrid {
    pub name: String,
    size: usize,
    block: usize,
    cells: Vec<u8>,
}

impl SudokuGrid {
    /// Create a grid from rows, validating dimensions and given values.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<u8>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(InvalidInstance::EmptyInstance.into());
        }

        let block = (1..=MAX_BLOCK_SIZE)
            .find(|b| b * b == size)
            .ok_or_else(|| {
                InvalidInstance::BadDimension(format!(
                    "grid size {} is not the square of a block size up to {}",
                    size, MAX_BLOCK_SIZE
                ))
            })?;

        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(InvalidInstance::BadDimension(format!(
                    "row {} has {} values, expected {}",
                    r,
                    row.len(),
                    size
                ))
                .into());
            }
            if let Some(c) = row.iter().position(|&v| v as usize > size) {
                return Err(InvalidInstance::ValueOutOfRange {
                    row: r,
                    col: c,
                    value: row[c] as usize,
                }
                .into());
            }
        }

        let grid = SudokuGrid {
            name: name.into(),
            size,
            block,
            cells: rows.into_iter().flatten().collect(),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Load a grid from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&text, name)
    }

    /// Parse whitespace separated rows; the grid ends at the first blank line.
    pub fn parse(text: &str, name: impl Into<String>) -> Result<Self> {
        let mut rows = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                if rows.is_empty() {
                    continue;
                }
                break;
            }

            let mut row = Vec::with_capacity(tokens.len());
            for token in tokens {
                let value = token.parse::<usize>().map_err(|_| {
                    Error::parse(idx + 1, format!("expected a cell value, got '{}'", token))
                })?;
                if value > u8::MAX as usize {
                    return Err(InvalidInstance::ValueOutOfRange {
                        row: rows.len(),
                        col: row.len(),
                        value,
                    }
                    .into());
                }
                row.push(value as u8);
            }
            rows.push(row);
        }

        Self::new(name, rows)
    }

    /// Reject duplicate given values within a row, column or block.
    fn validate(&self) -> Result<()> {
        for group in groups(self.size, self.block) {
            let mut seen = vec![false; self.size + 1];
            for &cell in &group.cells {
                let value = self.cells[cell];
                if value == 0 {
                    continue;
                }
                if seen[value as usize] {
                    return Err(InvalidInstance::DuplicateValue {
                        group: group.to_string(),
                        value,
                    }
                    .into());
                }
                seen[value as usize] = true;
            }
        }
        Ok(())
    }

    /// Grid width (and number of values).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Block width.
    pub fn block_size(&self) -> usize {
        self.block
    }

    /// Cells in row-major order, 0 for blanks.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Value at `(row, col)`, 0 for a blank.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.size + col]
    }

    /// Whether the cell at row-major index `cell` holds a given value.
    pub fn is_fixed(&self, cell: usize) -> bool {
        self.cells[cell] != 0
    }

    /// Number of blank cells.
    pub fn blank_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }
}

impl fmt::Display for SudokuGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_grid(&self.cells, self.size, self.block))
    }
}

/// Render cells with separators between blocks.
pub fn format_grid(cells: &[u8], size: usize, block: usize) -> String {
    let width = size.to_string().len();
    let mut out = String::new();

    for (r, row) in cells.chunks(size).enumerate() {
        if r % block == 0 && r != 0 {
            let dashes = (size + block - 1) * (width + 1) - 1;
            out.push_str(&"-".repeat(dashes));
            out.push('\n');
        }
        let line = row
            .chunks(block)
            .map(|chunk| chunk.iter().map(|v| format!("{:>w$}", v, w = width)).join(" "))
            .join(&format!(" {:>w$} ", "|", w = width));
        out.push_str(&line);
        out.push('\n');
    }

    out
}
