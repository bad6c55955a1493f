//! Grid domain: Sudoku completion as cost minimization.
//!
//! Each row, column and block contributes `unique + 2 * (size - unique)`,
//! where `unique` counts its distinct values. A solved grid therefore costs
//! exactly `3 * size * size`. Moves swap the values of two blank cells.

pub mod grid;

use crate::problem::{Cost, Move, Problem};
use itertools::Itertools;
use log::trace;

pub use self::grid::{format_grid, Group, GroupKind, SudokuGrid};

/// A forced `(cell, value)` placement used to diversify construction.
pub type GridSeed = Option<(usize, u8)>;

/// A Sudoku puzzle prepared for local search.
#[derive(Debug, Clone)]
pub struct SudokuProblem {
    grid: SudokuGrid,
    groups: Vec<Group>,
    /// Group indices `[row, column, block]` of each cell
    cell_groups: Vec<[usize; 3]>,
    /// Blank cells in row-major order
    free_cells: Vec<usize>,
}

impl SudokuProblem {
    /// Prepare a validated grid.
    pub fn new(grid: SudokuGrid) -> Self {
        let size = grid.size();
        let block = grid.block_size();
        let groups = grid::groups(size, block);

        let cell_groups = (0..size * size)
            .map(|cell| {
                let (r, c) = (cell / size, cell % size);
                [r, size + c, 2 * size + (r / block) * block + c / block]
            })
            .collect();
        let free_cells = (0..size * size).filter(|&cell| !grid.is_fixed(cell)).collect();

        SudokuProblem {
            grid,
            groups,
            cell_groups,
            free_cells,
        }
    }

    /// The puzzle.
    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    /// Cost of a solved grid.
    pub fn min_cost(&self) -> Cost {
        let size = self.grid.size() as Cost;
        3 * size * size
    }

    /// Whether every group of `cells` holds each value exactly once.
    pub fn is_solved(&self, cells: &[u8]) -> bool {
        self.cost(cells) == self.min_cost()
    }

    fn group_cost<F>(&self, group: usize, value_at: F) -> Cost
    where
        F: Fn(usize) -> u8,
    {
        let size = self.grid.size() as Cost;
        let mask = self.groups[group]
            .cells
            .iter()
            .fold(0u64, |mask, &cell| mask | (1u64 << value_at(cell)));
        let unique = mask.count_ones() as Cost;
        unique + (size - unique) * 2
    }
}

impl Problem for SudokuProblem {
    type Value = u8;
    type Seed = GridSeed;

    fn size(&self) -> usize {
        self.grid.cells().len()
    }

    fn cost(&self, cells: &[u8]) -> Cost {
        (0..self.groups.len())
            .map(|g| self.group_cost(g, |cell| cells[cell]))
            .sum()
    }

    fn candidate_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.free_cells
            .iter()
            .tuple_combinations()
            .map(|(&i, &j)| Move::new(i, j))
    }

    fn is_legal(&self, cells: &[u8], mv: Move) -> bool {
        mv.i != mv.j
            && !self.grid.is_fixed(mv.i)
            && !self.grid.is_fixed(mv.j)
            && cells[mv.i] != cells[mv.j]
    }

    fn delta_cost(&self, cells: &[u8], mv: Move) -> Cost {
        // Groups of the same kind sit at the same slot, so a shared group
        // can only repeat slot-wise.
        let groups_i = self.cell_groups[mv.i];
        let groups_j = self.cell_groups[mv.j];
        let affected = groups_i.into_iter().chain(
            groups_j
                .into_iter()
                .zip(groups_i)
                .filter(|(gj, gi)| gj != gi)
                .map(|(gj, _)| gj),
        );

        let swapped = |cell: usize| {
            if cell == mv.i {
                cells[mv.j]
            } else if cell == mv.j {
                cells[mv.i]
            } else {
                cells[cell]
            }
        };

        affected
            .map(|g| self.group_cost(g, &swapped) - self.group_cost(g, |cell| cells[cell]))
            .sum()
    }

    fn apply_move(&self, cells: &mut [u8], mv: Move) {
        cells.swap(mv.i, mv.j);
    }

    /// Fill each row greedily: given values first, then the forced seed
    /// value if the row does not use it yet, then the lowest unused values
    /// from left to right.
    fn construct(&self, seed: GridSeed) -> Vec<u8> {
        let size = self.grid.size();
        let given = self.grid.cells();
        let mut cells = vec![0u8; size * size];

        for r in 0..size {
            let row = r * size..(r + 1) * size;
            let mut used = vec![false; size + 1];

            for cell in row.clone() {
                let value = given[cell];
                if value != 0 && !used[value as usize] {
                    cells[cell] = value;
                    used[value as usize] = true;
                }
            }

            if let Some((cell, value)) = seed.filter(|&(_, v)| v as usize <= size) {
                if row.contains(&cell) && cells[cell] == 0 && !used[value as usize] {
                    cells[cell] = value;
                    used[value as usize] = true;
                }
            }

            for cell in row {
                if cells[cell] != 0 {
                    continue;
                }
                if let Some(value) = (1..=size).find(|&v| !used[v]) {
                    cells[cell] = value as u8;
                    used[value] = true;
                }
            }
        }

        trace!("Constructed grid for seed {:?}: {:?}", seed, cells);
        cells
    }

    fn seeds(&self, budget: usize) -> Vec<GridSeed> {
        if self.free_cells.is_empty() {
            return vec![None];
        }

        let values = 1..=self.grid.size() as u8;
        self.free_cells
            .iter()
            .cartesian_product(values)
            .map(|(&cell, value)| Some((cell, value)))
            .take(budget)
            .collect()
    }

    fn optimum(&self) -> Option<Cost> {
        Some(self.min_cost())
    }

    fn can_exchange(&self, cells: &[u8], i: usize, j: usize) -> bool {
        self.is_legal(cells, Move::new(i, j))
    }
}
