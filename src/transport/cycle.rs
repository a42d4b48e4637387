/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Stepping-stone cycles.
//!
//! Adding a non-basic cell to a spanning-tree basis closes exactly one
//! cycle. In the tableau this cycle alternates between moves along a row
//! and moves along a column, visiting only basic cells.

use super::basis::{Basis, Cell};

/// An element of the DFS stack.
#[derive(Clone, Copy)]
struct Frame {
    cell: Cell,
    /// Whether the next move stays in the row (`true`) or column of `cell`.
    by_row: bool,
    /// The next row or column index to be scanned.
    next: usize,
}

/// Find the stepping-stone cycle through the entering cell.
///
/// The returned walk starts and ends with `entering`, i.e. it has the form
/// `[entering, c1, ..., entering]`. Consecutive cells alternately share a
/// row and a column, starting with a row move if possible, so the walk has
/// an even number of distinct cells, at least four. All cells but
/// `entering` are basic.
///
/// The search is a depth-first search over `(cell, direction)` pairs, each of
/// which is expanded at most once. Returns `None` if there is no cycle, which
/// can only happen if the basis is not a spanning tree.
///
/// # Example
///
/// ```
/// use rs_transport::transport::{Basis, Cell, CellStatus};
/// use rs_transport::transport::cycle::stepping_stone;
///
/// let mut basis = Basis::new(2, 2);
/// basis.set(Cell::new(0, 0), CellStatus::Basic);
/// basis.set(Cell::new(1, 0), CellStatus::Basic);
/// basis.set(Cell::new(1, 1), CellStatus::Basic);
///
/// let cycle = stepping_stone(&basis, Cell::new(0, 1)).unwrap();
/// assert_eq!(
///     cycle,
///     vec![Cell::new(0, 1), Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1), Cell::new(0, 1)]
/// );
/// ```
pub fn stepping_stone(basis: &Basis, entering: Cell) -> Option<Vec<Cell>> {
    let nrows = basis.num_rows();
    let ncols = basis.num_columns();
    let is_basic = |cell: Cell| cell == entering || basis.is_basic(cell);

    // visited[cell][by_row]
    let mut visited = vec![[false; 2]; nrows * ncols];
    let mut stack: Vec<Frame> = Vec::new();

    for &first_by_row in &[true, false] {
        let seen = &mut visited[entering.row * ncols + entering.column][first_by_row as usize];
        if *seen {
            continue;
        }
        *seen = true;
        stack.clear();
        stack.push(Frame {
            cell: entering,
            by_row: first_by_row,
            next: 0,
        });

        while let Some(&Frame { cell, by_row, next }) = stack.last() {
            let limit = if by_row { ncols } else { nrows };
            let mut k = next;
            let mut descend = None;
            while k < limit {
                let nxt = if by_row {
                    Cell::new(cell.row, k)
                } else {
                    Cell::new(k, cell.column)
                };
                k += 1;
                if nxt == cell || !is_basic(nxt) {
                    continue;
                }
                // the closing move must differ from the first one
                if nxt == entering && stack.len() >= 3 && by_row != first_by_row {
                    let mut cycle: Vec<Cell> = stack.iter().map(|f| f.cell).collect();
                    cycle.push(entering);
                    return Some(cycle);
                }
                if stack.iter().any(|f| f.cell == nxt) {
                    continue;
                }
                descend = Some(nxt);
                break;
            }

            if let Some(top) = stack.last_mut() {
                top.next = k;
            }

            match descend {
                Some(nxt) => {
                    let seen = &mut visited[nxt.row * ncols + nxt.column][!by_row as usize];
                    if !*seen {
                        *seen = true;
                        stack.push(Frame {
                            cell: nxt,
                            by_row: !by_row,
                            next: 0,
                        });
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::stepping_stone;
    use crate::transport::basis::{Basis, Cell, CellStatus};

    fn basis_of(nrows: usize, ncols: usize, cells: &[(usize, usize)]) -> Basis {
        let mut basis = Basis::new(nrows, ncols);
        for &(i, j) in cells {
            basis.set(Cell::new(i, j), CellStatus::Basic);
        }
        basis
    }

    fn cells(cells: &[(usize, usize)]) -> Vec<Cell> {
        cells.iter().map(|&(i, j)| Cell::new(i, j)).collect()
    }

    #[test]
    fn staircase_cycle() {
        // northwest-corner basis of a 3x4 tableau
        let basis = basis_of(3, 4, &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (2, 3)]);
        let cycle = stepping_stone(&basis, Cell::new(2, 0)).unwrap();
        assert_eq!(
            cycle,
            cells(&[(2, 0), (2, 2), (1, 2), (1, 1), (0, 1), (0, 0), (2, 0)])
        );
    }

    #[test]
    fn dead_ends_are_left() {
        // (0,0) is a leaf that must be backtracked from
        let basis = basis_of(2, 3, &[(0, 0), (0, 2), (1, 1), (1, 2)]);
        let cycle = stepping_stone(&basis, Cell::new(0, 1)).unwrap();
        assert_eq!(cycle, cells(&[(0, 1), (0, 2), (1, 2), (1, 1), (0, 1)]));
    }

    #[test]
    fn cycle_inside_basis_does_not_count() {
        // column 1 is not connected to the rest of the basis
        let basis = basis_of(2, 3, &[(0, 0), (0, 2), (1, 0), (1, 2)]);
        assert_eq!(stepping_stone(&basis, Cell::new(0, 1)), None);
    }

    #[test]
    fn alternates_directions() {
        let basis = basis_of(3, 3, &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]);
        let cycle = stepping_stone(&basis, Cell::new(2, 0)).unwrap();
        assert_eq!(cycle.first(), cycle.last());
        assert!(cycle.len() >= 5);
        for (k, w) in cycle.windows(2).enumerate() {
            if k % 2 == 0 {
                assert_eq!(w[0].row, w[1].row);
            } else {
                assert_eq!(w[0].column, w[1].column);
            }
        }
        for c in &cycle[1..cycle.len() - 1] {
            assert!(basis.is_basic(*c));
        }
    }

    #[test]
    fn isolated_cell_has_no_cycle() {
        let basis = basis_of(2, 2, &[(0, 0), (1, 1)]);
        assert_eq!(stepping_stone(&basis, Cell::new(0, 1)), None);
    }
}
