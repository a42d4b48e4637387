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

//! The basis of a transportation tableau.
//!
//! The cells of an `m x n` tableau correspond to the edges of the complete
//! bipartite graph between `m` origins and `n` destinations. A basis is a
//! spanning tree of this graph, hence it consists of exactly `m + n - 1`
//! cells.

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A cell of the tableau.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub fn new(row: usize, column: usize) -> Self {
        Cell { row, column }
    }
}

/// The basis status of a cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellStatus {
    /// The cell is in the basis and carries flow.
    Basic,
    /// The cell is in the basis with zero flow.
    ///
    /// Artificial cells are only added to keep the basis a spanning tree.
    Artificial,
    /// The cell is not in the basis.
    NonBasic,
}

/// The set of basic cells stored as dense grid.
#[derive(Clone, Debug)]
pub struct Basis {
    nrows: usize,
    ncols: usize,
    status: Vec<CellStatus>,
    /// Number of basic and artificial cells.
    size: usize,
}

impl Basis {
    /// Create an empty basis for an `nrows x ncols` tableau.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Basis {
            nrows,
            ncols,
            status: vec![CellStatus::NonBasic; nrows * ncols],
            size: 0,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    pub fn num_columns(&self) -> usize {
        self.ncols
    }

    pub fn status(&self, cell: Cell) -> CellStatus {
        self.status[cell.row * self.ncols + cell.column]
    }

    /// Return `true` if the cell is basic or artificial.
    pub fn is_basic(&self, cell: Cell) -> bool {
        self.status(cell) != CellStatus::NonBasic
    }

    /// Change the status of a cell.
    pub fn set(&mut self, cell: Cell, status: CellStatus) {
        let old = std::mem::replace(&mut self.status[cell.row * self.ncols + cell.column], status);
        match (old == CellStatus::NonBasic, status == CellStatus::NonBasic) {
            (true, false) => self.size += 1,
            (false, true) => self.size -= 1,
            _ => (),
        }
    }

    /// The number of basic and artificial cells.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of cells of a spanning tree, i.e. `rows + columns - 1`.
    pub fn required(&self) -> usize {
        self.nrows + self.ncols - 1
    }

    /// Add artificial cells until the basis has the size of a spanning tree.
    ///
    /// The cells are added in row-major order, skipping cells that are
    /// already in the basis and cells that would close a cycle with the
    /// current basis. If the basis is a forest, the result is a spanning
    /// tree. Returns the number of added cells.
    pub fn pad(&mut self) -> usize {
        let required = self.required();
        if self.size >= required {
            return 0;
        }

        // Nodes 0..nrows are the rows, nodes nrows.. the columns.
        let mut comps = vec![Component::Root(0); self.nrows + self.ncols];
        for cell in self.cells().collect::<Vec<_>>() {
            union(&mut comps, cell.row, self.nrows + cell.column);
        }

        let mut added = 0;
        for idx in 0..self.status.len() {
            if self.size >= required {
                break;
            }
            if self.status[idx] != CellStatus::NonBasic {
                continue;
            }
            if union(&mut comps, idx / self.ncols, self.nrows + idx % self.ncols) {
                self.status[idx] = CellStatus::Artificial;
                self.size += 1;
                added += 1;
            }
        }
        added
    }

    /// Iterate over all basic and artificial cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let ncols = self.ncols;
        self.status
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s != CellStatus::NonBasic)
            .map(move |(idx, _)| Cell::new(idx / ncols, idx % ncols))
    }
}

/// Union-Find data-structure for padding.
#[derive(Clone, Copy)]
enum Component {
    /// The root element with the tree's depth.
    Root(usize),
    /// An inner node with the parent node.
    Node(usize),
}

/// Return the root node and the tree's depth of node `u`.
fn find_root(comps: &[Component], u: usize) -> (usize, usize) {
    let mut v = u;
    loop {
        match comps[v] {
            Component::Node(parent) => v = parent,
            Component::Root(depth) => return (v, depth),
        }
    }
}

/// Join the components of `u` and `v`.
///
/// Returns `false` if both are already in the same component.
fn union(comps: &mut [Component], u: usize, v: usize) -> bool {
    let (uroot, udepth) = find_root(comps, u);
    let (vroot, vdepth) = find_root(comps, v);
    if uroot == vroot {
        return false;
    }
    if udepth < vdepth {
        comps[uroot] = Component::Node(vroot);
    } else {
        comps[vroot] = Component::Node(uroot);
        if udepth == vdepth {
            comps[uroot] = Component::Root(udepth + 1);
        }
    }
    true
}
