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

//! Row/column potentials and reduced costs of the MODI method.

use super::basis::{Basis, Cell};
use num_traits::{Float, NumAssign};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The potentials of a basis.
///
/// For each basic cell `(i,j)` the potentials satisfy `c[i][j] = u[i] + v[j]`.
#[derive(Clone, PartialEq, Debug)]
pub struct Potentials<F> {
    /// Row potentials.
    pub u: Vec<F>,
    /// Column potentials.
    pub v: Vec<F>,
    /// `false` if some potential could not be derived and has been set to 0.
    pub resolved: bool,
}

/// The reduced cost of a cell.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ReducedCost<F> {
    /// The cell is basic, no reduced cost applies.
    Basic,
    /// The reduced cost `c[i][j] - u[i] - v[j]` of a non-basic cell.
    Value(F),
}

impl<F: Copy> ReducedCost<F> {
    /// Return the reduced cost, `None` for basic cells.
    pub fn value(&self) -> Option<F> {
        match *self {
            ReducedCost::Basic => None,
            ReducedCost::Value(d) => Some(d),
        }
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, ReducedCost::Basic)
    }
}

/// Compute the potentials of a basis.
///
/// The first row potential is fixed to zero; the others are propagated along
/// the basic cells. If the basis is not connected some potentials remain
/// undetermined. They are set to zero and `resolved` is `false`.
pub fn potentials<F>(costs: &[Vec<F>], basis: &Basis) -> Potentials<F>
where
    F: Float + NumAssign,
{
    let nrows = basis.num_rows();
    let ncols = basis.num_columns();
    let mut u: Vec<Option<F>> = vec![None; nrows];
    let mut v: Vec<Option<F>> = vec![None; ncols];
    u[0] = Some(F::zero());

    let cells: Vec<Cell> = basis.cells().collect();
    let mut changed = true;
    let mut npasses = 0;
    while changed && npasses < 2 * nrows * ncols {
        changed = false;
        npasses += 1;
        for &Cell { row: i, column: j } in &cells {
            match (u[i], v[j]) {
                (Some(ui), None) => {
                    v[j] = Some(costs[i][j] - ui);
                    changed = true;
                }
                (None, Some(vj)) => {
                    u[i] = Some(costs[i][j] - vj);
                    changed = true;
                }
                _ => (),
            }
        }
    }

    let resolved = u.iter().chain(v.iter()).all(Option::is_some);
    Potentials {
        u: u.into_iter().map(|x| x.unwrap_or_else(F::zero)).collect(),
        v: v.into_iter().map(|x| x.unwrap_or_else(F::zero)).collect(),
        resolved,
    }
}

/// Compute the reduced costs of all cells and select the entering cell.
///
/// The entering cell is the first cell in row-major order whose reduced cost
/// is minimal. A later cell only replaces the current candidate if its
/// reduced cost is smaller by more than `eps`. If no reduced cost is below
/// `-eps` there is no entering cell and the basis is optimal.
pub fn reduced_costs<F>(
    costs: &[Vec<F>],
    pot: &Potentials<F>,
    basis: &Basis,
    eps: F,
) -> (Vec<Vec<ReducedCost<F>>>, Option<Cell>)
where
    F: Float + NumAssign,
{
    let mut best = F::zero();
    let mut entering = None;
    let delta: Vec<Vec<ReducedCost<F>>> = costs
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, &c)| {
                    let cell = Cell::new(i, j);
                    if basis.is_basic(cell) {
                        return ReducedCost::Basic;
                    }
                    let d = c - (pot.u[i] + pot.v[j]);
                    if d < best - eps {
                        best = d;
                        entering = Some(cell);
                    }
                    ReducedCost::Value(d)
                })
                .collect()
        })
        .collect();

    (delta, entering)
}
