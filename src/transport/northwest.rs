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

//! The northwest-corner rule.

use super::basis::{Basis, Cell, CellStatus};
use num_traits::{Float, NumAssign};

/// Compute an initial feasible plan with the northwest-corner rule.
///
/// Starting in the top-left cell, each step ships as much as possible
/// from the current origin to the current destination and moves down if
/// the origin is exhausted or right if the destination is satisfied. If
/// both happen at the same time, the cursor moves down unless it is in the
/// last row.
///
/// `supply` and `demand` must be balanced. A value `<= eps` counts as
/// exhausted. Cells that receive a positive amount become basic; the
/// returned basis may be smaller than a spanning tree (see
/// [`Basis::pad`]).
///
/// # Example
///
/// ```
/// use rs_transport::transport::northwest::northwest_corner;
///
/// let (x, basis) = northwest_corner(&[20.0, 30.0], &[25.0, 25.0], 1e-9);
/// assert_eq!(x, vec![vec![20.0, 0.0], vec![5.0, 25.0]]);
/// assert_eq!(basis.len(), 3);
/// ```
pub fn northwest_corner<F>(supply: &[F], demand: &[F], eps: F) -> (Vec<Vec<F>>, Basis)
where
    F: Float + NumAssign,
{
    let nrows = supply.len();
    let ncols = demand.len();
    let mut x = vec![vec![F::zero(); ncols]; nrows];
    let mut basis = Basis::new(nrows, ncols);
    let mut supply = supply.to_vec();
    let mut demand = demand.to_vec();

    let mut i = 0;
    let mut j = 0;
    while i < nrows && j < ncols {
        let amount = supply[i].min(demand[j]);
        x[i][j] = amount;
        if amount > F::zero() {
            basis.set(Cell::new(i, j), CellStatus::Basic);
        }
        supply[i] -= amount;
        demand[j] -= amount;

        match (supply[i] <= eps, demand[j] <= eps) {
            (true, true) => {
                if i + 1 < nrows {
                    i += 1;
                } else if j + 1 < ncols {
                    j += 1;
                } else {
                    break;
                }
            }
            (true, false) => i += 1,
            (false, true) => j += 1,
            // cannot happen, `amount` exhausts one side
            (false, false) => break,
        }
    }

    (x, basis)
}
