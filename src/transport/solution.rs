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

//! Solutions and iteration traces.

use super::basis::Cell;
use super::potentials::ReducedCost;
use super::problem::{Balancing, Objective};
use super::Termination;
use num_traits::Float;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Snapshot of one MODI iteration, taken before the pivot.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct IterationRecord<F> {
    /// The iteration number, starting at 1.
    pub step: usize,
    /// The plan at the beginning of the iteration.
    pub allocation: Vec<Vec<F>>,
    /// The reduced costs w.r.t. the current basis.
    pub reduced_costs: Vec<Vec<ReducedCost<F>>>,
    /// The entering cell, `None` in the final iteration.
    pub entering: Option<Cell>,
}

impl<F> IterationRecord<F>
where
    F: Float,
{
    /// Remove the dummy row or column of the balanced tableau.
    pub fn trim(&self, balancing: &Balancing<F>) -> Self {
        IterationRecord {
            step: self.step,
            allocation: balancing.trim_matrix(&self.allocation),
            reduced_costs: balancing.trim_matrix(&self.reduced_costs),
            entering: self.entering.and_then(|cell| balancing.trim_cell(cell)),
        }
    }
}

/// Print the tableau of the iteration.
///
/// Each cell shows the amount shipped and the reduced cost, `B` for basic
/// cells. The entering cell is marked with `*`.
impl<F> fmt::Display for IterationRecord<F>
where
    F: Float + fmt::Display,
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Iteration {}", self.step)?;
        match self.entering {
            Some(Cell { row, column }) => writeln!(fmt, ", entering cell ({}, {})", row + 1, column + 1)?,
            None => writeln!(fmt, ", optimal")?,
        }
        for (i, (xs, ds)) in self.allocation.iter().zip(self.reduced_costs.iter()).enumerate() {
            for (j, (x, d)) in xs.iter().zip(ds.iter()).enumerate() {
                let mark = if self.entering == Some(Cell::new(i, j)) { '*' } else { ' ' };
                match d {
                    ReducedCost::Basic => write!(fmt, " {:>10.2} {:>8}{}", x, "B", mark)?,
                    ReducedCost::Value(d) => write!(fmt, " {:>10.2} {:>8.2}{}", x, d, mark)?,
                }
            }
            writeln!(fmt)?;
        }
        Ok(())
    }
}

/// The result of a transportation problem.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solution<F> {
    /// The objective value w.r.t. the original costs.
    pub total_cost: F,
    /// The amount shipped on each cell (without dummies).
    pub allocation: Vec<Vec<F>>,
    pub objective: Objective,
    /// The trace of all iterations (without dummies).
    pub iterations: Vec<IterationRecord<F>>,
    pub balancing: Balancing<F>,
    /// Why the iteration stopped.
    pub termination: Termination,
}

impl<F> Solution<F>
where
    F: Float,
{
    /// Return `true` if the plan has been proven optimal.
    pub fn is_optimal(&self) -> bool {
        self.termination.is_optimal()
    }

    /// The amount shipped from each origin.
    pub fn row_sums(&self) -> Vec<F> {
        self.allocation
            .iter()
            .map(|row| row.iter().fold(F::zero(), |s, &x| s + x))
            .collect()
    }

    /// The amount received by each destination.
    pub fn column_sums(&self) -> Vec<F> {
        let ncols = self.allocation.first().map_or(0, Vec::len);
        (0..ncols)
            .map(|j| self.allocation.iter().fold(F::zero(), |s, row| s + row[j]))
            .collect()
    }
}
