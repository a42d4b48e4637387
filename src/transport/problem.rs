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

//! Problem input, validation and balancing.
//!
//! A [`Problem`] is the editable input of a transportation problem. Before
//! it can be solved it is validated and *balanced*: if the total supply
//! differs from the total demand, a dummy origin (row) or a dummy destination
//! (column) with zero costs absorbs the difference. The dummy is recorded in
//! the [`Balancing`] so that results can be trimmed back to the original
//! shape.

use super::basis::Cell;
use num_traits::{Float, NumAssign};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Optimization direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Objective {
    /// Minimize total shipping cost.
    Minimize,
    /// Maximize total profit.
    Maximize,
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Minimize
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Objective::Minimize => write!(fmt, "minimize"),
            Objective::Maximize => write!(fmt, "maximize"),
        }
    }
}

/// Error when parsing an [`Objective`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown objective '{0}' (expected 'minimize' or 'maximize')")]
pub struct ParseObjectiveError(pub String);

impl FromStr for Objective {
    type Err = ParseObjectiveError;

    /// Accepts every string starting with `min` or `max` (ignoring case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("max") {
            Ok(Objective::Maximize)
        } else if lower.starts_with("min") {
            Ok(Objective::Minimize)
        } else {
            Err(ParseObjectiveError(s.to_string()))
        }
    }
}

/// Error for malformed problem input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the cost matrix is empty")]
    EmptyCostMatrix,
    #[error("expected {expected} supply values (one per row), got {found}")]
    SupplyLength { expected: usize, found: usize },
    #[error("expected {expected} demand values (one per column), got {found}")]
    DemandLength { expected: usize, found: usize },
    #[error("row {row} of the cost matrix has {found} entries, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("supply value {index} is negative")]
    NegativeSupply { index: usize },
    #[error("demand value {index} is negative")]
    NegativeDemand { index: usize },
}

/// The kind of dummy added while balancing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum DummyKind {
    /// A dummy origin (an additional row) absorbs excess demand.
    Supply,
    /// A dummy destination (an additional column) absorbs excess supply.
    Demand,
}

/// Information about the balancing step.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Balancing<F> {
    /// The kind of the dummy, `None` if the problem was balanced.
    pub dummy: Option<DummyKind>,
    /// The row (for [`DummyKind::Supply`]) or column (for
    /// [`DummyKind::Demand`]) index of the dummy.
    pub index: Option<usize>,
    /// The supply or demand of the dummy (zero if there is none).
    pub value: F,
    /// Total supply of the (normalized) input.
    pub total_supply: F,
    /// Total demand of the (normalized) input.
    pub total_demand: F,
    /// The reference value `max(c)` of the transformation `max(c) - c`
    /// used for maximization problems.
    pub reference: Option<F>,
}

impl<F> Balancing<F>
where
    F: Float,
{
    /// Remove the dummy row or column from a balanced matrix.
    pub fn trim_matrix<T: Clone>(&self, matrix: &[Vec<T>]) -> Vec<Vec<T>> {
        match (self.dummy, self.index) {
            (Some(DummyKind::Supply), Some(r)) => matrix
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != r)
                .map(|(_, row)| row.clone())
                .collect(),
            (Some(DummyKind::Demand), Some(c)) => matrix
                .iter()
                .map(|row| {
                    row.iter()
                        .enumerate()
                        .filter(|&(j, _)| j != c)
                        .map(|(_, x)| x.clone())
                        .collect()
                })
                .collect(),
            _ => matrix.to_vec(),
        }
    }

    /// Map a cell of the balanced tableau to the original tableau.
    ///
    /// Returns `None` if the cell lies in the dummy row or column.
    pub fn trim_cell(&self, cell: Cell) -> Option<Cell> {
        let Cell { mut row, mut column } = cell;
        match (self.dummy, self.index) {
            (Some(DummyKind::Supply), Some(r)) => {
                if row == r {
                    return None;
                }
                if row > r {
                    row -= 1;
                }
            }
            (Some(DummyKind::Demand), Some(c)) => {
                if column == c {
                    return None;
                }
                if column > c {
                    column -= 1;
                }
            }
            _ => (),
        }
        Some(Cell { row, column })
    }
}

/// A transportation problem.
///
/// Rows are origins with a supply, columns are destinations with a demand.
/// The methods for resizing keep the cost matrix, the supply and the demand
/// vectors consistent.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Problem<F> {
    /// The unit costs (or profits for maximization), one row per origin.
    pub costs: Vec<Vec<F>>,
    /// The supply of each origin.
    pub supply: Vec<F>,
    /// The demand of each destination.
    pub demand: Vec<F>,
    /// The optimization direction.
    pub objective: Objective,
}

impl<F> Problem<F>
where
    F: Float + NumAssign,
{
    /// Create a problem with `nrows` origins and `ncols` destinations.
    ///
    /// All costs, supplies and demands are zero.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Problem {
            costs: vec![vec![F::zero(); ncols]; nrows],
            supply: vec![F::zero(); nrows],
            demand: vec![F::zero(); ncols],
            objective: Objective::Minimize,
        }
    }

    /// Create a problem from a cost matrix, supplies and demands.
    pub fn from_parts(costs: Vec<Vec<F>>, supply: Vec<F>, demand: Vec<F>, objective: Objective) -> Self {
        Problem {
            costs,
            supply,
            demand,
            objective,
        }
    }

    /// The number of origins.
    pub fn num_rows(&self) -> usize {
        self.costs.len()
    }

    /// The number of destinations.
    pub fn num_columns(&self) -> usize {
        self.costs.first().map_or(0, Vec::len)
    }

    /// Set the unit cost of shipping from `row` to `column`.
    pub fn set_cost(&mut self, row: usize, column: usize, cost: F) {
        self.costs[row][column] = cost;
    }

    /// Set the supply of origin `row`.
    pub fn set_supply(&mut self, row: usize, supply: F) {
        self.supply[row] = supply;
    }

    /// Set the demand of destination `column`.
    pub fn set_demand(&mut self, column: usize, demand: F) {
        self.demand[column] = demand;
    }

    /// Append an origin with zero costs and zero supply.
    pub fn add_row(&mut self) {
        let ncols = self.num_columns();
        self.costs.push(vec![F::zero(); ncols]);
        self.supply.push(F::zero());
    }

    /// Remove the last origin.
    ///
    /// Returns `false` (and does nothing) if only one origin is left.
    pub fn remove_row(&mut self) -> bool {
        if self.num_rows() <= 1 {
            return false;
        }
        self.costs.pop();
        self.supply.pop();
        true
    }

    /// Append a destination with zero costs and zero demand.
    pub fn add_column(&mut self) {
        for row in &mut self.costs {
            row.push(F::zero());
        }
        self.demand.push(F::zero());
    }

    /// Remove the last destination.
    ///
    /// Returns `false` (and does nothing) if only one destination is left.
    pub fn remove_column(&mut self) -> bool {
        if self.num_columns() <= 1 {
            return false;
        }
        for row in &mut self.costs {
            row.pop();
        }
        self.demand.pop();
        true
    }

    /// Total supply, non-finite values count as zero.
    pub fn total_supply(&self) -> F {
        total(&self.supply)
    }

    /// Total demand, non-finite values count as zero.
    pub fn total_demand(&self) -> F {
        total(&self.demand)
    }

    /// Return `true` if total supply equals total demand.
    pub fn is_balanced(&self) -> bool {
        self.total_supply() == self.total_demand()
    }

    /// Validate, normalize and balance the problem.
    pub fn balance(&self) -> Result<Balanced<F>, ValidationError> {
        let nrows = self.num_rows();
        let ncols = self.num_columns();
        if nrows == 0 || ncols == 0 {
            return Err(ValidationError::EmptyCostMatrix);
        }
        if self.supply.len() != nrows {
            return Err(ValidationError::SupplyLength {
                expected: nrows,
                found: self.supply.len(),
            });
        }
        if self.demand.len() != ncols {
            return Err(ValidationError::DemandLength {
                expected: ncols,
                found: self.demand.len(),
            });
        }
        if let Some((row, r)) = self.costs.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(ValidationError::RaggedRow {
                row,
                expected: ncols,
                found: r.len(),
            });
        }

        let mut costs: Vec<Vec<F>> = self
            .costs
            .iter()
            .map(|row| row.iter().map(|&c| finite_or_zero(c)).collect())
            .collect();
        let mut supply: Vec<F> = self.supply.iter().map(|&s| finite_or_zero(s)).collect();
        let mut demand: Vec<F> = self.demand.iter().map(|&d| finite_or_zero(d)).collect();
        if let Some(index) = supply.iter().position(|&s| s < F::zero()) {
            return Err(ValidationError::NegativeSupply { index });
        }
        if let Some(index) = demand.iter().position(|&d| d < F::zero()) {
            return Err(ValidationError::NegativeDemand { index });
        }

        let total_supply = total(&supply);
        let total_demand = total(&demand);
        let mut balancing = Balancing {
            dummy: None,
            index: None,
            value: F::zero(),
            total_supply,
            total_demand,
            reference: None,
        };

        if total_supply > total_demand {
            for row in &mut costs {
                row.push(F::zero());
            }
            demand.push(total_supply - total_demand);
            balancing.dummy = Some(DummyKind::Demand);
            balancing.index = Some(ncols);
            balancing.value = total_supply - total_demand;
        } else if total_demand > total_supply {
            costs.push(vec![F::zero(); ncols]);
            supply.push(total_demand - total_supply);
            balancing.dummy = Some(DummyKind::Supply);
            balancing.index = Some(nrows);
            balancing.value = total_demand - total_supply;
        }

        let work_costs = match self.objective {
            Objective::Minimize => costs.clone(),
            Objective::Maximize => {
                let reference = costs
                    .iter()
                    .flatten()
                    .filter(|c| c.is_finite())
                    .fold(None, |m: Option<F>, &c| Some(m.map_or(c, |m| m.max(c))))
                    .unwrap_or_else(F::zero);
                balancing.reference = Some(reference);
                costs
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|&c| if c.is_finite() { reference - c } else { c })
                            .collect()
                    })
                    .collect()
            }
        };

        Ok(Balanced {
            costs,
            work_costs,
            supply,
            demand,
            balancing,
        })
    }
}

/// A validated, balanced transportation problem.
#[derive(Clone, Debug)]
pub struct Balanced<F> {
    /// The balanced costs as given by the user.
    pub costs: Vec<Vec<F>>,
    /// The balanced costs that are minimized, i.e. `max(c) - c` for
    /// maximization problems.
    pub work_costs: Vec<Vec<F>>,
    /// The balanced supply.
    pub supply: Vec<F>,
    /// The balanced demand.
    pub demand: Vec<F>,
    pub balancing: Balancing<F>,
}

impl<F> Balanced<F> {
    pub fn num_rows(&self) -> usize {
        self.supply.len()
    }

    pub fn num_columns(&self) -> usize {
        self.demand.len()
    }
}

fn finite_or_zero<F: Float>(x: F) -> F {
    if x.is_finite() {
        x
    } else {
        F::zero()
    }
}

fn total<F: Float>(values: &[F]) -> F {
    values.iter().fold(F::zero(), |acc, &x| acc + finite_or_zero(x))
}
