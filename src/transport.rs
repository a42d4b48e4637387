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

//! Transportation problems.
//!
//! A transportation problem ships goods from a set of origins (rows) with
//! given supplies to a set of destinations (columns) with given demands.
//! Each unit shipped from origin `i` to destination `j` costs `c[i][j]`.
//!
//! The problem is solved by the classical two-phase tableau method:
//!
//! 1. an initial basic feasible plan is built with the
//!    [northwest-corner rule][northwest::northwest_corner],
//! 2. the plan is improved by the MODI (modified distribution) method:
//!    [potentials][potentials::potentials] are derived from the basis,
//!    [reduced costs][potentials::reduced_costs] select an entering cell
//!    and flow is moved around the [stepping-stone
//!    cycle][cycle::stepping_stone] of that cell.
//!
//! # Example
//!
//! ```
//! use rs_transport::transport::{solve, Objective};
//!
//! let sol = solve(
//!     vec![vec![4.0, 6.0], vec![3.0, 5.0]],
//!     vec![20.0, 30.0],
//!     vec![25.0, 25.0],
//!     Objective::Minimize,
//! )
//! .unwrap();
//!
//! assert!(sol.is_optimal());
//! assert_eq!(sol.total_cost, 220.0);
//! assert_eq!(sol.allocation, vec![vec![20.0, 0.0], vec![5.0, 25.0]]);
//! ```

pub mod basis;
pub mod cycle;
pub mod modi;
pub mod northwest;
pub mod potentials;
pub mod problem;
pub mod solution;

pub use self::basis::{Basis, Cell, CellStatus};
pub use self::modi::{solve, TransportSimplex};
pub use self::potentials::{Potentials, ReducedCost};
pub use self::problem::{Balancing, DummyKind, Objective, Problem, ValidationError};
pub use self::solution::{IterationRecord, Solution};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The reason the MODI iteration stopped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Termination {
    /// No cell has a negative reduced cost, the plan is optimal.
    Optimal,
    /// The iteration limit has been reached.
    IterationLimit,
    /// Too many consecutive pivots did not move any flow.
    Degenerate,
    /// No stepping-stone cycle through the entering cell exists.
    ///
    /// This means the basis is not a spanning tree.
    NoCycle,
    /// Some potentials could not be derived from the basis.
    ///
    /// This means the basis is not connected.
    UnresolvedPotentials,
}

impl Termination {
    /// Return `true` if the plan is known to be optimal.
    pub fn is_optimal(self) -> bool {
        self == Termination::Optimal
    }
}
