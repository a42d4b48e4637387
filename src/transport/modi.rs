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

//! The MODI (modified distribution) method.

use super::basis::{Basis, Cell, CellStatus};
use super::cycle::stepping_stone;
use super::northwest::northwest_corner;
use super::potentials::{potentials, reduced_costs};
use super::problem::{Objective, Problem, ValidationError};
use super::solution::{IterationRecord, Solution};
use super::Termination;
use log::{debug, info, warn};
use num_traits::{Float, NumAssign};
use std::fmt::Debug;

/// A transportation problem solver.
///
/// The solver starts with the northwest-corner plan and improves it by MODI
/// pivots until no cell has a negative reduced cost. The iteration is
/// stopped early after `max_iterations` iterations or after
/// `max_degenerate_pivots` consecutive pivots that do not move any flow. In
/// both cases the current (feasible, but possibly suboptimal) plan is
/// returned.
///
/// # Example
///
/// ```
/// use rs_transport::transport::{Objective, Problem, TransportSimplex};
///
/// let problem = Problem::from_parts(
///     vec![vec![2.0, 1.0], vec![1.0, 3.0]],
///     vec![5.0, 5.0],
///     vec![5.0, 5.0],
///     Objective::Minimize,
/// );
///
/// let mut spx = TransportSimplex::new();
/// let sol = spx.solve(&problem).unwrap();
/// assert!(sol.is_optimal());
/// assert_eq!(sol.allocation, vec![vec![0.0, 5.0], vec![5.0, 0.0]]);
/// assert_eq!(sol.total_cost, 10.0);
/// assert_eq!(spx.num_pivots(), 1);
/// ```
pub struct TransportSimplex<F> {
    /// Values `<= eps` are considered zero. Defaults to `1e-9`.
    pub eps: F,
    /// The maximal number of iterations. Defaults to `50`.
    pub max_iterations: usize,
    /// The number of consecutive pivots with zero step length after which
    /// the iteration is stopped. Defaults to `2`.
    pub max_degenerate_pivots: usize,

    npivots: usize,
}

impl<F> Default for TransportSimplex<F>
where
    F: Float + NumAssign + Debug,
{
    fn default() -> Self {
        TransportSimplex {
            eps: F::from(1e-9).unwrap_or_else(F::epsilon),
            max_iterations: 50,
            max_degenerate_pivots: 2,
            npivots: 0,
        }
    }
}

impl<F> TransportSimplex<F>
where
    F: Float + NumAssign + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of pivots of the latest computation.
    pub fn num_pivots(&self) -> usize {
        self.npivots
    }

    /// Solve a transportation problem.
    ///
    /// Returns an error if the problem is malformed. Otherwise a feasible
    /// plan is always returned, [`Solution::termination`] tells whether it
    /// is optimal.
    pub fn solve(&mut self, problem: &Problem<F>) -> Result<Solution<F>, ValidationError> {
        let balanced = problem.balance()?;
        let costs = &balanced.work_costs;
        self.npivots = 0;

        let (mut x, mut basis) = northwest_corner(&balanced.supply, &balanced.demand, self.eps);
        let npadded = basis.pad();
        if npadded > 0 {
            debug!("Initial plan is degenerate, added {} artificial cells", npadded);
        }

        let mut iterations = Vec::new();
        let mut ndegenerate = 0;
        let mut termination = Termination::IterationLimit;

        for step in 1..=self.max_iterations {
            let pot = potentials(costs, &basis);
            let (delta, entering) = reduced_costs(costs, &pot, &basis, self.eps);
            let entering = if pot.resolved { entering } else { None };

            iterations.push(IterationRecord {
                step,
                allocation: x.clone(),
                reduced_costs: delta,
                entering,
            });

            if !pot.resolved {
                warn!("Potentials could not be computed, the basis is not connected");
                termination = Termination::UnresolvedPotentials;
                break;
            }

            let entering = match entering {
                Some(cell) => cell,
                None => {
                    termination = Termination::Optimal;
                    break;
                }
            };

            let cycle = match stepping_stone(&basis, entering) {
                Some(cycle) => cycle,
                None => {
                    warn!("No stepping-stone cycle for entering cell {:?}", entering);
                    termination = Termination::NoCycle;
                    break;
                }
            };

            let mut theta = step_length(&x, &cycle);
            if theta <= self.eps {
                ndegenerate += 1;
                if ndegenerate >= self.max_degenerate_pivots {
                    warn!("Stopped after {} consecutive degenerate pivots", ndegenerate);
                    termination = Termination::Degenerate;
                    break;
                }
                theta = F::zero();
            } else {
                ndegenerate = 0;
            }

            debug!(
                "Iteration {}: entering cell {:?}, cycle length {}, theta {:?}",
                step,
                entering,
                cycle.len() - 1,
                theta
            );

            self.pivot(&mut x, &mut basis, &cycle, theta);
            self.npivots += 1;
        }

        if termination == Termination::IterationLimit {
            info!("Iteration limit of {} reached", self.max_iterations);
        }

        let total_cost = x
            .iter()
            .zip(balanced.costs.iter())
            .flat_map(|(xs, cs)| xs.iter().zip(cs.iter()))
            .fold(F::zero(), |s, (&x, &c)| s + x * c);

        info!(
            "Transportation problem finished: {:?} after {} pivots, value {:?}",
            termination, self.npivots, total_cost
        );

        let balancing = balanced.balancing;
        Ok(Solution {
            total_cost,
            allocation: balancing.trim_matrix(&x),
            objective: problem.objective,
            iterations: iterations.iter().map(|r| r.trim(&balancing)).collect(),
            balancing,
            termination,
        })
    }

    /// Move `theta` units around the cycle.
    ///
    /// Cells at even positions gain flow, cells at odd positions lose flow.
    /// Losing cells that drop to zero leave the basis. If this leaves too few
    /// cells, the basis is padded again.
    fn pivot(&self, x: &mut [Vec<F>], basis: &mut Basis, cycle: &[Cell], theta: F) {
        let entering = cycle[0];
        for (k, &Cell { row: i, column: j }) in cycle[..cycle.len() - 1].iter().enumerate() {
            if k % 2 == 0 {
                x[i][j] += theta;
                if x[i][j] > self.eps {
                    basis.set(Cell::new(i, j), CellStatus::Basic);
                }
            } else {
                x[i][j] -= theta;
                if x[i][j] <= self.eps {
                    x[i][j] = F::zero();
                    basis.set(Cell::new(i, j), CellStatus::NonBasic);
                }
            }
        }

        let status = if x[entering.row][entering.column] > self.eps {
            CellStatus::Basic
        } else {
            CellStatus::Artificial
        };
        basis.set(entering, status);

        let npadded = basis.pad();
        if npadded > 0 {
            debug!("Degenerate pivot, added {} artificial cells", npadded);
        }
    }
}

/// The largest amount that can be moved around the cycle.
///
/// This is the minimal flow on the odd (losing) positions of the cycle.
fn step_length<F: Float>(x: &[Vec<F>], cycle: &[Cell]) -> F {
    cycle[..cycle.len() - 1]
        .iter()
        .skip(1)
        .step_by(2)
        .map(|c| x[c.row][c.column])
        .fold(F::infinity(), F::min)
}

/// Solve a transportation problem with default settings.
///
/// This is a convenience wrapper around [`TransportSimplex::solve`].
///
/// # Example
///
/// ```
/// use rs_transport::transport::{solve, DummyKind, Objective};
///
/// let sol = solve(vec![vec![1.0], vec![2.0]], vec![10.0, 20.0], vec![5.0], Objective::Minimize).unwrap();
/// assert_eq!(sol.balancing.dummy, Some(DummyKind::Demand));
/// assert_eq!(sol.balancing.value, 25.0);
/// assert_eq!(sol.allocation, vec![vec![5.0], vec![0.0]]);
/// assert_eq!(sol.total_cost, 5.0);
/// ```
pub fn solve<F>(
    costs: Vec<Vec<F>>,
    supply: Vec<F>,
    demand: Vec<F>,
    objective: Objective,
) -> Result<Solution<F>, ValidationError>
where
    F: Float + NumAssign + Debug,
{
    TransportSimplex::new().solve(&Problem::from_parts(costs, supply, demand, objective))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::potentials::ReducedCost;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn step_length_uses_odd_positions() {
        let x = vec![vec![0.0, 4.0], vec![3.0, 9.0]];
        let cycle = vec![
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(1, 1),
            Cell::new(1, 0),
            Cell::new(0, 0),
        ];
        assert_eq!(step_length(&x, &cycle), 3.0);
    }

    #[test]
    fn pivot_updates_basis() {
        let spx = TransportSimplex::<f64>::new();
        let mut x = vec![vec![5.0, 5.0], vec![0.0, 5.0]];
        let mut basis = Basis::new(2, 2);
        basis.set(Cell::new(0, 0), CellStatus::Basic);
        basis.set(Cell::new(0, 1), CellStatus::Basic);
        basis.set(Cell::new(1, 1), CellStatus::Basic);
        let cycle = stepping_stone(&basis, Cell::new(1, 0)).unwrap();
        assert_eq!(
            cycle,
            vec![
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(0, 1),
                Cell::new(0, 0),
                Cell::new(1, 0)
            ]
        );

        spx.pivot(&mut x, &mut basis, &cycle, 5.0);
        assert_eq!(x, vec![vec![0.0, 10.0], vec![5.0, 0.0]]);
        // both (1,1) and (0,0) drop to zero, one of them is replaced
        assert_eq!(basis.len(), 3);
        assert_eq!(basis.status(Cell::new(1, 0)), CellStatus::Basic);
        assert_eq!(basis.status(Cell::new(0, 1)), CellStatus::Basic);
        assert_eq!(basis.status(Cell::new(0, 0)), CellStatus::Artificial);
        assert_eq!(basis.status(Cell::new(1, 1)), CellStatus::NonBasic);
    }

    #[test]
    fn degenerate_pivot_keeps_entering_cell() {
        let spx = TransportSimplex::<f64>::new();
        let mut x = vec![vec![5.0, 5.0], vec![0.0, 0.0]];
        let mut basis = Basis::new(2, 2);
        basis.set(Cell::new(0, 0), CellStatus::Basic);
        basis.set(Cell::new(0, 1), CellStatus::Basic);
        basis.set(Cell::new(1, 1), CellStatus::Artificial);
        let cycle = stepping_stone(&basis, Cell::new(1, 0)).unwrap();
        assert_eq!(step_length(&x, &cycle), 0.0);

        spx.pivot(&mut x, &mut basis, &cycle, 0.0);
        assert_eq!(x, vec![vec![5.0, 5.0], vec![0.0, 0.0]]);
        assert_eq!(basis.len(), 3);
        assert_eq!(basis.status(Cell::new(1, 0)), CellStatus::Artificial);
        assert_eq!(basis.status(Cell::new(1, 1)), CellStatus::NonBasic);
    }

    #[test]
    fn solve_with_pivots() {
        init();
        let problem = Problem::from_parts(
            vec![
                vec![19.0, 30.0, 50.0, 10.0],
                vec![70.0, 30.0, 40.0, 60.0],
                vec![40.0, 8.0, 70.0, 20.0],
            ],
            vec![7.0, 9.0, 18.0],
            vec![5.0, 8.0, 7.0, 14.0],
            Objective::Minimize,
        );
        let mut spx = TransportSimplex::new();
        let sol = spx.solve(&problem).unwrap();

        assert_eq!(sol.termination, Termination::Optimal);
        assert_eq!(sol.total_cost, 743.0);
        assert_eq!(
            sol.allocation,
            vec![
                vec![5.0, 0.0, 0.0, 2.0],
                vec![0.0, 2.0, 7.0, 0.0],
                vec![0.0, 6.0, 0.0, 12.0],
            ]
        );
        assert_eq!(spx.num_pivots(), 2);
        assert_eq!(sol.iterations.len(), 3);
        assert_eq!(
            sol.iterations[0].allocation,
            vec![
                vec![5.0, 2.0, 0.0, 0.0],
                vec![0.0, 6.0, 3.0, 0.0],
                vec![0.0, 0.0, 4.0, 14.0],
            ]
        );
        let last = sol.iterations.last().unwrap();
        assert_eq!(last.entering, None);
        assert_eq!(last.allocation, sol.allocation);
        assert!(last
            .reduced_costs
            .iter()
            .flatten()
            .all(|d| d.value().map_or(true, |d| d >= -1e-9)));
    }

    #[test]
    fn iteration_limit() {
        init();
        let problem = Problem::from_parts(
            vec![
                vec![19.0, 30.0, 50.0, 10.0],
                vec![70.0, 30.0, 40.0, 60.0],
                vec![40.0, 8.0, 70.0, 20.0],
            ],
            vec![7.0, 9.0, 18.0],
            vec![5.0, 8.0, 7.0, 14.0],
            Objective::Minimize,
        );
        let mut spx = TransportSimplex::new();
        spx.max_iterations = 1;
        let sol = spx.solve(&problem).unwrap();

        assert_eq!(sol.termination, Termination::IterationLimit);
        assert_eq!(sol.iterations.len(), 1);
        assert!(sol.iterations[0].entering.is_some());
        assert_eq!(spx.num_pivots(), 1);
        assert_eq!(sol.total_cost, 807.0);
        assert_eq!(sol.row_sums(), vec![7.0, 9.0, 18.0]);
        assert_eq!(sol.column_sums(), vec![5.0, 8.0, 7.0, 14.0]);

        spx.max_iterations = 0;
        let sol = spx.solve(&problem).unwrap();
        assert_eq!(sol.termination, Termination::IterationLimit);
        assert!(sol.iterations.is_empty());
        assert_eq!(sol.total_cost, 1015.0);
    }

    #[test]
    fn zero_problem() {
        init();
        let problem = Problem::<f64>::new(3, 3);
        let mut spx = TransportSimplex::new();
        let sol = spx.solve(&problem).unwrap();
        assert!(sol.is_optimal());
        assert_eq!(spx.num_pivots(), 0);
        assert_eq!(sol.total_cost, 0.0);
        assert_eq!(sol.allocation, vec![vec![0.0; 3]; 3]);
        // the empty plan is padded to the first row and column
        let delta = &sol.iterations[0].reduced_costs;
        assert!(delta[0].iter().all(ReducedCost::is_basic));
        assert!(delta.iter().all(|row| row[0].is_basic()));
        assert_eq!(delta[1][1], ReducedCost::Value(0.0));
    }
}
