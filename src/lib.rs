// Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! A library for solving transportation problems.
//!
//! The initial plan is computed by the northwest-corner rule and improved by
//! the MODI method. Every iteration is recorded so that the progress of the
//! method can be displayed step by step.

// # Algorithms
pub mod transport;
pub use self::transport::{solve, Objective, Problem, Solution, Termination, TransportSimplex};

// # File formats
#[cfg(feature = "csv")]
pub mod csv;
