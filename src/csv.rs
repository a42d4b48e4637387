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

//! Reading and writing transportation problems in CSV format.
//!
//! A file contains exactly one problem and must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. fields are separated by `,`, `;` or tabs
//! 3. the first line is the header `,<D1>,...,<Dn>,Supply`. Only the number
//!    of fields is used, it determines the number of destinations `n`.
//! 4. each following line except the last describes one origin
//!    `<name>,<c1>,...,<cn>,<supply>` and must have as many fields as the
//!    header
//! 5. the last line is the demand line `<name>,<d1>,...,<dn>[,<objective>]`.
//!    If the last field starts with `min` or `max` it determines the
//!    objective, otherwise the problem is minimized.
//!
//! Fields that are not finite numbers are read as zero.
//!
//! # Example
//!
//! ```
//! use rs_transport::csv;
//! use rs_transport::transport::{Objective, Problem};
//!
//! let data = ",D1,D2,Supply\nO1,4,6,20\nO2,3,5,30\nDemand,25,25,minimize\n";
//! let problem: Problem<f64> = csv::read(data.as_bytes()).unwrap();
//!
//! assert_eq!(problem.costs, vec![vec![4.0, 6.0], vec![3.0, 5.0]]);
//! assert_eq!(problem.supply, vec![20.0, 30.0]);
//! assert_eq!(problem.demand, vec![25.0, 25.0]);
//! assert_eq!(problem.objective, Objective::Minimize);
//! ```

use crate::transport::{Objective, Problem, Solution};
use num_traits::{Float, NumAssign};
use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::str::FromStr;
use thiserror::Error;

/// Error when reading a file in CSV format.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Format error on line {line}: {msg}")]
    Format { line: usize, msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// A non-empty line split into trimmed fields.
struct Fields {
    line: usize,
    fields: Vec<String>,
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(|c| c == ',' || c == ';' || c == '\t')
        .map(|f| f.trim().to_string())
        .collect()
}

fn number<F>(field: &str) -> F
where
    F: Float + FromStr,
{
    field.parse::<F>().ok().filter(|x| x.is_finite()).unwrap_or_else(F::zero)
}

/// Read a transportation problem.
pub fn read<R, F>(r: R) -> Result<Problem<F>>
where
    R: Read,
    F: Float + NumAssign + FromStr,
{
    let mut lines = Vec::new();
    for (i, line) in BufReader::new(r).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        lines.push(Fields {
            line: i + 1,
            fields: split_fields(&line),
        });
    }

    if lines.len() < 2 {
        return Err(Error::Format {
            line: lines.first().map_or(0, |l| l.line),
            msg: "expected a header line and a demand line".to_string(),
        });
    }

    let header = &lines[0];
    let width = header.fields.len();
    if width < 3 {
        return Err(Error::Format {
            line: header.line,
            msg: format!("header must have at least 3 fields, got {}", width),
        });
    }
    let ncols = width - 2;

    let mut costs: Vec<Vec<F>> = Vec::with_capacity(lines.len() - 2);
    let mut supply: Vec<F> = Vec::with_capacity(lines.len() - 2);
    for row in &lines[1..lines.len() - 1] {
        if row.fields.len() != width {
            return Err(Error::Format {
                line: row.line,
                msg: format!("expected {} fields (like the header), got {}", width, row.fields.len()),
            });
        }
        costs.push(row.fields[1..=ncols].iter().map(|f| number(f)).collect());
        supply.push(number(&row.fields[width - 1]));
    }

    let last = &lines[lines.len() - 1];
    if last.fields.len() < ncols + 1 {
        return Err(Error::Format {
            line: last.line,
            msg: format!(
                "incomplete demand line, expected {} values, got {}",
                ncols,
                last.fields.len() - 1
            ),
        });
    }
    let demand: Vec<F> = last.fields[1..=ncols].iter().map(|f| number(f)).collect();
    let objective = last
        .fields
        .last()
        .and_then(|f| f.parse::<Objective>().ok())
        .unwrap_or_default();

    Ok(Problem::from_parts(costs, supply, demand, objective))
}

/// Read a transportation problem from a named file.
pub fn read_from_file<F>(filename: &str) -> Result<Problem<F>>
where
    F: Float + NumAssign + FromStr,
{
    read(std::fs::File::open(filename)?)
}

/// Write a transportation problem.
pub fn write<W, F>(mut w: W, problem: &Problem<F>) -> io::Result<()>
where
    W: Write,
    F: Display,
{
    let ncols = problem.demand.len();
    for j in 0..ncols {
        write!(w, ",D{}", j + 1)?;
    }
    writeln!(w, ",Supply")?;

    for (i, (row, s)) in problem.costs.iter().zip(problem.supply.iter()).enumerate() {
        write!(w, "O{}", i + 1)?;
        for c in row {
            write!(w, ",{}", c)?;
        }
        writeln!(w, ",{}", s)?;
    }

    write!(w, "Demand")?;
    for d in &problem.demand {
        write!(w, ",{}", d)?;
    }
    writeln!(w, ",{}", problem.objective)?;

    Ok(())
}

/// Write a transportation problem to a named file.
pub fn write_to_file<F>(filename: &str, problem: &Problem<F>) -> io::Result<()>
where
    F: Display,
{
    write(&mut std::fs::File::create(filename)?, problem)
}

/// Write the plan of a solution.
///
/// The plan is written in the same layout as the problem: one line per
/// origin with the amounts shipped to each destination, followed by a line
/// `Total,<value>` with the objective value.
pub fn write_solution<W, F>(mut w: W, solution: &Solution<F>) -> io::Result<()>
where
    W: Write,
    F: Float + Display,
{
    let ncols = solution.allocation.first().map_or(0, Vec::len);
    for j in 0..ncols {
        write!(w, ",D{}", j + 1)?;
    }
    writeln!(w)?;

    for (i, row) in solution.allocation.iter().enumerate() {
        write!(w, "O{}", i + 1)?;
        for x in row {
            write!(w, ",{}", x)?;
        }
        writeln!(w)?;
    }
    writeln!(w, "Total,{}", solution.total_cost)?;

    Ok(())
}

/// Write the plan of a solution to a named file.
pub fn write_solution_to_file<F>(filename: &str, solution: &Solution<F>) -> io::Result<()>
where
    F: Float + Display,
{
    write_solution(&mut std::fs::File::create(filename)?, solution)
}

#[cfg(test)]
mod tests {
    use super::{read, write, Error};
    use crate::transport::{Objective, Problem};

    #[test]
    fn separators_and_blank_lines() {
        let data = "\n;D1;D2;Supply\r\nO1\t1\t2\t10\n\n O2 , 3 , 4 , 5\nDemand,7,8,MAX\n";
        let p: Problem<f64> = read(data.as_bytes()).unwrap();
        assert_eq!(p.costs, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(p.supply, vec![10.0, 5.0]);
        assert_eq!(p.demand, vec![7.0, 8.0]);
        assert_eq!(p.objective, Objective::Maximize);
    }

    #[test]
    fn non_numeric_fields_are_zero() {
        let data = ",A,B\nx,abc,\ny,inf\n";
        let p: Problem<f64> = read(data.as_bytes()).unwrap();
        assert_eq!(p.costs, vec![vec![0.0]]);
        assert_eq!(p.supply, vec![0.0]);
        assert_eq!(p.demand, vec![0.0]);
        assert_eq!(p.objective, Objective::Minimize);
    }

    #[test]
    fn objective_defaults_to_minimize() {
        let data = ",D1,Supply\nO1,1,5\nDemand,5\n";
        let p: Problem<f64> = read(data.as_bytes()).unwrap();
        assert_eq!(p.objective, Objective::Minimize);
        assert_eq!(p.demand, vec![5.0]);
    }

    #[test]
    fn format_errors() {
        let err = |data: &str| match read::<_, f64>(data.as_bytes()) {
            Err(Error::Format { line, .. }) => line,
            _ => panic!("expected format error for {:?}", data),
        };
        assert_eq!(err(""), 0);
        assert_eq!(err("\n,D1,Supply\n"), 2);
        assert_eq!(err(",Supply\nDemand,1\n"), 1);
        assert_eq!(err(",D1,Supply\nO1,1\nDemand,1\n"), 2);
        assert_eq!(err(",D1,D2,Supply\nO1,1,2,3\nDemand,1\n"), 3);
    }

    #[test]
    fn write_problem() {
        let p = Problem::from_parts(
            vec![vec![4.0, 6.0], vec![3.0, 5.5]],
            vec![20.0, 30.0],
            vec![25.0, 25.0],
            Objective::Maximize,
        );
        let mut buf = Vec::new();
        write(&mut buf, &p).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            ",D1,D2,Supply\nO1,4,6,20\nO2,3,5.5,30\nDemand,25,25,maximize\n"
        );
    }
}
