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

use num_traits::{Float, NumAssign};
use rs_transport::csv;
use rs_transport::transport::{DummyKind, Objective, TransportSimplex};
use std::error::Error;
use std::fmt::{Debug, Display};
use std::io::Write;
use std::path::PathBuf;
use std::result::Result;
use std::str::FromStr;

use rustop::opts;
use time::OffsetDateTime;

struct Options {
    maximize: bool,
    max_iterations: Option<usize>,
    trace: bool,
    write: bool,
}

fn run<F>(filename: &str, options: &Options) -> Result<(), Box<dyn Error>>
where
    F: Float + NumAssign + FromStr + Display + Debug,
{
    let tstart = OffsetDateTime::now_utc();
    let mut problem = csv::read_from_file::<F>(filename)?;
    if options.maximize {
        problem.objective = Objective::Maximize;
    }
    let tend = OffsetDateTime::now_utc();

    println!("Instance            : {}", filename);
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Value type          : {}", std::any::type_name::<F>());
    println!("Number of origins   : {}", problem.num_rows());
    println!("Number of dest.     : {}", problem.num_columns());
    println!("Objective           : {}", problem.objective);

    let mut spx = TransportSimplex::new();
    if let Some(maxiter) = options.max_iterations {
        spx.max_iterations = maxiter;
    }

    let tstart = OffsetDateTime::now_utc();
    let sol = spx.solve(&problem)?;
    let tend = OffsetDateTime::now_utc();
    let soltime = (tend - tstart).as_seconds_f64();

    match sol.balancing.dummy {
        Some(DummyKind::Supply) => println!("Dummy origin        : {}", sol.balancing.value),
        Some(DummyKind::Demand) => println!("Dummy destination   : {}", sol.balancing.value),
        None => (),
    }

    if options.trace {
        for rec in &sol.iterations {
            println!();
            print!("{}", rec);
        }
    }

    println!();
    println!("Termination         : {:?}", sol.termination);
    println!("Value               : {:.2}", sol.total_cost);
    println!("Time (seconds)      : {:.2}", soltime);
    println!("Pivots              : {}", spx.num_pivots());

    if options.write {
        println!();
        println!("Write solution to   : {}.sol", filename);

        let solfile = PathBuf::from(format!("{}.sol", filename));
        let f = &mut std::fs::File::create(&solfile)?;
        let fname = solfile
            .file_name()
            .map(|s| s.to_string_lossy())
            .unwrap_or_else(|| "".into());
        writeln!(f, "# Solved with the MODI method")?;
        writeln!(f, "# instance        : {}", fname)?;
        writeln!(f, "# solution time   : {:.2} seconds", soltime)?;
        writeln!(f, "# number of pivots: {}", spx.num_pivots())?;
        csv::write_solution(f, &sol)?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a transportation problem with the MODI method.";
        param file:String, desc:"Instance file name (CSV)";
        opt maximize:bool, desc:"Maximize (overrides the objective of the file)";
        opt max_iterations:Option<usize>, desc:"Maximal number of iterations";
        opt trace:bool, desc:"Print the tableau of every iteration";
        opt write:bool, desc:"Write the solution to <file>.sol";
        opt single_precision:bool, desc:"Use single precision floating point values";
    }
    .parse_or_exit();

    let options = Options {
        maximize: args.maximize,
        max_iterations: args.max_iterations,
        trace: args.trace,
        write: args.write,
    };

    if args.single_precision {
        run::<f32>(&args.file, &options)
    } else {
        run::<f64>(&args.file, &options)
    }
}
