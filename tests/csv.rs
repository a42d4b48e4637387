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

use std::error::Error;
use std::fs::{read_dir, read_to_string};
use std::path::Path;

use rs_transport::csv;
use rs_transport::transport::{Objective, Problem, TransportSimplex};

#[test]
fn test_csv_instances() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut ninstances = 0;
    for entry in read_dir(Path::new("tests/csv"))? {
        let entry = entry?;
        if !entry.path().extension().map(|ext| ext == "csv").unwrap_or(false) {
            continue;
        }

        let problem: Problem<f64> = csv::read_from_file(&entry.path().to_string_lossy())?;
        let sol = TransportSimplex::new().solve(&problem)?;
        assert!(sol.is_optimal(), "{:?} not solved to optimality", entry.path());

        let mut buf = Vec::new();
        csv::write_solution(&mut buf, &sol)?;
        let expected = read_to_string(entry.path().with_extension("sol"))
            .map_err(|_| format!("Can't find solution file for {:?}", entry.path()))?;
        assert_eq!(String::from_utf8(buf)?, expected, "wrong solution for {:?}", entry.path());
        ninstances += 1;
    }
    assert_eq!(ninstances, 4);

    Ok(())
}

#[test]
fn test_objective_from_file() -> Result<(), Box<dyn Error>> {
    let p: Problem<f64> = csv::read_from_file("tests/csv/profit.csv")?;
    assert_eq!(p.objective, Objective::Maximize);
    assert_eq!(p.num_rows(), 3);
    assert_eq!(p.num_columns(), 4);

    let p: Problem<f64> = csv::read_from_file("tests/csv/shortage.csv")?;
    assert_eq!(p.objective, Objective::Minimize);
    assert!(!p.is_balanced());
    Ok(())
}

#[test]
fn test_write_and_read() -> Result<(), Box<dyn Error>> {
    let p: Problem<f64> = csv::read_from_file("tests/csv/plants.csv")?;

    let mut buf = Vec::new();
    csv::write(&mut buf, &p)?;
    let text = String::from_utf8(buf)?;
    assert!(text.starts_with(",D1,D2,D3,D4,Supply\nO1,8,6,10,9,35\n"));
    assert!(text.ends_with("Demand,45,20,30,30,minimize\n"));

    let q: Problem<f64> = csv::read(text.as_bytes())?;
    assert_eq!(p, q);
    Ok(())
}

#[test]
fn test_missing_file() {
    match csv::read_from_file::<f64>("tests/csv/does-not-exist.csv") {
        Err(csv::Error::Io(_)) => (),
        _ => panic!("expected an I/O error"),
    }
}
