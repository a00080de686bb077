/*!
 * Sample data for the data section.
 *
 * Tables hold uniform values in [0, 1); chart series hold standard-normal
 * values. Everything is drawn from the session RNG so a fixed seed gives a
 * reproducible page.
 */

use rand::Rng;

use crate::surface::{DataFrame, LineSeries};

/// Column names of the sample table
pub const TABLE_COLUMNS: [&str; 2] = ["col_a", "col_b"];

/// Series names of the sample chart
pub const CHART_SERIES: [&str; 3] = ["a", "b", "c"];

/// Table of `rows` rows with uniform values for each of `columns`
pub fn uniform_frame<R: Rng>(rng: &mut R, rows: usize, columns: &[&str]) -> DataFrame {
    DataFrame {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: (0..rows)
            .map(|_| columns.iter().map(|_| rng.random::<f64>()).collect())
            .collect(),
    }
}

/// One standard-normal series of `points` values per name
pub fn normal_series<R: Rng>(rng: &mut R, points: usize, names: &[&str]) -> LineSeries {
    names
        .iter()
        .map(|name| {
            let values = (0..points).map(|_| standard_normal(rng)).collect();
            (name.to_string(), values)
        })
        .collect()
}

/// Draw from N(0, 1) with the Box-Muller transform
pub fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - u keeps the logarithm argument in (0, 1]
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
