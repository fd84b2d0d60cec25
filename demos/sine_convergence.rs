//! Integrates sin(x) from 0 to pi with the midpoint rule and checks that the error falls off like
//! n^-2. Pass a file name to store the samples as JSON for plotting.
use midquad::callbacks::{Callback, FileWriterCallback, SinkCallback};
use midquad::convergence::{check_convergence, linear_sweep};
use midquad::integrate_midpoint;

use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let integral = integrate_midpoint(&f64::sin, 0.0, PI, 1000)?;
    println!("I(n=1000) = {:.16} (exact: 2)", integral);

    // n = 10, 20, ..., 1000
    let sweep = linear_sweep(10, 1000, 10)?;

    let callback: Box<dyn Callback<f64>> = match std::env::args().nth(1) {
        Some(path) => Box::new(FileWriterCallback::new(path)),
        None => Box::new(SinkCallback {}),
    };

    let report = check_convergence(&f64::sin, 0.0, PI, 2.0, &sweep, callback.as_ref())?;

    for sample in report.samples().iter().step_by(10) {
        println!("n={:>4} |err|={:e}", sample.n(), sample.error());
    }

    println!(
        "\nfitted slope of ln|err| vs ln n: {:.5} (expected -2)",
        report.slope()
    );

    Ok(())
}
