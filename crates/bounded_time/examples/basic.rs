// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! This example demonstrates the basic usage of bounded time values.

use std::time::Duration;

use bounded_time::{DurationExt, Hours, Microseconds, Minutes, Seconds, Time, time};

fn main() -> Result<(), bounded_time::Error> {
    // Build times from unit-labeled literals. The bounds are inferred from the first and last unit.
    let warmup: Time<Microseconds, Minutes> = time![10 us, 20 ms, 0 s, 1 min];
    let run: Time<Microseconds, Hours> = time![990 us, 980 ms, 20 s, 10 min, 2 h];

    // Adding times with different bounds produces a time covering both.
    let total = warmup + run;
    println!("Total: {total}");
    println!("Total in microseconds: {}", total.total::<Microseconds>());

    // Narrow the time to seconds and minutes. Hours fold into minutes, sub-second units are dropped.
    let coarse: Time<Seconds, Minutes> = total.convert();
    println!("Coarse: {coarse}");

    // Subtraction borrows from coarser units, so only the coarsest unit can be negative.
    let deficit = time![20 s, 0 min] - time![50 s, 1 min];
    println!("Deficit: {deficit}");

    // Parse the text format, with unit names or symbols.
    let parsed: Time<Seconds, Hours> = "[ 75 s; 59 min; 1 h ]".parse()?;
    println!("Parsed and normalized: {parsed}");

    // Convert from and to `Duration`.
    let from_duration: Time<Seconds, Hours> = Duration::from_secs(3_725).to_time()?;
    let back = Duration::try_from(from_duration)?;
    println!("{from_duration} is {}s", back.as_secs());

    Ok(())
}
