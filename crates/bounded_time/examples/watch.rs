// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! This example demonstrates watches, using a frozen clock so it runs instantly.

use bounded_time::{Clock, TimerMode, Watch, time};

fn main() -> Result<(), bounded_time::Error> {
    // Pretend it is 08:59:59.
    let clock = Clock::new_frozen_at(time![59 s, 59 min, 8 h]);
    println!("now: {}", clock.now());

    // Fire at 09:00:00, one second from now.
    let watch = Watch::new(&clock, time![0 s, 0 min, 9 h], TimerMode::Background, || {
        println!("it is nine o'clock");
    })?;
    println!("waiting {:?}", watch.remaining());
    watch.wait();

    // Targets in the past fire immediately.
    let watch = Watch::new(&clock, time![30 min, 8 h], TimerMode::Blocking, || println!("late, firing now"))?;
    println!("remaining: {:?}, elapsed: {}", watch.remaining(), watch.elapsed());

    // The real clock reads the local time of day.
    println!("local time of day: {}", Clock::new_system().now());

    Ok(())
}
