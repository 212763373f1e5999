// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! This example demonstrates blocking and background timers.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use bounded_time::{Timer, TimerMode, time};
use tracing::Level;

fn main() -> Result<(), bounded_time::Error> {
    // Print the debug events emitted by the timers.
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let start = Instant::now();

    // A blocking timer sleeps on the calling thread and returns after the callback ran.
    let timer = Timer::new(time![250 ms, 0 s], TimerMode::Blocking, || println!("blocking timer fired"))?;
    println!("blocking timer elapsed: {} after {:?}", timer.elapsed(), start.elapsed());

    // A background timer returns immediately. The callback runs on its own thread.
    let (sender, receiver) = mpsc::channel();
    let timer = Timer::new(time![500 ms, 0 s], TimerMode::Background, move || {
        let _ = sender.send(Instant::now());
    })?;
    println!("background timer elapsed right away: {}", timer.elapsed());

    if let Ok(fired_at) = receiver.recv_timeout(Duration::from_secs(5)) {
        println!("background timer fired after {:?}", fired_at.duration_since(start));
    }
    timer.wait();

    // A background timer can be cancelled before it fires.
    let timer = Timer::new(time![0 min, 1 h], TimerMode::Background, || println!("never printed"))?;
    println!("cancelled: {}", timer.cancel());
    timer.wait();

    Ok(())
}
