//! An example of stopping background redraws before the bar completes.
//!
//! See the `multi` example for details on overall usage of the library.

use asciibar::ProgressBar;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("Starting download...");

    let bar = ProgressBar::new(std::io::stdout(), 100);
    let stop = Arc::new(AtomicBool::new(false));
    bar.draw_every_until(Duration::from_millis(40), stop.clone());

    let mut rng = rand::thread_rng();

    for _ in 0..100 {
        // Simulate our "download" failing.
        if rng.gen_range(0..=99) < 3 {
            stop.store(true, Ordering::Release);
            println!("\nDownload failed at {}%.", bar.percent());
            return Ok(());
        }

        bar.increment();
        std::thread::sleep(Duration::from_millis(30));
    }

    bar.draw()?;
    println!("\nComplete!");
    Ok(())
}
