//! Many `rayon` workers feeding one bar, which redraws itself in the
//! background.

use asciibar::ProgressBar;
use rand::Rng;
use rayon::prelude::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const JOBS: i64 = 1234;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("Starting jobs...");

    let bar = ProgressBar::new(std::io::stdout(), JOBS);

    // Exits by itself once the bar is complete.
    bar.draw_every(Duration::from_millis(50));

    (0..JOBS).into_par_iter().for_each(|_| {
        let wait = rand::thread_rng().gen_range(1..=10);
        std::thread::sleep(Duration::from_millis(wait));
        bar.increment();
    });

    // The background thread may have last drawn just before the final job.
    bar.draw()?;
    println!("\nComplete!");
    Ok(())
}
