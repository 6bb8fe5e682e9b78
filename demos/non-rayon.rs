//! An example of sharing a bar with natively spawned threads and not Rayon.

use asciibar::ProgressBar;
use rand::Rng;
use std::time::Duration;

const PER_THREAD: i64 = 200;

fn main() -> std::io::Result<()> {
    // Clones are handles to the same bar, so no `Arc` or `Mutex` is needed.
    let b0 = ProgressBar::new(std::io::stdout(), PER_THREAD * 2);
    let b1 = b0.clone();

    let child0 = std::thread::spawn(move || -> std::io::Result<()> {
        // Determine how fast our thread progresses.
        let wait = rand::thread_rng().gen_range(1..=10);

        for _ in 0..PER_THREAD {
            b0.increment();
            // Another thread is drawing too, but lines never interleave.
            b0.draw()?;
            std::thread::sleep(Duration::from_millis(wait));
        }

        Ok(())
    });

    // The same as the above.
    let child1 = std::thread::spawn(move || -> std::io::Result<()> {
        let wait = rand::thread_rng().gen_range(1..=10);

        for _ in 0..PER_THREAD {
            b1.increment();
            b1.draw()?;
            std::thread::sleep(Duration::from_millis(wait));
        }

        Ok(())
    });

    // A failed draw comes back out of the thread as an `io::Error`.
    child0.join().unwrap()?;
    child1.join().unwrap()?;
    println!();
    Ok(())
}
