use asciibar::ProgressBar;
use std::time::Duration;

fn main() -> std::io::Result<()> {
    println!("Starting bar...");

    let bar = ProgressBar::new(std::io::stdout(), 50);
    bar.draw()?;

    for _ in 0..50 {
        std::thread::sleep(Duration::from_millis(60));

        // Incrementing never locks; drawing does.
        bar.increment();
        bar.draw()?;
    }

    println!("\nComplete!");
    Ok(())
}
