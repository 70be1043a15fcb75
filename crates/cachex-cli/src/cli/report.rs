//! Human-readable progress lines on stdout/stderr.

use cachex_core::extract::{EntryOutcome, ExtractEvent, ExtractionSummary};

pub fn print_event(event: ExtractEvent<'_>) {
    match event {
        ExtractEvent::Visiting(path) => println!("path: {}", path.display()),
        ExtractEvent::Finished(EntryOutcome::Written { key, destination, .. }) => {
            println!("key: {}", key);
            println!("written: {}", destination.display());
        }
        ExtractEvent::Finished(EntryOutcome::Skipped { source, reason }) => {
            println!("skipped: {} ({})", source.display(), reason);
        }
        ExtractEvent::Failed(err) => eprintln!("error [{}]: {}", err.step(), err),
    }
}

pub fn print_summary(summary: &ExtractionSummary) {
    println!(
        "{} visited, {} written ({} bytes), {} skipped, {} failed",
        summary.visited,
        summary.written,
        summary.bytes_written,
        summary.skipped,
        summary.failures.len()
    );
}
