// Progress bar management using indicatif.
// The dump is held in memory, so progress is measured in bytes of dump text
// consumed by the row locator.

use indicatif::{ProgressBar, ProgressStyle};

#[derive(Clone, Copy)]
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    // If enabled=false, no bars are created.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    // Create a byte bar over `total` bytes of dump text.
    pub fn new_dump_bar(&self, total: u64, label: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }
        let bar = ProgressBar::new(total);
        bar.set_style(progress_style());
        bar.set_prefix(label.to_string());
        Some(bar)
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:20} {bytes:>10}/{total_bytes:<10} [{bar:50}] {percent:>3}% {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_manager_creates_no_bars() {
        assert!(ProgressManager::new(false).new_dump_bar(100, "x").is_none());
    }

    #[test]
    fn enabled_manager_sizes_bar_to_dump() {
        let bar = ProgressManager::new(true).new_dump_bar(4096, "Rows").unwrap();
        assert_eq!(bar.length(), Some(4096));
        bar.finish_and_clear();
    }
}
