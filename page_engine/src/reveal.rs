// Scroll-triggered reveal: a section is marked visible the first time it
// intersects the viewport and is then never watched again.

use tracing::debug;

use crate::host::RevealHost;

/// One visibility report from the host's observer.
#[derive(Debug, Clone)]
pub struct Intersection<T> {
    pub target: T,
    pub is_intersecting: bool,
}

/// Counts reveals across observer batches.
#[derive(Debug, Default)]
pub struct ScrollReveal {
    revealed: usize,
}

impl ScrollReveal {
    pub fn new() -> Self {
        ScrollReveal::default()
    }

    /// Handle one observer batch. Returns how many targets were revealed by it.
    pub fn on_intersections<H: RevealHost>(
        &mut self,
        host: &mut H,
        entries: impl IntoIterator<Item = Intersection<H::Target>>,
    ) -> usize {
        let mut count = 0;
        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            host.mark_visible(&entry.target);
            host.stop_watching(&entry.target);
            count += 1;
        }
        if count > 0 {
            self.revealed += count;
            debug!(count, total = self.revealed, "sections revealed");
        }
        count
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }
}
