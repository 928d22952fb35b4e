//! Konami-code detector for the showroom easter egg.

const KONAMI_SEQUENCE: &[&str] = &[
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Sliding-window matcher over the last N key presses; resets on activation.
#[derive(Clone, Debug, Default)]
pub struct KeySequenceDetector {
    recent: Vec<String>,
}

impl KeySequenceDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key press; returns true when the full sequence completes.
    pub fn press(&mut self, key: &str) -> bool {
        self.recent.push(key.to_string());
        let window = KONAMI_SEQUENCE.len();
        if self.recent.len() > window {
            self.recent.drain(..self.recent.len() - window);
        }

        if self.recent.len() == window
            && self.recent.iter().zip(KONAMI_SEQUENCE).all(|(got, want)| got == want)
        {
            self.recent.clear();
            return true;
        }
        false
    }
}
