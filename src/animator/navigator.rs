use crate::foundation::core::Secs;

/// Discrete checkpoints over a timeline.
///
/// `current` is `-1` before the first step. Each label recorded through the animator becomes a
/// step, duplicates included, and keeps the time it was recorded at.
#[derive(Clone, Debug, PartialEq)]
pub struct StepNavigator {
    steps: Vec<(String, Secs)>,
    current: isize,
}

impl Default for StepNavigator {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            current: -1,
        }
    }
}

impl StepNavigator {
    /// No steps, positioned before the first.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &str, at: Secs) {
        self.steps.push((name.to_owned(), at));
    }

    /// Steps in insertion order.
    pub fn steps(&self) -> impl Iterator<Item = (&str, Secs)> {
        self.steps.iter().map(|(n, t)| (n.as_str(), *t))
    }

    /// Current step index, `-1` before the first.
    pub fn current(&self) -> isize {
        self.current
    }

    /// Number of steps.
    pub fn total(&self) -> usize {
        self.steps.len()
    }

    /// `current < total - 1`.
    pub fn has_next(&self) -> bool {
        self.current < self.steps.len() as isize - 1
    }

    /// `current >= 0`.
    pub fn has_previous(&self) -> bool {
        self.current >= 0
    }

    /// Move one step forward; returns the time to travel to.
    pub(crate) fn next(&mut self) -> Option<Secs> {
        if !self.has_next() {
            return None;
        }
        self.current += 1;
        self.steps.get(self.current as usize).map(|(_, t)| *t)
    }

    /// Move one step back; from the first step this returns to `-1` and time 0.
    pub(crate) fn previous(&mut self) -> Option<Secs> {
        match self.current {
            c if c > 0 => {
                self.current -= 1;
                self.steps.get(self.current as usize).map(|(_, t)| *t)
            }
            0 => {
                self.current = -1;
                Some(0.0)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/navigator.rs"]
mod tests;
