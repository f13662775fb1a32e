//! Progress - percentage and section dots derived from the navigator.
//!
//! Pure reads of `(current_index, count)`. Nothing is stored here; the
//! derived views recompute whenever the navigator's index signal changes.

use spark_signals::{derived, Derived, Signal};

use super::navigator::Navigator;

/// `((index + 1) / count) * 100`, in `(0, 100]` for a valid index.
pub fn percent_complete(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    ((index + 1) as f64 / count as f64) * 100.0
}

/// One flag per section, true only at `index`.
pub fn dot_states(index: usize, count: usize) -> Vec<bool> {
    (0..count).map(|i| i == index).collect()
}

/// Footer label, e.g. `"Section 3 of 7"`.
pub fn section_label(index: usize, count: usize) -> String {
    format!("Section {} of {}", index + 1, count)
}

/// Read-only progress view over a navigator.
#[derive(Clone)]
pub struct Progress {
    index: Signal<usize>,
    count: usize,
}

impl Progress {
    pub fn new(navigator: &Navigator) -> Self {
        Self {
            index: navigator.index_signal(),
            count: navigator.count(),
        }
    }

    pub fn percent_complete(&self) -> f64 {
        percent_complete(self.index.get(), self.count)
    }

    pub fn dot_states(&self) -> Vec<bool> {
        dot_states(self.index.get(), self.count)
    }

    pub fn label(&self) -> String {
        section_label(self.index.get(), self.count)
    }

    /// Fraction in `(0, 1]`, for progress bars.
    pub fn ratio(&self) -> f32 {
        (self.percent_complete() / 100.0) as f32
    }

    /// Percentage that tracks the navigator reactively.
    pub fn percent_derived(&self) -> Derived<f64> {
        let index = self.index.clone();
        let count = self.count;
        derived(move || percent_complete(index.get(), count))
    }

    /// Dot row that tracks the navigator reactively.
    pub fn dots_derived(&self) -> Derived<Vec<bool>> {
        let index = self.index.clone();
        let count = self.count;
        derived(move || dot_states(index.get(), count))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::content::{Section, SectionStore};

    fn setup(count: usize) -> Navigator {
        let sections = (0..count)
            .map(|i| Section::new(format!("s{i}"), format!("S{i}")))
            .collect();
        Navigator::new(Rc::new(SectionStore::new(sections).unwrap())).unwrap()
    }

    #[test]
    fn test_percent_at_last_is_100() {
        let nav = setup(7);
        let progress = Progress::new(&nav);
        nav.open(Some(6));
        assert_eq!(progress.percent_complete(), 100.0);
    }

    #[test]
    fn test_percent_strictly_increasing() {
        let nav = setup(7);
        let progress = Progress::new(&nav);
        nav.open(None);

        let mut last = 0.0;
        for i in 0..7 {
            nav.jump_to(i);
            let pct = progress.percent_complete();
            assert!(pct > last, "{pct} should exceed {last}");
            assert!(pct > 0.0 && pct <= 100.0);
            last = pct;
        }
    }

    #[test]
    fn test_single_section_is_complete() {
        assert_eq!(percent_complete(0, 1), 100.0);
        assert_eq!(dot_states(0, 1), vec![true]);
    }

    #[test]
    fn test_dot_states_one_active() {
        let nav = setup(4);
        let progress = Progress::new(&nav);
        nav.open(Some(2));
        assert_eq!(progress.dot_states(), vec![false, false, true, false]);
    }

    #[test]
    fn test_label() {
        let nav = setup(7);
        let progress = Progress::new(&nav);
        assert_eq!(progress.label(), "Section 1 of 7");
        nav.open(Some(2));
        assert_eq!(progress.label(), "Section 3 of 7");
    }

    #[test]
    fn test_derived_tracks_navigator() {
        let nav = setup(4);
        let progress = Progress::new(&nav);
        let percent = progress.percent_derived();
        let dots = progress.dots_derived();

        assert_eq!(percent.get(), 25.0);
        assert_eq!(dots.get(), vec![true, false, false, false]);

        nav.open(None);
        nav.next();
        assert_eq!(percent.get(), 50.0);
        assert_eq!(dots.get(), vec![false, true, false, false]);
    }

    #[test]
    fn test_zero_count_is_zero_percent() {
        assert_eq!(percent_complete(0, 0), 0.0);
        assert!(dot_states(0, 0).is_empty());
    }
}
