//! Select-like controls the loader writes into

use crate::types::LoadState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Minimal surface of a `<select>` the loader needs
pub trait SelectControl: Send {
    fn set_disabled(&mut self, disabled: bool);
    fn clear_options(&mut self);
    /// Placeholders are appended with an empty value
    fn append_option(&mut self, value: &str, label: &str, selected: bool);
}

/// One entry of a [`MemorySelect`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// In-memory select used by the command line and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySelect {
    options: Vec<RenderedOption>,
    disabled: bool,
}

impl MemorySelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[RenderedOption] {
        &self.options
    }

    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The option marked selected, if any
    pub fn selected(&self) -> Option<&RenderedOption> {
        self.options.iter().find(|o| o.selected)
    }

    /// Plain-text view, one option per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.disabled {
            out.push_str("(disabled)\n");
        }
        for option in &self.options {
            let marker = if option.selected { '*' } else { ' ' };
            if option.value.is_empty() {
                out.push_str(&format!("{}   {}\n", marker, option.label));
            } else {
                out.push_str(&format!("{} [{}] {}\n", marker, option.value, option.label));
            }
        }
        out
    }
}

impl SelectControl for MemorySelect {
    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn clear_options(&mut self) {
        self.options.clear();
    }

    fn append_option(&mut self, value: &str, label: &str, selected: bool) {
        self.options.push(RenderedOption {
            value: value.to_string(),
            label: label.to_string(),
            selected,
        });
    }
}

/// A control together with its load state and request counter
///
/// The lock is only taken for synchronous updates, never across an await.
#[derive(Debug, Default)]
pub struct SelectTarget<C> {
    control: Mutex<C>,
    state: Mutex<LoadState>,
    issued: AtomicU64,
}

impl<C: SelectControl> SelectTarget<C> {
    pub fn new(control: C) -> Self {
        Self {
            control: Mutex::new(control),
            state: Mutex::new(LoadState::Idle),
            issued: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> LoadState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sequence number of the most recently issued request
    pub fn latest_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Reserve the next sequence number for a new request
    pub(crate) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a batch of changes to the control and record the resulting state
    pub(crate) fn update(&self, state: LoadState, f: impl FnOnce(&mut C)) {
        let mut control = self.lock();
        f(&mut control);
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Like [`update`](Self::update), but only while `seq` is still the latest issued
    ///
    /// Returns whether the update was applied.
    pub(crate) fn update_if_current(&self, seq: u64, state: LoadState, f: impl FnOnce(&mut C)) -> bool {
        let mut control = self.lock();
        if self.latest_issued() != seq {
            return false;
        }
        f(&mut control);
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
        true
    }

    /// Read access to the underlying control
    pub fn with_control<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.lock())
    }

    pub fn into_inner(self) -> C {
        self.control.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, C> {
        self.control.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_select_records_options() {
        let mut select = MemorySelect::new();
        select.append_option("", "Selecione...", false);
        select.append_option("2", "Transporte", true);
        select.set_disabled(true);

        assert_eq!(select.labels(), vec!["Selecione...", "Transporte"]);
        assert_eq!(select.selected().map(|o| o.value.as_str()), Some("2"));
        assert!(select.is_disabled());

        select.clear_options();
        assert!(select.options().is_empty());
    }

    #[test]
    fn test_render() {
        let mut select = MemorySelect::new();
        select.append_option("", "Selecione...", false);
        select.append_option("1", "Casa", true);
        assert_eq!(select.render(), "    Selecione...\n* [1] Casa\n");
    }

    #[test]
    fn test_target_sequence_and_state() {
        let target = SelectTarget::new(MemorySelect::new());
        assert_eq!(target.state(), LoadState::Idle);
        assert_eq!(target.issue(), 1);
        assert_eq!(target.issue(), 2);
        assert_eq!(target.latest_issued(), 2);

        target.update(LoadState::Loading, |c| c.set_disabled(true));
        assert_eq!(target.state(), LoadState::Loading);

        assert!(!target.update_if_current(1, LoadState::Loaded, |c| c.set_disabled(false)));
        assert!(target.update_if_current(2, LoadState::Failed, |c| c.clear_options()));
        assert_eq!(target.state(), LoadState::Failed);
        assert!(target.with_control(|c| c.is_disabled()));
        assert!(target.into_inner().is_disabled());
    }
}
