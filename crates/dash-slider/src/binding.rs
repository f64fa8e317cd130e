//! Value binding adapter
//!
//! Host-facing get/set of the current value plus change and touched
//! observers. The adapter never validates: membership is checked by the
//! layout pass that follows every write.

use std::fmt;

type ChangeFn = Box<dyn FnMut(f64)>;
type TouchedFn = Box<dyn FnMut()>;

/// Current selection and its observers
#[derive(Default)]
pub struct ValueBinding {
    value: Option<f64>,
    touched: bool,
    on_change: Option<ChangeFn>,
    on_touched: Option<TouchedFn>,
}

impl fmt::Debug for ValueBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueBinding")
            .field("value", &self.value)
            .field("touched", &self.touched)
            .field("on_change", &self.on_change.is_some())
            .field("on_touched", &self.on_touched.is_some())
            .finish()
    }
}

impl ValueBinding {
    pub fn new(value: Option<f64>) -> Self {
        Self {
            value: value.filter(|v| !v.is_nan()),
            ..Default::default()
        }
    }

    /// Selected value, `None` until one is written or committed
    pub fn get_value(&self) -> Option<f64> {
        self.value
    }

    /// Write a value from the host
    ///
    /// `None` and NaN are ignored; `Some(0.0)` is stored like any other
    /// value. Returns whether the value was stored.
    /// Does not notify the change observer.
    pub fn set_value(&mut self, value: Option<f64>) -> bool {
        match value {
            Some(v) if !v.is_nan() => {
                self.value = Some(v);
                true
            }
            _ => false,
        }
    }

    /// Store a value produced by user interaction and notify the host
    pub fn commit(&mut self, value: f64) {
        self.value = Some(value);
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
    }

    /// Signal the first interaction; later calls are no-ops
    pub fn touch(&mut self) {
        if self.touched {
            return;
        }
        self.touched = true;
        if let Some(callback) = self.on_touched.as_mut() {
            callback();
        }
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Register the change observer (replaces any previous one)
    pub fn on_change(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Register the touched observer (replaces any previous one)
    pub fn on_touched(&mut self, callback: impl FnMut() + 'static) {
        self.on_touched = Some(Box::new(callback));
    }

    /// Drop both observers
    pub fn clear_observers(&mut self) {
        self.on_change = None;
        self.on_touched = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_value_ignores_unset() {
        let mut binding = ValueBinding::new(Some(12.0));
        assert!(!binding.set_value(None));
        assert!(!binding.set_value(Some(f64::NAN)));
        assert_eq!(binding.get_value(), Some(12.0));

        assert!(binding.set_value(Some(0.0)));
        assert_eq!(binding.get_value(), Some(0.0));
    }

    #[test]
    fn test_commit_notifies() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut binding = ValueBinding::new(None);
        let sink = Rc::clone(&seen);
        binding.on_change(move |v| sink.borrow_mut().push(v));

        binding.set_value(Some(3.0));
        binding.commit(4.0);
        binding.commit(4.0);

        assert_eq!(*seen.borrow(), vec![4.0, 4.0]);
        assert_eq!(binding.get_value(), Some(4.0));
    }

    #[test]
    fn test_touched_fires_once() {
        let count = Rc::new(RefCell::new(0));
        let mut binding = ValueBinding::new(None);
        let sink = Rc::clone(&count);
        binding.on_touched(move || *sink.borrow_mut() += 1);

        binding.touch();
        binding.touch();
        assert_eq!(*count.borrow(), 1);
        assert!(binding.is_touched());
    }

    #[test]
    fn test_clear_observers() {
        let count = Rc::new(RefCell::new(0));
        let mut binding = ValueBinding::new(None);
        let sink = Rc::clone(&count);
        binding.on_change(move |_| *sink.borrow_mut() += 1);
        binding.clear_observers();
        binding.commit(1.0);
        assert_eq!(*count.borrow(), 0);
    }
}
