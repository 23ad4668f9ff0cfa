use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};

#[derive(PartialEq, Eq, Debug)]
pub enum ParameterError {
    NotANumber,
}

struct ParamInner {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    peer: Option<Weak<RefCell<ParamInner>>>,
    // Set while this cell is the origin of a propagation, so a linked
    // peer can never re-enter it.
    updating: bool,
}

/// A bounded numeric cell, the stand-in for one slider or number box.
///
/// Two cells may be linked; a committed change to one is copied into the
/// other as a plain store, so propagation is one hop and cannot cycle.
#[derive(Clone)]
pub struct Parameter {
    name: &'static str,
    inner: Rc<RefCell<ParamInner>>,
}

impl Parameter {
    pub fn new(name: &'static str, value: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            name,
            inner: Rc::new(RefCell::new(ParamInner {
                value,
                min,
                max,
                step,
                peer: None,
                updating: false,
            })),
        }
    }

    pub fn get(&self) -> f64 {
        self.inner.borrow().value
    }

    pub fn get_min(&self) -> f64 {
        self.inner.borrow().min
    }

    pub fn get_max(&self) -> f64 {
        self.inner.borrow().max
    }

    pub fn get_step(&self) -> f64 {
        self.inner.borrow().step
    }

    /// Commits a new value: non-finite input is rejected, out-of-range
    /// input is clamped to `[min, max]`. Returns the value actually stored.
    pub fn set(&self, value: f64) -> Result<f64, ParameterError> {
        if !value.is_finite() {
            debug!("{}: rejected non-numeric input", self.name);
            return Err(ParameterError::NotANumber);
        }

        let (min, max) = {
            let inner = self.inner.borrow();
            (inner.min, inner.max)
        };
        let clamped = value.clamp(min, max);
        if clamped != value {
            warn!(
                "{}: input {} outside [{}, {}], clamped to {}",
                self.name, value, min, max, clamped
            );
        }

        self.store_and_propagate(clamped);
        Ok(clamped)
    }

    fn store_and_propagate(&self, value: f64) {
        let peer = {
            let mut inner = self.inner.borrow_mut();
            if inner.updating {
                return;
            }
            inner.value = value;
            inner.updating = true;
            inner.peer.as_ref().and_then(Weak::upgrade)
        };

        if let Some(peer) = peer {
            let mut peer = peer.borrow_mut();
            if !peer.updating {
                peer.value = value.clamp(peer.min, peer.max);
            }
        }

        self.inner.borrow_mut().updating = false;
    }

    /// Ties two cells together so they stay in sync, copying min/max/step
    /// from the first onto the second.
    pub fn link(first: &Parameter, second: &Parameter) {
        {
            let first = first.inner.borrow();
            let mut second = second.inner.borrow_mut();
            second.min = first.min;
            second.max = first.max;
            second.step = first.step;
            second.value = first.value;
        }
        first.inner.borrow_mut().peer = Some(Rc::downgrade(&second.inner));
        second.inner.borrow_mut().peer = Some(Rc::downgrade(&first.inner));
    }
}

#[cfg(test)]
mod param_tests {
    use super::*;

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let kp = Parameter::new("kp", 0.0, 0.0, 5.0, 0.01);

        assert_eq!(kp.set(9.0), Ok(5.0), "above max clamps to max");
        assert_eq!(kp.get(), 5.0);

        assert_eq!(kp.set(-1.0), Ok(0.0), "below min clamps to min");
        assert_eq!(kp.get(), 0.0);

        assert_eq!(kp.set(2.5), Ok(2.5), "in-range input stored as-is");
        assert_eq!(kp.get(), 2.5);
    }

    #[test]
    fn test_non_numeric_input_is_rejected() {
        let ki = Parameter::new("ki", 0.4, 0.0, 2.0, 0.01);

        assert_eq!(ki.set(f64::NAN), Err(ParameterError::NotANumber));
        assert_eq!(ki.set(f64::INFINITY), Err(ParameterError::NotANumber));
        assert_eq!(ki.get(), 0.4, "cell unchanged after rejected input");
    }

    #[test]
    fn test_link_copies_bounds_and_value() {
        let slider = Parameter::new("kd-slider", 1.5, 0.0, 5.0, 0.1);
        let input = Parameter::new("kd-input", 0.0, -100.0, 100.0, 1.0);

        Parameter::link(&slider, &input);

        assert_eq!(input.get(), 1.5);
        assert_eq!(input.get_min(), 0.0);
        assert_eq!(input.get_max(), 5.0);
        assert_eq!(input.get_step(), 0.1);
    }

    #[test]
    fn test_link_propagates_both_ways() {
        let slider = Parameter::new("sp-slider", 0.0, -2.0, 2.0, 0.1);
        let input = Parameter::new("sp-input", 0.0, -2.0, 2.0, 0.1);
        Parameter::link(&slider, &input);

        slider.set(1.0).unwrap();
        assert_eq!(input.get(), 1.0, "slider change reaches the input box");

        input.set(-0.5).unwrap();
        assert_eq!(slider.get(), -0.5, "input change reaches the slider");
    }

    #[test]
    fn test_propagation_does_not_re_enter_origin() {
        let a = Parameter::new("a", 0.0, 0.0, 10.0, 1.0);
        let b = Parameter::new("b", 0.0, 0.0, 10.0, 1.0);
        Parameter::link(&a, &b);

        // If propagation re-entered the originating cell this would
        // recurse until the RefCell panicked.
        a.set(3.0).unwrap();
        assert_eq!(a.get(), 3.0);
        assert_eq!(b.get(), 3.0);
    }

    #[test]
    fn test_linked_value_clamped_to_peer_bounds() {
        let wide = Parameter::new("wide", 0.0, 0.0, 100.0, 1.0);
        let narrow = Parameter::new("narrow", 0.0, 0.0, 100.0, 1.0);
        Parameter::link(&wide, &narrow);
        narrow.inner.borrow_mut().max = 5.0;

        wide.set(50.0).unwrap();
        assert_eq!(wide.get(), 50.0);
        assert_eq!(narrow.get(), 5.0, "peer store respects the peer's bounds");
    }
}
