use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shared animation clock.
///
/// The host owns the notion of time: it calls [`Clock::set_unadjusted`] once per frame (or per
/// input event) and every animation created from a clone of this clock observes the new time.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    inner: Rc<RefCell<ClockInner>>,
}

#[derive(Debug, Default)]
struct ClockInner {
    time: Duration,
    complete_instantly: bool,
}

impl Clock {
    pub fn with_time(time: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ClockInner {
                time,
                complete_instantly: false,
            })),
        }
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().time
    }

    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow().time
    }

    pub fn set_unadjusted(&mut self, time: Duration) {
        self.inner.borrow_mut().time = time;
    }

    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&mut self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}
