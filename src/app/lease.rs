// LogTriage - app/lease.rs
//
// Scoped "control disabled" state. Acquiring a lease disables one control;
// dropping it re-enables that control. A workflow holds the lease for its
// whole run, so every exit path (success, HTTP failure, decode failure)
// restores the control.

use crate::app::view::{ControlId, ViewModel};
use std::ops::{Deref, DerefMut};

/// Exclusive access to the view while one control is disabled.
pub struct ControlLease<'a> {
    view: &'a mut ViewModel,
    control: ControlId,
}

impl<'a> ControlLease<'a> {
    /// Disable `control` until the returned lease is dropped.
    pub fn acquire(view: &'a mut ViewModel, control: ControlId) -> Self {
        view.control_mut(control).enabled = false;
        tracing::trace!(?control, "Control disabled");
        Self { view, control }
    }
}

impl Deref for ControlLease<'_> {
    type Target = ViewModel;

    fn deref(&self) -> &ViewModel {
        self.view
    }
}

impl DerefMut for ControlLease<'_> {
    fn deref_mut(&mut self) -> &mut ViewModel {
        self.view
    }
}

impl Drop for ControlLease<'_> {
    fn drop(&mut self) {
        self.view.control_mut(self.control).enabled = true;
        tracing::trace!(control = ?self.control, "Control re-enabled");
    }
}
