//! Required-state collaborator.
//!
//! Widgets report "this control now has / lacks a value" and leave the
//! presentation of that state to a [`RequiredState`] implementation.

use crate::adapter::FormControl;
use crate::config::FormConfig;

/// Receives value changes of bound controls.
pub trait RequiredState {
    fn set_required(&self, control: &mut dyn FormControl, has_value: bool);
}

/// Marks empty required controls with CSS classes.
///
/// Only controls carrying the required marker attribute are touched.
#[derive(Debug, Clone, Default)]
pub struct RequiredClasses {
    form: FormConfig,
}

impl RequiredClasses {
    pub fn new(form: FormConfig) -> Self {
        Self { form }
    }
}

impl RequiredState for RequiredClasses {
    fn set_required(&self, control: &mut dyn FormControl, has_value: bool) {
        if !control.has_attr(&self.form.required_attr) {
            return;
        }
        if has_value {
            control.remove_class(&self.form.required_class);
            control.remove_class(&self.form.required_hidden_class);
            return;
        }
        control.add_class(&self.form.required_class);
        if self.form.hide || control.has_attr(&self.form.required_hidden_attr) {
            control.add_class(&self.form.required_hidden_class);
        }
    }
}

/// Ignores required state entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRequired;

impl RequiredState for NoRequired {
    fn set_required(&self, _control: &mut dyn FormControl, _has_value: bool) {}
}
