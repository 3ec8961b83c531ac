//! Threshold tracker for an on-chain quantity (balance or stake).
//!
//! `AmountRequired` compares a live value against a configured minimum and
//! notifies its listener whenever the comparison result flips.
use log::info;
use std::fmt;

use super::U256;

/// Called with the tracker after its satisfied flag changed.
pub type AmountListener = Box<dyn Fn(&AmountRequired) + Send + Sync>;

pub struct AmountRequired {
    label: String,
    required_value: U256,
    current_value: U256,
    listener: Option<AmountListener>,
}

impl AmountRequired {
    pub fn new(label: impl Into<String>, required_value: U256) -> Self {
        Self {
            label: label.into(),
            required_value,
            current_value: U256::ZERO,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: AmountListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn required_value(&self) -> U256 {
        self.required_value
    }

    pub fn current_value(&self) -> U256 {
        self.current_value
    }

    pub fn is_satisfied(&self) -> bool {
        self.current_value >= self.required_value
    }

    /// Stores the new value. The listener fires only when the satisfied flag
    /// flips; writes that keep it unchanged are silent.
    pub fn set_current_value(&mut self, value: U256) {
        let was_satisfied = self.is_satisfied();
        self.current_value = value;
        if was_satisfied != self.is_satisfied() {
            info!(
                "{} requirement is {} satisfied",
                self.label,
                if self.is_satisfied() { "now" } else { "no longer" }
            );
            if let Some(listener) = &self.listener {
                listener(self);
            }
        }
    }

    /// Human readable line used in the "not registered yet" explanation.
    pub fn describe(&self) -> String {
        format!(
            "{:<14} | {} | actual: {} required: {}",
            self.label,
            bool_string(self.is_satisfied()),
            self.current_value,
            self.required_value
        )
    }
}

impl fmt::Debug for AmountRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmountRequired")
            .field("label", &self.label)
            .field("required_value", &self.required_value)
            .field("current_value", &self.current_value)
            .finish()
    }
}

impl fmt::Display for AmountRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

pub fn bool_string(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
