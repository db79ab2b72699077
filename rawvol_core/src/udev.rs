//! Seam to the device-event tagging subsystem.
//!
//! Each tag is a match expression; the subsystem turns it into a rule that tags the
//! matching device for the connected consumer when the device appears.

/// Receiver for device tag rules contributed by an interface.
pub trait UdevSpecification {
    fn tag_device(&mut self, rule: String);
}

/// Collects tag rules, dropping exact duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    rules: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl UdevSpecification for TagSet {
    fn tag_device(&mut self, rule: String) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }
}
