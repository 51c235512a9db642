//! Opaque handles shared between the core and its host.

use std::fmt;

/// Host-issued handle of a materialized item view.
///
/// The core never inspects the value; it only hands it back to the same
/// host that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(u64);

impl ViewHandle {
    /// Wrap a host-side identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-side identifier.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Handle returned by listener registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wrap a raw sequence number.
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw sequence number; later registrations have larger values.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_handle_display_includes_raw_value() {
        assert_eq!(ViewHandle::new(42).to_string(), "view#42");
    }

    #[test]
    fn subscription_ids_order_by_registration() {
        assert!(SubscriptionId::new(1) < SubscriptionId::new(2));
    }
}
