use std::fmt;

/// Identifies one of the four callback slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Protect,
    ResolveProcess,
    ReleaseObject,
    Result,
}

impl Slot {
    /// The slot's C-visible entry point name.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Protect => "protect",
            Slot::ResolveProcess => "resolve_process",
            Slot::ReleaseObject => "release_object",
            Slot::Result => "result",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for bridge invocations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The slot has no callable installed
    #[error("no callable registered for `{0}`")]
    NotRegistered(Slot),
    /// The installed callable signaled failure by returning a null buffer
    #[error("callable for `{0}` returned no result")]
    CalleeFailed(Slot),
}

impl BridgeError {
    /// The slot the failure occurred on.
    pub fn slot(&self) -> Slot {
        match self {
            BridgeError::NotRegistered(slot) => *slot,
            BridgeError::CalleeFailed(slot) => *slot,
        }
    }
}
