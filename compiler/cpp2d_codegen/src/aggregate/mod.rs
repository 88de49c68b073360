//! Member layout bookkeeping for aggregates.
//!
//! Consecutive bit-fields are packed into one `mixin(bitfields!(...))`
//! whose total width must be 8, 16, 32 or 64; the run is closed with an
//! anonymous padding field. Visibility labels are only written when the
//! visibility actually changes.

use cpp2d_ir::{Access, TagKind};


/// Storage width holding `bits` bits.
pub fn round_storage(bits: u32) -> u32 {
    match bits {
        0 => 0,
        1..=8 => 8,
        9..=16 => 16,
        17..=32 => 32,
        _ => 64,
    }
}

/// Unused bits left in the storage of a run of `bits` bits.
pub fn padding(bits: u32) -> u32 {
    round_storage(bits).saturating_sub(bits)
}

/// Text closing a bit-field mixin; no padding field when none is needed.
pub fn close_mixin(padding: u32) -> String {
    if padding > 0 {
        format!("\tuint, \"\", {padding}));")
    } else {
        "));".to_owned()
    }
}

/// Running state of the current bit-field run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitfieldRun {
    bits: u32,
    open: bool,
}

impl BitfieldRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, width: u32) {
        self.bits = self.bits.saturating_add(width);
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// End the run, returning its padding if one was open.
    pub fn close(&mut self) -> Option<u32> {
        if !self.open {
            return None;
        }
        let pad = padding(self.bits);
        *self = Self::default();
        Some(pad)
    }
}

/// The visibility currently in effect inside an aggregate body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibilityTracker {
    current: Access,
}

impl VisibilityTracker {
    pub fn new(tag: TagKind) -> Self {
        VisibilityTracker {
            current: match tag {
                TagKind::Class => Access::Private,
                TagKind::Struct | TagKind::Union => Access::Public,
            },
        }
    }

    pub fn current(&self) -> Access {
        self.current
    }

    /// Switch to the visibility of the next member. Returns the label to
    /// write when it differs from the current one.
    pub fn transition(&mut self, member: Access) -> Option<Access> {
        let member = match member {
            Access::None => Access::Public,
            access => access,
        };
        if member == self.current {
            None
        } else {
            self.current = member;
            Some(member)
        }
    }
}
