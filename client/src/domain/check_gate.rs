//! Duplicate-check gate for unique registration fields.
//!
//! Username and nickname must each pass an asynchronous availability check
//! before registration may be submitted. Each field runs an independent
//! state machine:
//!
//! ```text
//! Unchecked --begin_check--> Checking --available--> Checked
//!                                     --taken/error--> Failed
//! any state --note_edit--> Unchecked
//! ```
//!
//! Edits race with in-flight checks: the gate tracks a monotonically
//! increasing edit generation per field, and [`DuplicateCheckGate::resolve`]
//! discards any ticket issued before the latest edit. A stale `Checked`
//! outcome therefore never resurrects a field the user has already changed,
//! even when the new value equals the previously checked one.

/// Registration fields subject to uniqueness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityField {
    /// Login identifier.
    Username,
    /// Display name.
    Nickname,
}

/// Per-field verification state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldCheckState {
    /// No check has run for the current value.
    #[default]
    Unchecked,
    /// An availability check is in flight.
    Checking,
    /// The current value was reported available.
    Checked,
    /// The current value was reported taken, or the check errored.
    Failed,
}

/// Result reported by an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The value is unused and may be registered.
    Available,
    /// The value is already registered.
    Taken,
    /// The check itself failed; treated the same as [`CheckOutcome::Taken`]
    /// at the state-machine level.
    Errored,
}

/// Proof that a check was begun, carrying the edit generation it saw.
///
/// Tickets are only minted by [`DuplicateCheckGate::begin_check`], so a
/// resolution can never target a generation the gate did not issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket {
    field: IdentityField,
    generation: u64,
}

impl CheckTicket {
    /// Field this ticket belongs to.
    #[must_use]
    pub const fn field(&self) -> IdentityField {
        self.field
    }
}

/// Whether a resolution was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome was applied; the field now holds this state.
    Applied(FieldCheckState),
    /// The ticket predates the latest edit; the field was left untouched.
    Stale,
}

#[derive(Debug, Clone, Copy, Default)]
struct FieldSlot {
    state: FieldCheckState,
    generation: u64,
}

/// Gate holding both identity-field state machines.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateCheckGate {
    username: FieldSlot,
    nickname: FieldSlot,
}

impl DuplicateCheckGate {
    /// Build a gate with both fields unchecked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `field`.
    #[must_use]
    pub const fn state(&self, field: IdentityField) -> FieldCheckState {
        self.slot(field).state
    }

    /// Record an edit to `field`'s value.
    ///
    /// Always resets the field to [`FieldCheckState::Unchecked`] and
    /// invalidates in-flight tickets. The gate never sees the value itself,
    /// so an edit that reproduces the previously checked text still resets.
    pub fn note_edit(&mut self, field: IdentityField) {
        let slot = self.slot_mut(field);
        slot.state = FieldCheckState::Unchecked;
        slot.generation += 1;
    }

    /// Move `field` to [`FieldCheckState::Checking`] and mint a ticket.
    ///
    /// Beginning a new check supersedes any check still in flight for the
    /// same field: the older ticket becomes stale.
    pub fn begin_check(&mut self, field: IdentityField) -> CheckTicket {
        let slot = self.slot_mut(field);
        slot.state = FieldCheckState::Checking;
        slot.generation += 1;
        CheckTicket {
            field,
            generation: slot.generation,
        }
    }

    /// Apply a check outcome, unless the ticket is stale.
    pub fn resolve(&mut self, ticket: CheckTicket, outcome: CheckOutcome) -> Resolution {
        let slot = self.slot_mut(ticket.field);
        if slot.generation != ticket.generation {
            return Resolution::Stale;
        }
        slot.state = match outcome {
            CheckOutcome::Available => FieldCheckState::Checked,
            CheckOutcome::Taken | CheckOutcome::Errored => FieldCheckState::Failed,
        };
        Resolution::Applied(slot.state)
    }

    /// Whether both identity fields are verified available.
    ///
    /// Re-derived from the current states on every call; nothing is cached.
    #[must_use]
    pub const fn both_checked(&self) -> bool {
        matches!(self.username.state, FieldCheckState::Checked)
            && matches!(self.nickname.state, FieldCheckState::Checked)
    }

    const fn slot(&self, field: IdentityField) -> &FieldSlot {
        match field {
            IdentityField::Username => &self.username,
            IdentityField::Nickname => &self.nickname,
        }
    }

    fn slot_mut(&mut self, field: IdentityField) -> &mut FieldSlot {
        match field {
            IdentityField::Username => &mut self.username,
            IdentityField::Nickname => &mut self.nickname,
        }
    }
}
