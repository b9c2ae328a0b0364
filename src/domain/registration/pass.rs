//! Passes and pass types.
//!
//! A pass is a purchased entitlement with a bounded number of remaining
//! registrations. `remaining` only ever decreases, and only through the
//! store's atomic consume-and-register operation; nothing in this module
//! mutates it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PassId, PassTypeId, UserId};

/// Template a pass is instantiated from. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassType {
    pub id: PassTypeId,
    pub name: String,
    pub units_per_pass: u32,
}

/// A purchased entitlement owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pass {
    pub id: PassId,
    pub owner_user_id: UserId,
    pub pass_type_id: PassTypeId,
    pub remaining: u32,
}

impl Pass {
    /// Issues a fresh pass holding every unit of its type.
    pub fn issue(owner_user_id: UserId, pass_type: &PassType) -> Self {
        Self {
            id: PassId::new(),
            owner_user_id,
            pass_type_id: pass_type.id,
            remaining: pass_type.units_per_pass,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_user_id == user_id
    }

    /// True when `user_id` may spend a unit of this pass right now.
    ///
    /// Advisory only: the store re-checks the same guard atomically.
    pub fn is_eligible_for(&self, user_id: &UserId) -> bool {
        self.is_owned_by(user_id) && self.remaining >= 1
    }
}

/// A pass together with its type, as returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassView {
    pub pass: Pass,
    pub pass_type: PassType,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_pack() -> PassType {
        PassType {
            id: PassTypeId::new(),
            name: "10-Entry Pass".to_string(),
            units_per_pass: 10,
        }
    }

    #[test]
    fn issued_pass_holds_all_units() {
        let owner = UserId::new("u1").unwrap();
        let pass = Pass::issue(owner.clone(), &ten_pack());
        assert_eq!(pass.remaining, 10);
        assert!(pass.is_owned_by(&owner));
    }

    #[test]
    fn eligibility_requires_owner_and_remaining() {
        let owner = UserId::new("u1").unwrap();
        let other = UserId::new("u2").unwrap();
        let mut pass = Pass::issue(owner.clone(), &ten_pack());

        assert!(pass.is_eligible_for(&owner));
        assert!(!pass.is_eligible_for(&other));

        pass.remaining = 0;
        assert!(!pass.is_eligible_for(&owner));
    }
}
