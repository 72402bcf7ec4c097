//! Access-control guard for user-record actions.
//!
//! A request is checked against an ordered list of predicate rules before
//! the protected action runs. The first rule that objects decides the
//! outcome; if none objects the action is permitted.

use crate::session::SessionUser;

/// A protected action on the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Paginated user index
    ListUsers,
    /// Edit form for a user record
    EditUser { target_id: String },
    /// Submission of the edit form
    UpdateUser { target_id: String },
    /// Removal of a user record
    DestroyUser { target_id: String },
}

impl Action {
    fn target_id(&self) -> Option<&str> {
        match self {
            Action::EditUser { target_id }
            | Action::UpdateUser { target_id }
            | Action::DestroyUser { target_id } => Some(target_id),
            Action::ListUsers => None,
        }
    }

    fn is_owner_only(&self) -> bool {
        matches!(self, Action::EditUser { .. } | Action::UpdateUser { .. })
    }
}

/// Where a denied request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No identity: send to the login page
    Login,
    /// Identity lacks the right: send to the landing page
    Landing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny(Denial),
}

type Rule = fn(Option<&SessionUser>, &Action) -> Option<Denial>;

/// Evaluated in order; the first denial wins.
const RULES: &[(&str, Rule)] = &[
    ("require_login", require_login),
    ("require_owner", require_owner),
    ("require_admin", require_admin),
    ("forbid_self_destroy", forbid_self_destroy),
];

fn require_login(identity: Option<&SessionUser>, _action: &Action) -> Option<Denial> {
    identity.is_none().then_some(Denial::Login)
}

fn require_owner(identity: Option<&SessionUser>, action: &Action) -> Option<Denial> {
    let user = identity?;
    if !action.is_owner_only() {
        return None;
    }
    (action.target_id() != Some(user.id.as_str())).then_some(Denial::Landing)
}

fn require_admin(identity: Option<&SessionUser>, action: &Action) -> Option<Denial> {
    let user = identity?;
    (matches!(action, Action::DestroyUser { .. }) && !user.is_admin).then_some(Denial::Landing)
}

fn forbid_self_destroy(identity: Option<&SessionUser>, action: &Action) -> Option<Denial> {
    let user = identity?;
    match action {
        Action::DestroyUser { target_id } if *target_id == user.id => Some(Denial::Landing),
        _ => None,
    }
}

/// Decide whether `identity` may perform `action`.
pub fn authorize(identity: Option<&SessionUser>, action: &Action) -> Decision {
    for (name, rule) in RULES {
        if let Some(denial) = rule(identity, action) {
            tracing::warn!(
                rule = %name,
                user_id = identity.map(|u| u.id.as_str()).unwrap_or("-"),
                ?action,
                ?denial,
                "Access denied"
            );
            return Decision::Deny(denial);
        }
    }
    Decision::Permit
}
