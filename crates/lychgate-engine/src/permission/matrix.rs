//! The static role/resource/action grant table.

use std::collections::{HashMap, HashSet};

use lychgate_core::{Action, Resource, Role};

/// Immutable grant table, `Role -> Resource -> set(Action)`.
///
/// Constructed once at process start (builtin table or from config) and
/// injected into the engine by value; never read from ambient global state,
/// so tests can substitute their own. Any absent (role, resource) pair
/// denies every action.
pub struct PermissionMatrix {
    grants: HashMap<Role, HashMap<Resource, HashSet<Action>>>,
}

impl PermissionMatrix {
    pub fn builder() -> MatrixBuilder {
        MatrixBuilder::default()
    }

    /// The built-in grant table of the application.
    pub fn builtin() -> Self {
        use Action::{Create, Delete, Read, Update};
        use Resource::{Finances, Letters, Persons, Programs, Users};

        let all = [Read, Create, Update, Delete];
        let mut b = Self::builder();

        b = b
            .grant(Role::Viewer, Persons, &[Read])
            .grant(Role::Viewer, Programs, &[Read])
            .grant(Role::Viewer, Letters, &[Read]);

        b = b
            .grant(Role::Editor, Persons, &[Read, Update])
            .grant(Role::Editor, Programs, &[Read, Create, Update])
            .grant(Role::Editor, Letters, &[Read, Create, Update]);

        b = b
            .grant(Role::MinistryLeader, Persons, &[Read, Create, Update])
            .grant(Role::MinistryLeader, Programs, &all)
            .grant(Role::MinistryLeader, Letters, &[Read, Create, Update])
            .grant(Role::MinistryLeader, Finances, &[Read]);

        b = b
            .grant(Role::Admin, Persons, &all)
            .grant(Role::Admin, Programs, &all)
            .grant(Role::Admin, Users, &[Read, Create, Update])
            .grant(Role::Admin, Letters, &all)
            .grant(Role::Admin, Finances, &[Read, Create, Update]);

        b = b
            .grant(Role::Pastor, Persons, &all)
            .grant(Role::Pastor, Programs, &all)
            .grant(Role::Pastor, Users, &[Read, Create, Update])
            .grant(Role::Pastor, Letters, &all)
            .grant(Role::Pastor, Finances, &all);

        for resource in Resource::ALL {
            b = b.grant(Role::SuperAdmin, resource, &all);
        }

        b.build()
    }

    /// Pure lookup. Missing entries deny.
    pub fn allows(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.grants
            .get(&role)
            .and_then(|by_resource| by_resource.get(&resource))
            .is_some_and(|actions| actions.contains(&action))
    }
}

/// Accumulates grants, then freezes them into a matrix.
#[derive(Default)]
pub struct MatrixBuilder {
    grants: HashMap<Role, HashMap<Resource, HashSet<Action>>>,
}

impl MatrixBuilder {
    pub fn grant(mut self, role: Role, resource: Resource, actions: &[Action]) -> Self {
        self.grants
            .entry(role)
            .or_default()
            .entry(resource)
            .or_default()
            .extend(actions.iter().copied());
        self
    }

    pub fn build(self) -> PermissionMatrix {
        PermissionMatrix {
            grants: self.grants,
        }
    }
}
