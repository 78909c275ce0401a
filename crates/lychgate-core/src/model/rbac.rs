//! Roles, resources, actions, and permission tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// Role of a principal, strictly ordered low to high.
///
/// The authority order is carried by [`Role::level`], not by the matrix: the
/// matrix answers "may this role touch this resource", the level answers
/// "is this role at least that senior". The two are independent on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Viewer,
    Editor,
    MinistryLeader,
    Admin,
    Pastor,
    SuperAdmin,
}

impl Role {
    /// All roles, low to high. The permission matrix must be total over this.
    pub const ALL: [Role; 6] = [
        Role::Viewer,
        Role::Editor,
        Role::MinistryLeader,
        Role::Admin,
        Role::Pastor,
        Role::SuperAdmin,
    ];

    /// Authority level, strictly increasing with seniority.
    pub fn level(self) -> u8 {
        match self {
            Role::Viewer => 10,
            Role::Editor => 20,
            Role::MinistryLeader => 30,
            Role::Admin => 40,
            Role::Pastor => 50,
            Role::SuperAdmin => 60,
        }
    }

    /// Name used in config files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::MinistryLeader => "ministry-leader",
            Role::Admin => "admin",
            Role::Pastor => "pastor",
            Role::SuperAdmin => "super-admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "ministry-leader" => Ok(Role::MinistryLeader),
            "admin" => Ok(Role::Admin),
            "pastor" => Ok(Role::Pastor),
            "super-admin" => Ok(Role::SuperAdmin),
            other => Err(AccessError::configuration(format!("unknown role: {other}"))),
        }
    }
}

/// Resource surfaces the application exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Persons,
    Programs,
    Users,
    Letters,
    Finances,
}

impl Resource {
    /// All resources. The permission matrix must be total over this.
    pub const ALL: [Resource; 5] = [
        Resource::Persons,
        Resource::Programs,
        Resource::Users,
        Resource::Letters,
        Resource::Finances,
    ];

    /// Name used in config files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Persons => "persons",
            Resource::Programs => "programs",
            Resource::Users => "users",
            Resource::Letters => "letters",
            Resource::Finances => "finances",
        }
    }

    /// Fragment used in `RESOURCE_ACTION` permission tokens.
    pub fn token(self) -> &'static str {
        match self {
            Resource::Persons => "PERSONS",
            Resource::Programs => "PROGRAMS",
            Resource::Users => "USERS",
            Resource::Letters => "LETTERS",
            Resource::Finances => "FINANCES",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "persons" => Ok(Resource::Persons),
            "programs" => Ok(Resource::Programs),
            "users" => Ok(Resource::Users),
            "letters" => Ok(Resource::Letters),
            "finances" => Ok(Resource::Finances),
            other => Err(AccessError::configuration(format!(
                "unknown resource: {other}"
            ))),
        }
    }
}

/// Action on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    /// All actions.
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    /// Name used in config files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Fragment used in `RESOURCE_ACTION` permission tokens.
    pub fn token(self) -> &'static str {
        match self {
            Action::Read => "READ",
            Action::Create => "CREATE",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" => Ok(Action::Read),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(AccessError::configuration(format!(
                "unknown action: {other}"
            ))),
        }
    }
}

/// Permission token in `RESOURCE_ACTION` form, e.g. `PROGRAMS_CREATE`.
///
/// Tokens are the representation used by per-principal override sets.
pub fn permission_token(resource: Resource, action: Action) -> String {
    format!("{}_{}", resource.token(), action.token())
}

/// Parse a `RESOURCE_ACTION` token back into its pair.
///
/// The action fragment never contains an underscore, so the split is taken
/// at the last one.
pub fn parse_permission_token(token: &str) -> crate::Result<(Resource, Action)> {
    let (resource, action) = token.rsplit_once('_').ok_or_else(|| {
        AccessError::configuration(format!("malformed permission token: {token}"))
    })?;
    let resource = match resource {
        "PERSONS" => Resource::Persons,
        "PROGRAMS" => Resource::Programs,
        "USERS" => Resource::Users,
        "LETTERS" => Resource::Letters,
        "FINANCES" => Resource::Finances,
        other => {
            return Err(AccessError::configuration(format!(
                "unknown resource in permission token: {other}"
            )))
        }
    };
    let action = match action {
        "READ" => Action::Read,
        "CREATE" => Action::Create,
        "UPDATE" => Action::Update,
        "DELETE" => Action::Delete,
        other => {
            return Err(AccessError::configuration(format!(
                "unknown action in permission token: {other}"
            )))
        }
    };
    Ok((resource, action))
}
