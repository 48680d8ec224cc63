use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(NotificationId);
id_newtype!(AttemptId);

/// Academic role offered by the sign-in form's role selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
    Staff,
    Researcher,
    Administrator,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Student,
        Role::Faculty,
        Role::Staff,
        Role::Researcher,
        Role::Administrator,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Faculty => "Faculty Member",
            Role::Staff => "Administrative Staff",
            Role::Researcher => "Researcher",
            Role::Administrator => "System Administrator",
        }
    }

    /// Accepts either the snake_case key or the display label, ignoring case.
    pub fn parse(raw: &str) -> Option<Role> {
        let raw = raw.trim();
        Role::ALL.into_iter().find(|role| {
            raw.eq_ignore_ascii_case(role.key()) || raw.eq_ignore_ascii_case(role.label())
        })
    }

    fn key(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Staff => "staff",
            Role::Researcher => "researcher",
            Role::Administrator => "administrator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Email,
    Password,
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}
