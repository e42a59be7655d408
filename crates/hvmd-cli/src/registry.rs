//! Static command table and name classification.

/// Access requirement of a known command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Public,
    PrivilegedOnly,
}

/// Result of classifying an arbitrary command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification {
    Public,
    PrivilegedOnly,
    Unknown,
}

/// Handler selector for a known command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Ping,
    Admins,
    Help,
    Identify,
    AddAdminSshKey,
    CatSsh,
}

/// One row of the command table.
#[derive(Debug)]
pub(crate) struct CommandSpec {
    pub(crate) name: &'static str,
    pub(crate) kind: CommandKind,
    pub(crate) access: Access,
    pub(crate) summary: &'static str,
    /// Listed only in the elevated help section.
    pub(crate) core_listed: bool,
}

pub(crate) const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "ping",
        kind: CommandKind::Ping,
        access: Access::Public,
        summary: "Show current Postgres server time",
        core_listed: false,
    },
    CommandSpec {
        name: "admins",
        kind: CommandKind::Admins,
        access: Access::Public,
        summary: "List all DB admin users (SUPERUSER or CREATEROLE)",
        core_listed: false,
    },
    CommandSpec {
        name: "help",
        kind: CommandKind::Help,
        access: Access::Public,
        summary: "Show this help message",
        core_listed: false,
    },
    CommandSpec {
        name: "identify",
        kind: CommandKind::Identify,
        access: Access::PrivilegedOnly,
        summary: "Show current user privileges and core access",
        core_listed: true,
    },
    CommandSpec {
        name: "addadminsshkey",
        kind: CommandKind::AddAdminSshKey,
        access: Access::Public,
        summary: "Add your SSH public key to the key file",
        core_listed: true,
    },
    CommandSpec {
        name: "catssh",
        kind: CommandKind::CatSsh,
        access: Access::Public,
        summary: "Display SSH key from the key file",
        core_listed: true,
    },
];

pub(crate) fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

pub(crate) fn classify(name: &str) -> Classification {
    match lookup(name).map(|spec| spec.access) {
        Some(Access::Public) => Classification::Public,
        Some(Access::PrivilegedOnly) => Classification::PrivilegedOnly,
        None => Classification::Unknown,
    }
}
