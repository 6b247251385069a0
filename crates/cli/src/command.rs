use core::str::FromStr;

use crate::error::InputError;

/// The closed set of commands the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    Balance,
    Sale,
    Purchase,
    Account,
    List,
    Warehouse,
    Review,
    End,
}

impl CommandName {
    /// All commands, in the order they are advertised.
    pub const ALL: [CommandName; 8] = [
        CommandName::Balance,
        CommandName::Sale,
        CommandName::Purchase,
        CommandName::Account,
        CommandName::List,
        CommandName::Warehouse,
        CommandName::Review,
        CommandName::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Balance => "balance",
            CommandName::Sale => "sale",
            CommandName::Purchase => "purchase",
            CommandName::Account => "account",
            CommandName::List => "list",
            CommandName::Warehouse => "warehouse",
            CommandName::Review => "review",
            CommandName::End => "end",
        }
    }

    /// Whether a successful run of this command adds to the operation log.
    pub fn is_recorded(self) -> bool {
        matches!(
            self,
            CommandName::Balance | CommandName::Sale | CommandName::Purchase
        )
    }

    /// `Commands: balance, sale, ...`
    pub fn banner() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
        format!("Commands: {}", names.join(", "))
    }
}

impl core::fmt::Display for CommandName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = InputError;

    /// Exact, case-sensitive match; callers trim and lowercase first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InputError::UnknownCommand(s.to_string()))
    }
}
