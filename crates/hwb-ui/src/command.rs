//! Actions the host can ask the operator about, and the operator's answer.

/// User-facing lifecycle action awaiting physical approval.
///
/// Converts from the one-byte code used on the host link; any code outside
/// the known set becomes [`Command::Unknown`] rather than undefined behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Delete the current wallet and create a new one
    NukeWallet,
    NewAddress,
    /// Spend every staged output (and the fee, if any)
    SignTransaction,
    /// Erase all of non-volatile storage
    Format,
    ChangeName,
    BackupWallet,
    /// Delete the current wallet and restore from a backup seed
    RestoreWallet,
    /// Unrecognized code; always denied
    Unknown(u8),
}

impl Command {
    /// Wire code of this command
    pub const fn code(self) -> u8 {
        match self {
            Command::NukeWallet => 1,
            Command::NewAddress => 2,
            Command::SignTransaction => 3,
            Command::Format => 4,
            Command::ChangeName => 5,
            Command::BackupWallet => 6,
            Command::RestoreWallet => 7,
            Command::Unknown(code) => code,
        }
    }
}

impl From<u8> for Command {
    fn from(code: u8) -> Self {
        match code {
            1 => Command::NukeWallet,
            2 => Command::NewAddress,
            3 => Command::SignTransaction,
            4 => Command::Format,
            5 => Command::ChangeName,
            6 => Command::BackupWallet,
            7 => Command::RestoreWallet,
            other => Command::Unknown(other),
        }
    }
}

/// Outcome of one prompt, or of a whole confirmation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Deny,
}

impl Decision {
    pub fn is_accepted(self) -> bool {
        self == Decision::Accept
    }
}

impl core::fmt::Display for Decision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Decision::Accept => write!(f, "accept"),
            Decision::Deny => write!(f, "deny"),
        }
    }
}
