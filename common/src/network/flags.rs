use std::fmt;
use std::str::FromStr;

use crate::error::FlagError;

/// TCP control bits as they appear in byte 13 of the header.
const FLAG_TABLE: [(char, u8); 8] = [
    ('F', TcpFlagSet::FIN.0),
    ('S', TcpFlagSet::SYN.0),
    ('R', TcpFlagSet::RST.0),
    ('P', TcpFlagSet::PSH.0),
    ('A', TcpFlagSet::ACK.0),
    ('U', TcpFlagSet::URG.0),
    ('E', TcpFlagSet::ECE.0),
    ('C', TcpFlagSet::CWR.0),
];

/// A non-empty set of TCP flags, written as letters such as `"SA"` or `"R"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TcpFlagSet(u8);

impl TcpFlagSet {
    pub const FIN: TcpFlagSet = TcpFlagSet(0x01);
    pub const SYN: TcpFlagSet = TcpFlagSet(0x02);
    pub const RST: TcpFlagSet = TcpFlagSet(0x04);
    pub const PSH: TcpFlagSet = TcpFlagSet(0x08);
    pub const ACK: TcpFlagSet = TcpFlagSet(0x10);
    pub const URG: TcpFlagSet = TcpFlagSet(0x20);
    pub const ECE: TcpFlagSet = TcpFlagSet(0x40);
    pub const CWR: TcpFlagSet = TcpFlagSet(0x80);

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, other: TcpFlagSet) -> bool {
        self.0 & other.0 == other.0
    }
}

impl FromStr for TcpFlagSet {
    type Err = FlagError;

    /// Parses Scapy-style flag letters. Case matters and repeats are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FlagError::Empty);
        }

        let mut bits: u8 = 0;
        for c in s.chars() {
            let (_, bit) = FLAG_TABLE
                .iter()
                .find(|(letter, _)| *letter == c)
                .ok_or(FlagError::Unknown(c))?;
            bits |= bit;
        }
        Ok(TcpFlagSet(bits))
    }
}

impl fmt::Display for TcpFlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, bit) in FLAG_TABLE {
            if self.0 & bit != 0 {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
