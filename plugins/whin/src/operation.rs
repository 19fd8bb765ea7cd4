use std::fmt;
use std::str::FromStr;

use crate::error::SendError;

/// What the node does with an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Post one content payload to the backend.
    #[default]
    Send,
}

impl Operation {
    /// Every supported operation.
    pub const ALL: [Self; 1] = [Self::Send];

    /// Wire value of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| SendError::UnknownOperation(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_send() {
        assert_eq!("send".parse::<Operation>().unwrap(), Operation::Send);
        assert_eq!(Operation::Send.to_string(), "send");
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "delete".parse::<Operation>().unwrap_err();
        assert!(matches!(err, SendError::UnknownOperation(ref name) if name == "delete"));
        assert_eq!(err.to_string(), "unknown operation `delete`");
    }
}
