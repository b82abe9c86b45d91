use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Lifecycle points fired by the pipeline, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// A compilation was created and seeded with the compiled output
    Compilation,
    /// Assets are final and about to be written; the last chance to add one
    Emit,
    /// Assets were written to the output directory
    AfterEmit,
    /// The run finished
    Done,
}

impl HookEvent {
    pub const ALL: [HookEvent; 4] = [
        HookEvent::Compilation,
        HookEvent::Emit,
        HookEvent::AfterEmit,
        HookEvent::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::Compilation => "compilation",
            HookEvent::Emit => "emit",
            HookEvent::AfterEmit => "after-emit",
            HookEvent::Done => "done",
        }
    }
}

impl FromStr for HookEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compilation" => Ok(HookEvent::Compilation),
            "emit" => Ok(HookEvent::Emit),
            "after-emit" | "afterEmit" => Ok(HookEvent::AfterEmit),
            "done" => Ok(HookEvent::Done),
            other => Err(Error::UnknownHook(other.to_string())),
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_events() {
        for event in HookEvent::ALL {
            assert_eq!(event.as_str().parse::<HookEvent>().unwrap(), event);
        }
        assert_eq!(
            "afterEmit".parse::<HookEvent>().unwrap(),
            HookEvent::AfterEmit
        );
    }

    #[test]
    fn test_parse_unknown_event() {
        let err = "emitted".parse::<HookEvent>().unwrap_err();
        assert!(matches!(err, Error::UnknownHook(name) if name == "emitted"));
        assert!("Emit".parse::<HookEvent>().is_err());
    }
}
