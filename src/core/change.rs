use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    FirstSeen,
    Increased { by: u32 },
    Decreased { by: u32 },
    Unchanged,
}

impl ChangeKind {
    pub fn classify(previous: Option<u32>, current: u32) -> Self {
        match previous {
            None => ChangeKind::FirstSeen,
            Some(prev) if current > prev => ChangeKind::Increased { by: current - prev },
            Some(prev) if current < prev => ChangeKind::Decreased { by: prev - current },
            Some(_) => ChangeKind::Unchanged,
        }
    }
}

/// When a counted page produces a notification.
///
/// `Always` is the default and notifies on every successful count, unchanged ones
/// included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum NotifyPolicy {
    #[default]
    Always,
    OnChange,
    OnIncrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeDecision {
    pub kind: ChangeKind,
    pub notify: bool,
}

pub fn decide(policy: NotifyPolicy, previous: Option<u32>, current: u32) -> ChangeDecision {
    let kind = ChangeKind::classify(previous, current);
    let notify = match policy {
        NotifyPolicy::Always => true,
        NotifyPolicy::OnChange => kind != ChangeKind::Unchanged,
        NotifyPolicy::OnIncrease => matches!(
            kind,
            ChangeKind::Increased { .. } | ChangeKind::FirstSeen
        ),
    };
    ChangeDecision { kind, notify }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ChangeKind::classify(None, 3), ChangeKind::FirstSeen);
        assert_eq!(ChangeKind::classify(Some(3), 5), ChangeKind::Increased { by: 2 });
        assert_eq!(ChangeKind::classify(Some(5), 1), ChangeKind::Decreased { by: 4 });
        assert_eq!(ChangeKind::classify(Some(5), 5), ChangeKind::Unchanged);
    }

    #[test]
    fn test_always_policy_notifies_on_unchanged_count() {
        let decision = decide(NotifyPolicy::Always, Some(5), 5);
        assert_eq!(decision.kind, ChangeKind::Unchanged);
        assert!(decision.notify);

        assert!(decide(NotifyPolicy::Always, Some(9), 2).notify);
        assert!(decide(NotifyPolicy::Always, None, 0).notify);
    }

    #[test]
    fn test_default_policy_is_always() {
        assert_eq!(NotifyPolicy::default(), NotifyPolicy::Always);
    }

    #[test]
    fn test_on_change_policy() {
        assert!(!decide(NotifyPolicy::OnChange, Some(5), 5).notify);
        assert!(decide(NotifyPolicy::OnChange, Some(5), 4).notify);
        assert!(decide(NotifyPolicy::OnChange, None, 0).notify);
    }

    #[test]
    fn test_on_increase_policy() {
        assert!(decide(NotifyPolicy::OnIncrease, Some(5), 6).notify);
        assert!(!decide(NotifyPolicy::OnIncrease, Some(5), 4).notify);
        assert!(!decide(NotifyPolicy::OnIncrease, Some(5), 5).notify);
    }
}
