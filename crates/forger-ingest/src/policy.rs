//! Entity classes that never leave the pipeline as text.

use forger_nlp::EntityLabel;

/// Set of entity labels dropped from cleaned sentences and phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPolicy {
    excluded: Vec<EntityLabel>,
}

impl EntityPolicy {
    /// PERSON, ORG, GPE and EMAIL.
    pub fn privacy_default() -> Self {
        Self::new([
            EntityLabel::Person,
            EntityLabel::Org,
            EntityLabel::Gpe,
            EntityLabel::Email,
        ])
    }

    pub fn new(labels: impl IntoIterator<Item = EntityLabel>) -> Self {
        let mut excluded = Vec::new();
        for label in labels {
            if !excluded.contains(&label) {
                excluded.push(label);
            }
        }
        Self { excluded }
    }

    /// Exclude nothing.
    pub fn allow_all() -> Self {
        Self {
            excluded: Vec::new(),
        }
    }

    pub fn is_excluded(&self, label: &EntityLabel) -> bool {
        self.excluded.contains(label)
    }

    pub fn labels(&self) -> &[EntityLabel] {
        &self.excluded
    }
}

impl Default for EntityPolicy {
    fn default() -> Self {
        Self::privacy_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excludes_privacy_labels() {
        let policy = EntityPolicy::default();
        assert!(policy.is_excluded(&EntityLabel::Person));
        assert!(policy.is_excluded(&EntityLabel::Email));
        assert!(!policy.is_excluded(&EntityLabel::Phone));
        assert!(!policy.is_excluded(&EntityLabel::Other("DATE".into())));
    }

    #[test]
    fn test_duplicates_collapse() {
        let policy = EntityPolicy::new([EntityLabel::Org, EntityLabel::Org]);
        assert_eq!(policy.labels().len(), 1);
        assert!(EntityPolicy::allow_all().labels().is_empty());
    }
}
