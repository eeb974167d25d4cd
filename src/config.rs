use serde::Deserialize;

/// What `add` does with a draft whose `drawId` is already being edited.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Append anyway. Lookups by id then return the first match.
    #[default]
    Allow,
    /// Refuse the whole addition and leave the drafts untouched.
    Reject,
    /// Swap the tracked draft for the new one, keeping its position.
    Replace,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl StoreConfig {
    pub fn with_duplicate_policy(duplicate_policy: DuplicatePolicy) -> Self {
        Self { duplicate_policy }
    }

    pub fn from_yaml_str(contents: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }
}
