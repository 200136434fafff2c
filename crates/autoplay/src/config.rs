use crate::PolicyConfig;

#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub games: u32,
    pub max_steps: u32,
    pub policy: PolicyConfig,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            games: 1,
            max_steps: 500,
            policy: PolicyConfig::default(),
        }
    }
}
