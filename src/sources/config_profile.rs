use crate::core::profile::{BusinessProfile, ProfileSource};
use anyhow::Result;
use async_trait::async_trait;

/// Serves the profile record embedded in the application config.
pub struct ConfigProfileSource {
    profile: Option<BusinessProfile>,
}

impl ConfigProfileSource {
    pub fn new(profile: Option<BusinessProfile>) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl ProfileSource for ConfigProfileSource {
    async fn load(&self) -> Result<Option<BusinessProfile>> {
        // An all-empty record is the same as no record at all.
        Ok(self.profile.clone().filter(|p| !p.is_empty()))
    }
}
