//! In-memory entity store.
//!
//! Four append-only collections (campaigns, assets, audiences, creatives).
//! Insertion order is display order. There is no update or delete: hiding
//! something in the UI never removes it here.

pub mod models;
mod sample;

use chrono::Utc;

pub use models::{
    AdPlatform, Asset, Audience, Campaign, CampaignStatus, Creative, Filter, Objective,
    Performance,
};

/// Time-seeded monotonic id source.
///
/// Ids start from the wall clock in milliseconds and are bumped past the
/// last issued id, so two ids issued in the same millisecond never collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last + 1);
        self.last
    }
}

#[derive(Debug, Default)]
pub struct EntityStore {
    ids: IdGenerator,
    campaigns: Vec<Campaign>,
    assets: Vec<Asset>,
    audiences: Vec<Audience>,
    creatives: Vec<Creative>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the sample campaigns and assets.
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        sample::seed(&mut store);
        store
    }

    pub fn next_id(&mut self) -> u64 {
        self.ids.next_id()
    }

    // -- Appends --

    pub fn add_campaign(&mut self, campaign: Campaign) -> &Campaign {
        self.campaigns.push(campaign);
        &self.campaigns[self.campaigns.len() - 1]
    }

    pub fn add_asset(&mut self, asset: Asset) -> &Asset {
        self.assets.push(asset);
        &self.assets[self.assets.len() - 1]
    }

    pub fn add_audience(&mut self, audience: Audience) -> &Audience {
        self.audiences.push(audience);
        &self.audiences[self.audiences.len() - 1]
    }

    pub fn add_creative(&mut self, creative: Creative) -> &Creative {
        self.creatives.push(creative);
        &self.creatives[self.creatives.len() - 1]
    }

    // -- Reads --

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn audiences(&self) -> &[Audience] {
        &self.audiences
    }

    pub fn creatives(&self) -> &[Creative] {
        &self.creatives
    }

    pub fn campaign(&self, id: u64) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn asset(&self, id: u64) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn audience(&self, id: u64) -> Option<&Audience> {
        self.audiences.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let mut ids = IdGenerator::default();
        let issued: Vec<u64> = (0..1000).map(|_| ids.next_id()).collect();
        assert!(issued.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sample_store_has_two_campaigns_and_assets() {
        let store = EntityStore::with_sample_data();
        assert_eq!(store.campaigns().len(), 2);
        assert_eq!(store.assets().len(), 2);
        assert!(store.audiences().is_empty());
        assert!(store.creatives().is_empty());
        assert_eq!(store.campaigns()[0].name, "Summer Sale Campaign");
        assert_eq!(store.assets()[1].name, "product-video.mp4");
    }

    #[test]
    fn appends_preserve_insertion_order_and_lookup() {
        let mut store = EntityStore::new();
        for name in ["a.png", "b.pdf", "c.mp4"] {
            let id = store.next_id();
            store.add_asset(Asset {
                id,
                name: name.into(),
                size: 1,
                mime_type: "application/octet-stream".into(),
                uploaded_at: Utc::now(),
            });
        }
        let names: Vec<&str> = store.assets().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.pdf", "c.mp4"]);

        let id = store.assets()[1].id;
        assert_eq!(store.asset(id).map(|a| a.name.as_str()), Some("b.pdf"));
        assert!(store.asset(0).is_none());
    }
}
