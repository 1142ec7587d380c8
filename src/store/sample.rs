use chrono::Utc;

use super::{AdPlatform, Asset, Campaign, CampaignStatus, EntityStore, Objective, Performance};

pub(super) fn seed(store: &mut EntityStore) {
    let now = Utc::now();

    let campaigns = [
        (
            "Summer Sale Campaign",
            AdPlatform::MetaAds,
            Objective::Conversions,
            150.0,
            (45_000, 1_200, 85),
        ),
        (
            "Brand Awareness Q3",
            AdPlatform::GoogleAds,
            Objective::BrandAwareness,
            200.0,
            (78_000, 950, 42),
        ),
    ];
    for (name, platform, objective, daily_budget, (impressions, clicks, conversions)) in campaigns {
        let id = store.next_id();
        store.add_campaign(Campaign {
            id,
            name: name.to_string(),
            platform,
            objective,
            daily_budget,
            status: CampaignStatus::Active,
            performance: Performance {
                impressions,
                clicks,
                conversions,
            },
            created_at: now,
        });
    }

    let assets = [
        ("hero-banner.jpg", 524_288, "image/jpeg"),
        ("product-video.mp4", 15_728_640, "video/mp4"),
    ];
    for (name, size, mime_type) in assets {
        let id = store.next_id();
        store.add_asset(Asset {
            id,
            name: name.to_string(),
            size,
            mime_type: mime_type.to_string(),
            uploaded_at: now,
        });
    }
}
