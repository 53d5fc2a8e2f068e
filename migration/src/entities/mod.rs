pub mod client;
pub mod competitor;
pub mod query;
pub mod report;
pub mod shareable_link;
pub mod subscription_tier;

pub use client::Entity as ClientEntity;
pub use competitor::Entity as CompetitorEntity;
pub use query::Entity as QueryEntity;
pub use report::Entity as ReportEntity;
pub use shareable_link::Entity as ShareableLinkEntity;
pub use subscription_tier::Entity as SubscriptionTierEntity;
