//! Graph API client for the ads platform.
//!
//! Wraps the Marketing API surface the dashboard consumes (entity
//! listing, status toggles, budget patches, campaign creation, interest
//! search) behind the [`api::AdsApi`] trait so the service and its tests
//! share one seam. [`client::GraphClient`] is the production
//! implementation over [`reqwest`].

pub mod api;
pub mod client;
pub mod error;
pub mod fields;

pub use api::{AdsApi, CampaignDraft, DateRange, InterestMatch, MediaUpload};
pub use client::GraphClient;
pub use error::MetaApiError;
