//! Graph API field lists, shared across queries to avoid repetition.
//!
//! The nested `adsets{...}` / `ads{...}` projections pull the child
//! effective statuses the status resolver rolls up, so one list call per
//! collection is enough for the whole dashboard.

pub const API_VERSION: &str = "v19.0";
pub const BASE_URL: &str = "https://graph.facebook.com";

pub const ACCOUNT_FIELDS: &str =
    "id,name,currency,account_status,disable_reason,spend_cap,amount_spent";

pub const CAMPAIGN_FIELDS: &str = "id,name,status,effective_status,configured_status,account_id,\
     spend_cap,amount_spent,daily_budget,lifetime_budget,\
     adsets{effective_status,ads{effective_status}}";

pub const ADSET_FIELDS: &str = "id,name,status,effective_status,configured_status,campaign_id,\
     account_id,daily_budget,lifetime_budget,ads{effective_status}";

pub const AD_FIELDS: &str = "id,name,status,effective_status,configured_status,adset_id,\
     campaign_id,account_id,creative{title,body}";
