//! Data models for Astral Pips.
//!
//! - `Identity`: the user record issued by the identity provider
//! - `Profile`: application-specific user metadata
//! - Landing content: market overview samples, forex facts, courses and
//!   community links

pub mod course;
pub mod identity;
pub mod market;
pub mod profile;

pub use course::{community_links, course_catalog, CommunityLink, Course, CourseStatus};
pub use identity::{is_valid_uuid, Identity};
pub use market::{market_data, series_bounds, MarketPoint, Series, FOREX_FACTS};
pub use profile::{ExperienceLevel, Profile};
