pub mod client_logo;
pub mod collection_item;
pub mod media_asset;
pub mod project;
pub mod section_content;
pub mod service;
pub mod stat;
pub mod testimonial;
pub mod user;
