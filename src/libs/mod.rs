pub mod attachments;
pub mod auth;
pub mod cache;
pub mod codec;
pub mod composer;
pub mod connectivity;
pub mod errors;
pub mod models;
pub mod remote;
pub mod sync;
