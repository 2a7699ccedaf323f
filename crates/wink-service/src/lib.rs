//! # wink-service
//!
//! Application layer: the wink interaction manager, its error type, and the
//! DTOs it hands back to callers.
//!
//! ```rust,ignore
//! use wink_core::CurrentUser;
//! use wink_service::{ServiceContext, WinkService};
//!
//! async fn example(me: CurrentUser, them: wink_core::Snowflake) -> anyhow::Result<()> {
//!     let ctx = ServiceContext::in_memory();
//!     let winks = WinkService::new(&ctx);
//!
//!     let status = winks.check_status(&me, them).await?;
//!     if status.can_send_new {
//!         let sent = winks.send(&me, them).await?;
//!         println!("{}", sent.message);
//!     }
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod services;

pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, WinkService};
