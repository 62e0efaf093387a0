// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`pagination`]: The search and pagination controller
//! - [`voice_search`]: Voice capture to search orchestration
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use voice_lens::application::pagination::PaginationController;
//! use voice_lens::infrastructure::pexels::PexelsClient;
//!
//! let client = PexelsClient::new(settings)?;
//! let mut controller = PaginationController::default();
//! if let Some(ticket) = controller.search("mountains") {
//!     let result = ticket.dispatch(&client).await;
//!     controller.apply(&ticket, result);
//! }
//! ```

pub mod pagination;
pub mod port;
pub mod voice_search;
