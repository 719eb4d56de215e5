//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic
//!
//! Nothing in this layer performs I/O or logs.
//!
//! # Bounded Contexts
//!
//! - [`risk_management`]: Pre-trade risk rules and severity resolution
//! - [`shared`]: Money, symbols, timestamps and identifiers

pub mod risk_management;
pub mod shared;
