//! # helpdesk-entity
//!
//! Domain entity models for the helpdesk. Every struct in this crate
//! represents a database table row or a domain value object. Associations
//! are held as typed ids and resolved through the storage layer; no entity
//! embeds another entity's live record.

pub mod archive;
pub mod auth;
pub mod customer;
pub mod email;
pub mod inbox;
pub mod notification;
pub mod setting;
pub mod template;
pub mod ticket;
pub mod user;
