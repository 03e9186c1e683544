//! Core library for `bl`, the Beamlit CLI.
//!
//! A declarative catalogue of resource kinds ([`resource::registry`]) is
//! dispatched onto the control plane's CRUD API ([`resource::ops`]), with
//! untyped manifest documents coerced into typed wire payloads
//! ([`resource::coerce`]), results classified into per-resource outcomes
//! ([`resource::outcome`]), and read results rendered as table, yaml, pretty,
//! or json ([`render`]).

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod resource;
