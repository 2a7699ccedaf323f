//! Business policies evaluated over stored winks

mod cooldown;

pub use cooldown::CooldownPolicy;
