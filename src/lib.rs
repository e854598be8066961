//! Schroeder reverb.
//!
//! Three all-pass filters in series followed by four feed-forward comb filters in
//! parallel, summed and blended with the dry signal. Runs per sample with no
//! allocation after construction.
//!
//! ```no_run
//! use schroeder::{AudioNode, ReverbConfig, SchroederReverb};
//!
//! let config = ReverbConfig::default().with_dry_wet(0.4);
//! let mut reverb: SchroederReverb = SchroederReverb::new(&config).unwrap();
//!
//! let [left, right] = reverb.process([1000.0, -500.0]);
//! assert_eq!(left, right);
//! ```

// For tests we use std.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod audio;
pub mod config;
mod control;
mod error;
mod slew;

#[cfg(feature = "wav")]
pub mod wav;

#[cfg(test)]
mod testutil;

pub use audio::{AudioNode, Filter, LengthClamp, SchroederReverb};
pub use config::{OutputStage, ReverbConfig, RoomMapping, Stage};
pub use control::{percent_to_ratio, Controls};
pub use error::Error;
pub use slew::SlewLimiter;
