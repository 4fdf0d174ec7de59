//! # Date Equations
//!
//! Date Equations is a small library of Gregorian calendar
//! calculations over epoch days, i.e. days relative to
//! 1970-01-01. The conversions are implemented with the Euclidean
//! affine functions described by Cassio Neri and Lorenz Schneider.
//!
//! ``` rust
//! use date_equations::gregorian;
//!
//! let date = gregorian::ymd_from_epoch_days(0);
//! assert_eq!(date, (1970, 1, 1));
//!
//! let days = gregorian::epoch_days_from_ymd(2016, 1, 26);
//! assert_eq!(days, 16_826);
//! assert!(gregorian::is_leap_year(2016));
//! ```
#![no_std]

pub mod gregorian;
