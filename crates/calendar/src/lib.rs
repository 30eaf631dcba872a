//! # horae-calendar
//!
//! Exact calendar arithmetic for climate and ocean model clocks.
//!
//! Model time is kept as a [`BaseTime`]: a rational count of seconds from a
//! calendar's epoch. A [`Calendar`] converts between that count and
//! broken-down dates for Gregorian, Julian day, no-leap, 360-day, custom and
//! no-calendar time-keeping.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["CalendarKind"] -->|"Calendar::builtin()"| C["Calendar"]
//!     B["CustomRules"] -->|"Calendar::custom()"| C
//!     D["CalendarTime"] -->|".to_time()"| E["BaseTime"]
//!     E -->|".to_date()"| D
//!     C -->|"serialize()"| F["bytes"]
//!     F -->|"deserialize()"| C
//!     E -->|"time_sequence()"| G["Vec of CalendarTime"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use horae_calendar::{BaseTime, Calendar, CalendarKind, CalendarTime};
//!
//! let cal = Calendar::builtin("model", CalendarKind::Gregorian).unwrap();
//!
//! // 2000-01-01 is Julian day 2 451 545.
//! let t = cal.to_time(&CalendarTime::ymd(2000, 1, 1)).unwrap();
//! assert_eq!(t, BaseTime::from_whole_seconds(2_451_545 * 86_400));
//!
//! // Half a day later.
//! let noon = t.checked_add(BaseTime::from_whole_seconds(43_200)).unwrap();
//! let date = cal.to_date(&noon).unwrap();
//! assert_eq!(date.day(), Some(1));
//! assert_eq!(date.time_of_day(), BaseTime::from_whole_seconds(43_200));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `rational` | Normalized mixed-number durations |
//! | `base_time` | Seconds since a calendar epoch |
//! | `kind` | Calendar kind codes and names |
//! | `tables` | Built-in month tables and leap rule |
//! | `date` | Broken-down calendar dates |
//! | `calendar` | Calendar construction, identity and validation |
//! | `convert` | Date to time and time to date conversions |
//! | `registry` | Id assignment and instance counts |
//! | `persist` | Byte encoding for checkpoint/restart |
//! | `sequence` | Fixed-step date sequences |
//! | `error` | Error types |

mod base_time;
mod calendar;
mod convert;
mod date;
mod error;
mod kind;
mod persist;
mod rational;
mod registry;
mod sequence;
mod tables;

pub use base_time::BaseTime;
pub use calendar::{Calendar, CustomRules};
pub use date::CalendarTime;
pub use error::CalendarError;
pub use kind::CalendarKind;
pub use persist::{deserialize, serialize};
pub use rational::RationalDuration;
pub use registry::{created_calendars, live_calendars};
pub use sequence::time_sequence;
pub use tables::{SECONDS_PER_DAY, is_leap_year};
