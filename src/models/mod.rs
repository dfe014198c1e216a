//! Work-breakdown-structure domain models.
//!
//! Provides the input tree ([`Task`], [`Resource`]), the workday calendar,
//! and the annotated output tree ([`ScheduledTask`]).
//!
//! # Domain Mappings
//!
//! | wbs-schedule | Construction | Software | Events |
//! |--------------|--------------|----------|--------|
//! | Task | Phase/Work package | Epic/Story | Workstream |
//! | Resource | Crew/Equipment | Engineer | Vendor |
//! | Lead time | Material delivery | Approval wait | Booking lead |
//! | 24/7 task | Concrete curing | Soak test | Venue setup |

mod calendar;
mod lenient;
mod resource;
mod schedule;
mod task;

pub use calendar::{add_days, add_hours, default_workday_start, WorkCalendar};
pub use resource::Resource;
pub use schedule::{find_scheduled, CostRollup, Iter, ScheduledTask, TaskWindow};
pub use task::{ScheduleMode, Task};

pub(crate) use lenient::finite_or_zero;
