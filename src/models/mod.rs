pub mod appointment;
pub mod view;

pub use appointment::{AppointmentFilter, AppointmentKind, AppointmentStatus};
pub use view::{AppointmentView, ServiceLine};
