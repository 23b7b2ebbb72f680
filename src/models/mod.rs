pub mod appointment;
pub mod record_id;
pub mod slot;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use record_id::RecordId;
pub use slot::{NewSlot, Slot, SlotType};
