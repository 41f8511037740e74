pub mod set_status;
pub mod submit;

pub use set_status::{SetCarStatusCommand, SetCarStatusError};
pub use submit::{SubmitCarCommand, SubmitCarError, SubmitCarResponse, SubmitOutcome, ValidatedCar};
