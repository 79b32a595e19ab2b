pub mod month;
pub mod observation;
pub mod parameter;
pub mod station;
