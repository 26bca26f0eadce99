pub mod measurement;
pub mod observation;
pub mod station;
pub mod table;
