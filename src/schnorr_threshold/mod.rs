pub mod threshold_math;
pub mod threshold_protocol;
