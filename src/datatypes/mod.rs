mod address;
mod param;

pub use address::DeviceAddress;
pub use param::{ParamKey, Parameter};
