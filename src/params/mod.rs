//! Subsystem parameters and their line-oriented persistence.

mod core;
mod record;

pub use self::core::{Param, ParamRegistry, ParamSource, ParamValue};
pub use self::record::{
    FileParamStore, MemoryParamStore, ParamError, ParamRecord, ParamResult, ParamStore,
};
