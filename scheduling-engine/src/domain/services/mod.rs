pub mod assembler;
pub mod availability;
pub mod composer;
pub mod pipeline;

pub use assembler::ProblemAssembler;
pub use availability::{DayMasks, MaskBuilder};
pub use composer::DayComposer;
pub use pipeline::{
    ComplianceOptions, PreviousShift, RunParameters, ScheduleInputs, SchedulePipeline,
};
