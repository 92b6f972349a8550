mod model;

pub use model::{ExitCode, MachineError};
