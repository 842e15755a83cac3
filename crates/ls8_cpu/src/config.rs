use typed_builder::TypedBuilder;

/// Runtime knobs for a [`Machine`](crate::Machine).
///
/// ```
/// use ls8_cpu::MachineConfig;
///
/// let config = MachineConfig::builder().trace(true).build();
/// assert!(config.trace);
/// assert!(config.guard_call);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct MachineConfig {
    /// Log a trace line (`log::trace!`) before every instruction.
    #[builder(default = false)]
    pub trace: bool,
    /// Write R0 to the console when HLT executes.
    ///
    /// Off by default: halting is a pure state transition.
    #[builder(default = false)]
    pub echo_on_halt: bool,
    /// Apply PUSH's stack-floor check to the return address pushed by CALL.
    #[builder(default = true)]
    pub guard_call: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
