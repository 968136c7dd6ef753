/// ProgressReporter port for reporting progress during operations
///
/// This is the crate's diagnostic channel: workflows narrate what they do
/// (uploads, per-asset cleanup failures, final counts) through it instead of
/// printing directly.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress as `current` of `total`, with an optional message
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
