use std::ffi::OsString;

/// Render parsed arguments back into the argv form that parses to the same
/// value. Exercised by the CLI fuzz round-trip test.
pub trait ToArgs {
    fn to_args(&self) -> Vec<OsString>;
}
