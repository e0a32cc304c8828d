use std::process::ExitCode;

/// Process exit status of an `ngloc` run.
///
/// `Failure` means the command ran but has findings to report, such as
/// missing translations under `scan --missing` or a search without hits.
/// `Error` means it could not run at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Status of a command that completed with `finding_count` findings.
    ///
    /// Commands that only report (`scan` without `--missing`, `watch`) pass
    /// `exit_on_findings = false` and always succeed.
    pub fn for_findings(finding_count: usize, exit_on_findings: bool) -> Self {
        if exit_on_findings && finding_count > 0 {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        let code: u8 = match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        };
        ExitCode::from(code)
    }
}
