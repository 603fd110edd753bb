//! State checker that delegates to an external program
//!
//! The program is invoked as
//!
//! ```text
//! <program> [args...] relationship <environment-location> <peer-location>
//! <program> [args...] local-state <environment-location>
//! ```
//!
//! and must print the classification name (e.g. `MERGE_CONFLICT`,
//! `all_clear`) on the first line of stdout. Empty output means it could not
//! classify the source.

use crate::analysis::checker::StateChecker;
use crate::analysis::error::{CheckerError, CheckerResult};
use crate::model::{Classification, DataSource, LocalState, ProjectPreferences, Relationship};
use std::process::Command;

pub struct ProcessChecker {
    name: String,
    program: String,
    args: Vec<String>,
}

impl ProcessChecker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        Self {
            name: format!("process:{}", program),
            program,
            args,
        }
    }

    /// Run the program and return the first non-empty stdout line, if any
    fn run(&self, operation: &str, operands: &[&str]) -> CheckerResult<Option<String>> {
        log::trace!("Running {} {:?} {} {:?}", self.program, self.args, operation, operands);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(operation)
            .args(operands)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CheckerError::generic(format!(
                "{} {} exited with {}: {}",
                self.program,
                operation,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string))
    }

    fn parse<C: Classification>(&self, line: Option<String>) -> CheckerResult<Option<C>> {
        line.map(|line| {
            line.parse::<C>().map_err(|_| {
                CheckerError::generic(format!(
                    "{} printed unrecognised {} '{}'",
                    self.program,
                    C::LABEL,
                    line
                ))
            })
        })
        .transpose()
    }
}

impl StateChecker for ProcessChecker {
    fn relationship(
        &self,
        project: &ProjectPreferences,
        source: &DataSource,
    ) -> CheckerResult<Option<Relationship>> {
        let line = self.run(
            "relationship",
            &[project.environment.location.as_str(), source.location.as_str()],
        )?;
        self.parse(line)
    }

    fn local_state(&self, project: &ProjectPreferences) -> CheckerResult<Option<LocalState>> {
        let line = self.run("local-state", &[project.environment.location.as_str()])?;
        self.parse(line)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
