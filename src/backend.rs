use crate::error::{Error, Result};
use log::debug;
use std::{path::{Path, PathBuf}, process::Command};

/// The clustering step of the pipeline.
///
/// An implementation reads the observation file at **input**, and once it returns successfully,
/// **output** contains the centroid stream (all iterations concatenated in emission order).
pub trait ClusteringBackend {
    fn run(&self, cluster_count: usize, input: &Path, output: &Path) -> Result<()>;
}

/// Runs an external k-means executable as `<executable> <cluster_count> <input> <output> [flags..]`.
///
/// The call blocks until the process exits, there is neither a timeout nor cancellation.
/// A failed start, a non-zero exit status, or a missing output file are reported as errors.
#[derive(Clone, Debug)]
pub struct ExternalProcess {
    executable: PathBuf,
    extra_args: Vec<String>
}
impl ExternalProcess {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into(), extra_args: Vec::new() }
    }

    /// Append a raw argument after the positional arguments.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into()); self
    }
    /// Limit the amount of iterations the external program runs.
    pub fn max_iterations(self, n: usize) -> Self {
        self.arg("--max-iterations").arg(n.to_string())
    }
    /// Let the external program use the manhattan distance.
    pub fn manhattan(self) -> Self { self.arg("--distance-manhattan") }
    /// Let the external program use random partition initialization.
    pub fn random_partition(self) -> Self { self.arg("--seeder-partition") }

    pub fn executable(&self) -> &Path { &self.executable }

    pub(crate) fn command(&self, cluster_count: usize, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg(cluster_count.to_string()).arg(input).arg(output).args(&self.extra_args);
        cmd
    }
}
impl ClusteringBackend for ExternalProcess {
    fn run(&self, cluster_count: usize, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = self.command(cluster_count, input, output);
        debug!("Running {:?}", cmd);
        let status = cmd.status().map_err(|source| Error::Spawn { executable: self.executable.clone(), source })?;
        if !status.success() {
            return Err(Error::ExternalFailure { executable: self.executable.clone(), status });
        }
        if !output.is_file() {
            return Err(Error::MissingOutput { path: output.to_path_buf() });
        }
        Ok(())
    }
}
