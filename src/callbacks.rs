//! Implementation of different callback functions.
use crate::convergence::ConvergenceSample;
use crate::core::Result;

use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Trait for implementing callbacks for convergence sweeps.
pub trait Callback<T> {
    /// This method is called after each sample of a sweep has been computed and may report
    /// information about it. `samples` holds all samples so far, the newest one last.
    fn report(&self, samples: &[ConvergenceSample<T>]);
}

/// A callback function that does nothing
pub struct SinkCallback {}

impl<T> Callback<T> for SinkCallback {
    fn report(&self, _: &[ConvergenceSample<T>]) {}
}

/// A callback function that prints each individual sample
pub struct SimpleCallback {}

impl<T> Callback<T> for SimpleCallback
where
    T: Copy + Display,
{
    fn report(&self, samples: &[ConvergenceSample<T>]) {
        // Make sure that there is at least one sample
        // otherwise do nothing.
        if let Some(sample) = samples.last() {
            println!(
                "sample {}: n={} I={} |err|={}",
                samples.len() - 1,
                sample.n(),
                sample.approximation(),
                sample.error()
            );
        }
    }
}

/// A callback that writes all samples as a JSON array to a file, replacing its content after each
/// sample. The file can be read back into a `Vec<ConvergenceSample<T>>`, for example to plot the
/// error curve.
///
/// Since the whole array is rewritten every time, a sweep of $N$ samples writes $\mathcal{O}(N^2)$
/// samples in total. For long sweeps use [`SinkCallback`] and call [`FileWriterCallback::write`]
/// once with [`ConvergenceReport::samples`](crate::convergence::ConvergenceReport::samples).
pub struct FileWriterCallback {
    path: PathBuf,
}

impl FileWriterCallback {
    /// Creates a callback writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path the samples are written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `samples` to the file, replacing its content. This is linear in `samples.len()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written, or serialization fails.
    pub fn write<T: Serialize>(&self, samples: &[ConvergenceSample<T>]) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, samples)?;
        writer.flush()?;

        Ok(())
    }
}

impl<T: Serialize> Callback<T> for FileWriterCallback {
    fn report(&self, samples: &[ConvergenceSample<T>]) {
        if let Err(err) = self.write(samples) {
            eprintln!(
                "could not write samples to '{}': {}",
                self.path.display(),
                err
            );
        }
    }
}
