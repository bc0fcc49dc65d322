//! Responsive set generation with bounded concurrency and failure isolation.
//!
//! Each size target runs the transformer on tokio's blocking pool. Targets are
//! bounded by a semaphore, and a failing, panicking or timed-out target is
//! logged and dropped without affecting its siblings. Results come back in
//! input order.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::config::Config;
use crate::error::PipelineError;
use crate::types::{ProcessingOptions, ResponsiveSizeResult, ResponsiveSizeSpec};

use super::processor::{ImageTransformer, Transform};

/// Fans one source buffer out into a set of named size variants.
#[derive(Clone)]
pub struct ResponsiveGenerator {
    transformer: Arc<dyn Transform>,
    parallel: usize,
    timeout: Duration,
}

impl ResponsiveGenerator {
    /// Create a generator backed by the real transformer.
    pub fn new(config: &Config) -> Self {
        Self::with_transformer(
            Arc::new(ImageTransformer::new(&config.processing)),
            config.processing.parallel_workers,
            Duration::from_millis(config.limits.transform_timeout_ms),
        )
    }

    /// Create a generator over any [`Transform`] implementation.
    pub fn with_transformer(
        transformer: Arc<dyn Transform>,
        parallel: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            transformer,
            parallel: parallel.max(1),
            timeout,
        }
    }

    /// Produce one variant per size target, bounded by its width and height.
    ///
    /// Never fails: targets that error are omitted from the result.
    pub async fn generate(
        &self,
        buffer: &[u8],
        specs: &[ResponsiveSizeSpec],
    ) -> Vec<ResponsiveSizeResult> {
        self.generate_with_options(buffer, specs, ProcessingOptions::default())
            .await
    }

    /// Like [`generate`](Self::generate), with caller-fixed quality and format.
    ///
    /// The bounds in `base` are ignored; every target takes its bounds from
    /// its size target.
    pub async fn generate_with_options(
        &self,
        buffer: &[u8],
        specs: &[ResponsiveSizeSpec],
        base: ProcessingOptions,
    ) -> Vec<ResponsiveSizeResult> {
        let source: Arc<[u8]> = Arc::from(buffer);
        let semaphore = Arc::new(Semaphore::new(self.parallel));
        let mut handles = Vec::with_capacity(specs.len());

        for spec in specs {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::warn!("Responsive semaphore closed unexpectedly, stopping fan-out");
                    break;
                }
            };

            let transformer = self.transformer.clone();
            let source = source.clone();
            let timeout = self.timeout;
            let options = ProcessingOptions {
                max_width: Some(spec.width),
                max_height: Some(spec.height),
                ..base
            };

            let handle = tokio::spawn(async move {
                // Blocking work can't be cancelled, so the permit lives until
                // it returns even when the target has already timed out.
                let work = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    transformer.transform(&source, &options)
                });
                match tokio::time::timeout(timeout, work).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(e)) => Err(PipelineError::processing(format!(
                        "transform task failed: {e}"
                    ))),
                    Err(_) => Err(PipelineError::Timeout {
                        stage: "transform".to_string(),
                        timeout_ms: timeout.as_millis() as u64,
                    }),
                }
            });

            handles.push((spec.suffix.clone(), handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        let mut failed = 0usize;

        for (suffix, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(PipelineError::processing(format!("responsive task failed: {e}"))),
            };
            match outcome {
                Ok(processed) => results.push(ResponsiveSizeResult {
                    suffix,
                    buffer: processed.buffer,
                    info: processed.info,
                }),
                Err(e) => {
                    tracing::warn!(suffix = %suffix, "Responsive variant failed: {e}");
                    failed += 1;
                }
            }
        }

        tracing::info!(
            succeeded = results.len(),
            failed,
            "Generated responsive set"
        );

        results
    }
}
