// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

impl CryptoCtx {
    /// Creates an empty options object for `alg_type`.
    pub fn options_open(&self, alg_type: AlgorithmType) -> CryptoResult<Handle> {
        self.options.register(Options::new(alg_type))
    }

    pub fn options_close(&self, options: Handle) -> CryptoResult<()> {
        self.options.close(options)
    }

    /// Sets a byte-valued option, replacing any previous value.
    #[tracing::instrument(skip_all, fields(options = *options, name = name), err(level = "debug"))]
    pub fn options_set(&self, options: Handle, name: &str, value: &[u8]) -> CryptoResult<()> {
        self.options.with_mut(options, |obj| obj.set(name, value))
    }

    /// Sets an integer-valued option, replacing any previous value.
    #[tracing::instrument(skip_all, fields(options = *options, name = name), err(level = "debug"))]
    pub fn options_set_u64(&self, options: Handle, name: &str, value: u64) -> CryptoResult<()> {
        self.options.with_mut(options, |obj| obj.set_u64(name, value))
    }

    /// Bytes remaining in an array output.
    pub fn array_output_len(&self, output: Handle) -> CryptoResult<usize> {
        self.array_outputs.with(output, |obj| Ok(obj.len()))
    }

    /// Copies the remaining bytes of an array output into `buf`.
    ///
    /// # Errors
    ///
    /// * `Overflow` - `buf` is smaller than what remains; nothing is consumed
    pub fn array_output_pull(&self, output: Handle, buf: &mut [u8]) -> CryptoResult<usize> {
        self.array_outputs.with_mut(output, |obj| obj.pull(buf))
    }

    /// Releases an array output, pulled or not.
    pub fn array_output_close(&self, output: Handle) -> CryptoResult<()> {
        self.array_outputs.close(output)
    }

    /// Snapshot of the options behind `options`, checked against `alg_type`.
    pub(super) fn options_snapshot(
        &self,
        options: Option<Handle>,
        alg_type: AlgorithmType,
    ) -> CryptoResult<Option<Options>> {
        options
            .map(|handle| {
                let options = self.options.get(handle)?;
                options.expect_type(alg_type)?;
                Ok(options)
            })
            .transpose()
    }
}
