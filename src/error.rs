// Copyright 2022 Redglyph
//
// Errors of the checked formatting API.

use thiserror::Error;

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The destination cannot hold the longest representation of the requested notation.
    #[error("buffer too small: {required} bytes required, {available} available")]
    BufferTooSmall { required: usize, available: usize },
}
