// error.rs
//
// Copyright (c) 2019-2024  Minnesota Department of Transportation
//
use thiserror::Error;

/// MVT decode errors
#[derive(Debug, Error)]
pub enum Error {
    /// Feature declares an unknown or unsupported geometry type
    #[error("unsupported geometry type")]
    UnsupportedGeomType(),
}

/// MVT decode result
pub type Result<T> = std::result::Result<T, Error>;
