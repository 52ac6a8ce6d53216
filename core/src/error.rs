use thiserror::Error;

/// Errors the kernel can return instead of a wrong matrix.
///
/// Per the core's error-handling policy, these are the only runtime failure
/// modes besides allocation failure (which we surface as an ordinary Rust
/// allocator abort, matching the rest of the ecosystem): dimension mismatches
/// are caller bugs, and the caller must treat one as fatal for the current
/// signature operation rather than attempt recovery.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    #[error(
        "vector x matrix dimension mismatch: vector has {vector_cols} columns, \
         matrix has {matrix_rows} rows"
    )]
    DimensionMismatch {
        vector_cols: usize,
        matrix_rows: usize,
    },

    #[error(
        "matrix multiply destination shape mismatch: destination has {dest_cols} columns, \
         matrix has {matrix_cols} columns"
    )]
    DestinationShapeMismatch {
        dest_cols: usize,
        matrix_cols: usize,
    },
}
