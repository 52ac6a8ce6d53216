#![allow(clippy::needless_range_loop)]

pub mod bitmat;
pub mod cpu;
pub mod error;
pub mod mpc;
pub mod rng;
pub mod share;
pub mod utils;
pub mod view;
pub mod word;

pub use bitmat::{BitMat, BitVec};
pub use error::KernelError;
pub use mpc::{mpc_and, mpc_and_verify};
pub use rng::{RandomSource, SeededPrng, SystemRandom};
pub use share::{share_const_matmul, share_const_xor, share_xor, ShareTriple, SC_PROOF};
pub use view::View;
