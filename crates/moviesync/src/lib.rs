//! AWS adapters shared by the `moviesync` binary and the workspace `xtask`.

pub mod aws;
