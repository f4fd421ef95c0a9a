//! Modules layer - Infrastructure components below the features
//!
//! Contains the local filesystem store shared by the file and text features.

pub mod storage;
