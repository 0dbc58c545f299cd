//! Analysis pipeline
//!
//! Drives corpus construction and the feature extractors for each figure of
//! a document, with observer hooks at every stage boundary.

pub mod observer;
pub mod runner;
