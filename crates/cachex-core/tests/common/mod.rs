//! Shared helpers for building synthetic cache containers on disk.

#![allow(dead_code)]

pub mod fixture;
