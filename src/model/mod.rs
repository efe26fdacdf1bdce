//! Loaders turning mesh files into triangles.

pub mod obj;
