//! yamlselect - path expressions for YAML documents.
//!
//! The [`yamlpath`] module holds the path language: lexer, selector parser,
//! diagnostics and resolver, generic over any tree implementing
//! [`yamlpath::PathNode`]. The [`document`] module provides a YAML tree that
//! implements it, and [`file`] and [`config`] support the command-line tool.

pub mod config;
pub mod document;
pub mod file;
pub mod yamlpath;
