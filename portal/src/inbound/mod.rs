//! Inbound adapters that translate user input into controller calls while
//! keeping argument parsing and output formatting at the edge.
//!
//! The command-line front end lives under [`cli`].

pub mod cli;
