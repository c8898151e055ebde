//! Load a CSV of people and look them up by first name, last name or
//! birth year.

pub mod cli;
pub mod data;
