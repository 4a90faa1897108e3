//! Route finder server.
//!
//! A web application that answers: "How can I get from this city to that
//! one?" Users type two city names, pick from autocomplete candidates, and
//! get the routes a remote search service ranks for them.

pub mod backend;
pub mod catalog;
pub mod domain;
pub mod present;
pub mod screen;
pub mod search;
pub mod web;
